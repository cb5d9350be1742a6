//! 라이브 다이버전스 탐지와 봇 상태 머신.
//!
//! 이 crate는 다음을 제공합니다:
//! - 최신 인트라데이 바 두 개로 단일 시그널을 계산하는 무상태 탐지기
//! - `Flat`/`Long`/`Short` 전이가 명시적인 봇 상태 머신과 거래 로그
//! - 주입 가능한 브로커 커넥터 capability와 시뮬레이션 구현체
//!
//! # 예제
//!
//! ```rust,ignore
//! use esvix_live::{BotEngine, BrokerKind, LiveDivergenceDetector};
//! use esvix_core::MoveBasis;
//!
//! let detector = LiveDivergenceDetector::new(MoveBasis::Intrabar);
//! let live = detector.detect(&proxy_bars, &vol_bars)?;
//!
//! let broker = BrokerKind::Ibkr.connector();
//! let mut bot = BotEngine::new();
//! if bot.should_enter(live.signal) {
//!     bot.enter(live.signal, chrono::Utc::now())?;
//! }
//! ```

pub mod bot;
pub mod broker;
pub mod detector;

// 주요 타입 재내보내기
pub use bot::{BotEngine, BotError, BotStatus, PositionState, TradeAction, TradeLogEntry};
pub use broker::{
    BrokerConnector, BrokerError, BrokerKind, OrderSide, SimulatedAlpacaConnector,
    SimulatedIbkrConnector,
};
pub use detector::{LiveDivergenceDetector, LiveSignal};
