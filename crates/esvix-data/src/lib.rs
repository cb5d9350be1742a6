//! 시장 데이터 계층.
//!
//! [`MarketDataProvider`] trait은 업스트림 시세 API(Polygon, AlphaVantage,
//! Yahoo 등 무엇이든)를 "심볼과 기간을 주면 OHLC 바를 돌려주는 것"으로
//! 추상화합니다. 실제 REST 어댑터는 이 크레이트의 범위 밖이며,
//! 테스트/데모용 [`MockMarketDataProvider`]와 CSV 저장소만 제공합니다.

pub mod provider;
pub mod storage;

pub use provider::{MarketDataProvider, MockMarketDataProvider, ProviderError};
pub use storage::{load_daily_csv, write_trade_log_csv, TradeLogRow};
