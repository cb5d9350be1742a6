//! ES+VIX 다이버전스 시스템의 핵심 도메인 타입.
//!
//! 지수 프록시(SPY)와 변동성 지수(VIX)의 OHLC 시계열을 다루기 위한
//! 공통 타입들을 제공합니다:
//!
//! - **바 타입**: [`DailyBar`], [`IntradayBar`], 원시 레코드 정규화
//! - **시그널**: [`SignalKind`], [`DivergenceRule`], [`MoveBasis`]
//! - **변동성 레짐**: [`VolRegime`] (skip/half/full 밴드 분류)
//! - **정렬**: [`align_series`] (날짜 기준 inner join)
//! - **지표**: [`AtrCalculator`] (고정 윈도우 ATR)
//!
//! 모든 연산은 입력 시계열에 대한 순수 함수이며, 호출 간 공유 상태가
//! 없습니다.

pub mod domain;
pub mod error;
pub mod indicators;

pub use domain::{
    align_series, normalize_series, sign, AlignedRow, DailyBar, DivergenceRule, IntradayBar,
    MoveBasis, RawDailyRecord, SignalKind, VolRegime,
};
pub use error::DataError;
pub use indicators::{true_range, AtrCalculator};
