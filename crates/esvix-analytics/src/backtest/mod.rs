//! 백테스팅 모듈
//!
//! 과거 SPY/VIX 일봉으로 다이버전스 전략을 시뮬레이션하고 성과를
//! 분석합니다.
//!
//! # 주요 구성요소
//!
//! - [`BacktestConfig`]: 백테스트 설정 (ATR/레짐 필터, 진입 규칙, 계약 규격)
//! - [`BacktestEngine`]: 전체 필터 파이프라인 백테스트 엔진
//! - [`BacktestReport`]: 월별 손익, 집계 통계, 행 단위 데이터셋
//! - [`EquityCurveSimulator`]: 필터 없는 경량 자산 곡선 시뮬레이터

pub mod engine;
pub mod simulator;

pub use engine::{
    BacktestConfig, BacktestEngine, BacktestError, BacktestReport, BacktestResult, BacktestStats,
    ContractSpec, MonthlyPnl, SignalRow,
};
pub use simulator::{
    EquityCurveSimulator, SimTrade, SimulationReport, SimulationStats, SimulatorConfig,
};
// Re-export core types for convenience
pub use esvix_core::{AlignedRow, DivergenceRule, SignalKind, VolRegime};
