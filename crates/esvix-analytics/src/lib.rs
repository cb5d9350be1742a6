//! ES+VIX 다이버전스 전략 분석 엔진.
//!
//! 두 가지 백테스트 경로를 제공합니다:
//!
//! - [`backtest::BacktestEngine`]: 다단계 필터(ATR/레짐/무브 크기)와
//!   이중 계약 규격 손익, 월별 집계를 포함한 전체 파이프라인
//! - [`backtest::EquityCurveSimulator`]: 필터 없이 원시 다이버전스
//!   시그널을 그대로 적용하는 경량 자산 곡선 시뮬레이터

pub mod backtest;

pub use backtest::{
    BacktestConfig, BacktestEngine, BacktestError, BacktestReport, BacktestStats, ContractSpec,
    EquityCurveSimulator, MonthlyPnl, SignalRow, SimTrade, SimulationReport, SimulationStats,
    SimulatorConfig,
};
