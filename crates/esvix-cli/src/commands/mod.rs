//! CLI 서브커맨드 구현.

pub mod backtest;
pub mod live;
pub mod simulate;
