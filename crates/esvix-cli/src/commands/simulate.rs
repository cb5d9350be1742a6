//! 경량 시뮬레이션 서브커맨드.
//!
//! 필터 없는 원시 다이버전스 시그널로 자산 곡선을 만듭니다.
//! 트레이드 로그 CSV에는 `Equity` 컬럼이 추가됩니다.

use std::path::PathBuf;

use anyhow::Context;
use esvix_analytics::{EquityCurveSimulator, SimulationReport, SimulatorConfig};
use esvix_core::{align_series, DivergenceRule};
use esvix_data::{load_daily_csv, write_trade_log_csv, TradeLogRow};
use rust_decimal::Decimal;
use tracing::info;

/// 시뮬레이션 커맨드 설정
#[derive(Debug, Clone)]
pub struct SimulateCliConfig {
    /// 프록시 일봉 CSV 경로
    pub proxy_csv: PathBuf,
    /// 변동성 일봉 CSV 경로
    pub vol_csv: PathBuf,
    /// 포지션 크기 덮어쓰기
    pub position_size: Option<Decimal>,
    /// 시작 자산 덮어쓰기
    pub starting_equity: Option<Decimal>,
    /// 진입 규칙 덮어쓰기
    pub rule: Option<DivergenceRule>,
    /// 트레이드 로그 CSV 출력 경로
    pub trade_log_path: Option<PathBuf>,
}

/// 시뮬레이션 실행.
pub fn run_simulate(cli: SimulateCliConfig) -> anyhow::Result<SimulationReport> {
    let mut config = SimulatorConfig::default();
    if let Some(size) = cli.position_size {
        config = config.with_position_size(size);
    }
    if let Some(equity) = cli.starting_equity {
        config = config.with_starting_equity(equity);
    }
    if let Some(rule) = cli.rule {
        config = config.with_divergence_rule(rule);
    }

    let proxy = load_daily_csv(&cli.proxy_csv)
        .with_context(|| format!("프록시 CSV 로드 실패: {}", cli.proxy_csv.display()))?;
    let vol = load_daily_csv(&cli.vol_csv)
        .with_context(|| format!("변동성 CSV 로드 실패: {}", cli.vol_csv.display()))?;
    let rows = align_series(&proxy, &vol);

    let simulator = EquityCurveSimulator::new(config);
    let report = simulator.simulate(&rows);
    info!(
        rows = rows.len(),
        trades = report.stats.trades,
        "시뮬레이션 완료"
    );

    if let Some(path) = &cli.trade_log_path {
        let log_rows: Vec<TradeLogRow> = report
            .trades
            .iter()
            .map(|t| TradeLogRow {
                date: t.date,
                side: t.side.to_string(),
                pnl: t.pnl,
                equity: Some(t.equity),
            })
            .collect();
        write_trade_log_csv(path, &log_rows)
            .with_context(|| format!("트레이드 로그 저장 실패: {}", path.display()))?;
    }

    Ok(report)
}
