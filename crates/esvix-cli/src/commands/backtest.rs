//! 백테스트 서브커맨드.
//!
//! CSV 두 개를 로드해 엔진을 돌리고, 선택적으로 JSON 리포트와
//! 트레이드 로그 CSV를 기록합니다.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use esvix_analytics::{BacktestConfig, BacktestEngine, BacktestReport};
use esvix_core::DivergenceRule;
use esvix_data::{load_daily_csv, write_trade_log_csv, TradeLogRow};
use tracing::info;

/// 백테스트 커맨드 설정
#[derive(Debug, Clone)]
pub struct BacktestCliConfig {
    /// 프록시 일봉 CSV 경로
    pub proxy_csv: PathBuf,
    /// 변동성 일봉 CSV 경로
    pub vol_csv: PathBuf,
    /// 엔진 설정 TOML 경로 (없으면 기본값)
    pub config_path: Option<PathBuf>,
    /// 진입 규칙 덮어쓰기
    pub rule: Option<DivergenceRule>,
    /// JSON 리포트 출력 경로
    pub output_path: Option<PathBuf>,
    /// 트레이드 로그 CSV 출력 경로
    pub trade_log_path: Option<PathBuf>,
}

/// 설정 파일과 CLI 덮어쓰기를 합쳐 엔진 설정을 만듭니다.
fn resolve_engine_config(cli: &BacktestCliConfig) -> anyhow::Result<BacktestConfig> {
    let mut config = match &cli.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("설정 파일을 열 수 없습니다: {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("설정 파일 해석 실패: {}", path.display()))?
        }
        None => BacktestConfig::default(),
    };

    if let Some(rule) = cli.rule {
        config = config.with_divergence_rule(rule);
    }
    Ok(config)
}

/// 백테스트 실행.
pub fn run_backtest(cli: BacktestCliConfig) -> anyhow::Result<BacktestReport> {
    let config = resolve_engine_config(&cli)?;

    let proxy = load_daily_csv(&cli.proxy_csv)
        .with_context(|| format!("프록시 CSV 로드 실패: {}", cli.proxy_csv.display()))?;
    let vol = load_daily_csv(&cli.vol_csv)
        .with_context(|| format!("변동성 CSV 로드 실패: {}", cli.vol_csv.display()))?;

    let engine = BacktestEngine::new(config);
    let report = engine.run(&proxy, &vol)?;
    info!(
        rows = report.rows.len(),
        trades = report.stats.trades,
        "백테스트 완료"
    );

    if let Some(path) = &cli.output_path {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("리포트 저장 실패: {}", path.display()))?;
    }

    if let Some(path) = &cli.trade_log_path {
        let rows: Vec<TradeLogRow> = report
            .rows
            .iter()
            .filter(|r| r.signal.is_active())
            .map(|r| TradeLogRow {
                date: r.date,
                side: r.signal.to_string(),
                pnl: r.pnl_small,
                equity: None,
            })
            .collect();
        write_trade_log_csv(path, &rows)
            .with_context(|| format!("트레이드 로그 저장 실패: {}", path.display()))?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture_csvs(dir: &std::path::Path) -> (PathBuf, PathBuf) {
        let proxy_path = dir.join("spy.csv");
        let vol_path = dir.join("vix.csv");

        let mut proxy = String::from("Date,Open,High,Low,Close\n");
        let mut vol = String::from("Date,Open,High,Low,Close\n");
        for day in 1..=14 {
            proxy.push_str(&format!("2024-06-{day:02},4500,4512.5,4487.5,4500\n"));
            vol.push_str(&format!("2024-06-{day:02},20,21,19,20\n"));
        }
        // 다이버전스 행: SPY +12 / VIX -3
        proxy.push_str("2024-06-15,4500,4520,4495,4512\n");
        vol.push_str("2024-06-15,23,23.5,19.5,20\n");

        fs::write(&proxy_path, proxy).unwrap();
        fs::write(&vol_path, vol).unwrap();
        (proxy_path, vol_path)
    }

    fn cli_config(proxy_csv: PathBuf, vol_csv: PathBuf) -> BacktestCliConfig {
        BacktestCliConfig {
            proxy_csv,
            vol_csv,
            config_path: None,
            rule: None,
            output_path: None,
            trade_log_path: None,
        }
    }

    #[test]
    fn test_run_backtest_from_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        let (proxy_csv, vol_csv) = write_fixture_csvs(dir.path());

        let report = run_backtest(cli_config(proxy_csv, vol_csv)).unwrap();
        assert_eq!(report.rows.len(), 15);
        assert_eq!(report.stats.trades, 1);
    }

    #[test]
    fn test_run_backtest_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let (proxy_csv, vol_csv) = write_fixture_csvs(dir.path());
        let output_path = dir.path().join("report.json");
        let trade_log_path = dir.path().join("trades.csv");

        let mut config = cli_config(proxy_csv, vol_csv);
        config.output_path = Some(output_path.clone());
        config.trade_log_path = Some(trade_log_path.clone());
        run_backtest(config).unwrap();

        let json = fs::read_to_string(&output_path).unwrap();
        assert!(json.contains("\"monthly\""));

        let log = fs::read_to_string(&trade_log_path).unwrap();
        assert!(log.starts_with("Date,Side,PnL\n"));
        assert!(log.contains("2024-06-15,LONG,"));
    }

    #[test]
    fn test_toml_config_and_rule_override() {
        let dir = tempfile::tempdir().unwrap();
        let (proxy_csv, vol_csv) = write_fixture_csvs(dir.path());

        let config_path = dir.path().join("engine.toml");
        fs::write(
            &config_path,
            "atr_period = 14\nmin_atr = 30.0\n\n[divergence_rule]\nmode = \"sign_only\"\n",
        )
        .unwrap();

        let mut config = cli_config(proxy_csv, vol_csv);
        config.config_path = Some(config_path);
        config.rule = Some(DivergenceRule::pct_threshold());

        let resolved = resolve_engine_config(&config).unwrap();
        assert_eq!(resolved.min_atr, rust_decimal_macros::dec!(30));
        assert_eq!(resolved.divergence_rule, DivergenceRule::pct_threshold());

        // min_atr 30 > ATR 25 → 거래 없음
        let report = run_backtest(config).unwrap();
        assert_eq!(report.stats.trades, 0);
    }

    #[test]
    fn test_missing_csv_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = cli_config(dir.path().join("no.csv"), dir.path().join("nope.csv"));
        assert!(run_backtest(config).is_err());
    }
}
