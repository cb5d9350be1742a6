//! ES+VIX 다이버전스 전략 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 라이브 스냅샷 시그널 (모의 공급자)
//! esvix live --proxy SPY --vol VIX
//!
//! # 종가 대비 기준으로 라이브 시그널
//! esvix live --proxy SPY --vol VIX --basis close-to-close
//!
//! # 전체 필터 파이프라인 백테스트
//! esvix backtest --proxy-csv data/spy.csv --vol-csv data/vix.csv \
//!     --output report.json --trade-log trades.csv
//!
//! # 필터 없는 경량 자산 곡선 시뮬레이션
//! esvix simulate --proxy-csv data/spy.csv --vol-csv data/vix.csv \
//!     --position-size 10000 --trade-log trades.csv
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use esvix_core::{DivergenceRule, MoveBasis};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    backtest::{run_backtest, BacktestCliConfig},
    live::{run_live, LiveCliConfig},
    simulate::{run_simulate, SimulateCliConfig},
};

#[derive(Parser)]
#[command(name = "esvix")]
#[command(about = "ES+VIX divergence strategy CLI - 다이버전스 시그널/백테스트 도구", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 라이브 스냅샷 시그널 계산 (모의 공급자)
    Live {
        /// 프록시 심볼 (예: SPY)
        #[arg(short, long, default_value = "SPY")]
        proxy: String,

        /// 변동성 심볼 (예: VIX)
        #[arg(short, long, default_value = "VIX")]
        vol: String,

        /// 무브 산출 기준 (intrabar, close-to-close)
        #[arg(short, long, default_value = "intrabar")]
        basis: String,

        /// 공급자에서 받을 바 개수
        #[arg(long, default_value = "30")]
        bars: usize,

        /// 모의 공급자 시드
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// 전체 필터 파이프라인 백테스트 실행
    Backtest {
        /// 프록시 일봉 CSV 경로
        #[arg(long)]
        proxy_csv: PathBuf,

        /// 변동성 일봉 CSV 경로
        #[arg(long)]
        vol_csv: PathBuf,

        /// 엔진 설정 TOML 경로
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// 진입 규칙 (sign-only, pct-threshold)
        #[arg(short, long)]
        rule: Option<String>,

        /// JSON 리포트 출력 경로
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 트레이드 로그 CSV 출력 경로
        #[arg(long)]
        trade_log: Option<PathBuf>,
    },

    /// 필터 없는 경량 자산 곡선 시뮬레이션
    Simulate {
        /// 프록시 일봉 CSV 경로
        #[arg(long)]
        proxy_csv: PathBuf,

        /// 변동성 일봉 CSV 경로
        #[arg(long)]
        vol_csv: PathBuf,

        /// 거래당 명목 포지션 크기
        #[arg(long)]
        position_size: Option<String>,

        /// 시작 자산
        #[arg(long)]
        starting_equity: Option<String>,

        /// 진입 규칙 (sign-only, pct-threshold)
        #[arg(short, long)]
        rule: Option<String>,

        /// 트레이드 로그 CSV 출력 경로 (Equity 컬럼 포함)
        #[arg(long)]
        trade_log: Option<PathBuf>,
    },
}

fn parse_rule(raw: Option<&str>) -> anyhow::Result<Option<DivergenceRule>> {
    raw.map(|s| {
        DivergenceRule::parse(s)
            .ok_or_else(|| anyhow::anyhow!("잘못된 진입 규칙: {s}. 지원: sign-only, pct-threshold"))
    })
    .transpose()
}

fn parse_decimal(raw: Option<&str>, what: &str) -> anyhow::Result<Option<rust_decimal::Decimal>> {
    raw.map(|s| {
        s.parse()
            .map_err(|_| anyhow::anyhow!("잘못된 {what}: {s}"))
    })
    .transpose()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 트레이싱 초기화 (RUST_LOG 환경변수로 필터링)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Live {
            proxy,
            vol,
            basis,
            bars,
            seed,
        } => {
            let basis = MoveBasis::parse(&basis).ok_or_else(|| {
                anyhow::anyhow!("잘못된 무브 기준: {basis}. 지원: intrabar, close-to-close")
            })?;

            let config = LiveCliConfig {
                proxy_symbol: proxy.to_uppercase(),
                vol_symbol: vol.to_uppercase(),
                basis,
                bar_count: bars,
                seed,
            };

            match run_live(config).await {
                Ok(live) => {
                    info!(signal = %live.signal, "라이브 시그널 계산 완료");
                    println!("\n📡 라이브 다이버전스 시그널");
                    println!("───────────────────────────────");
                    println!("시그널: {}", live.signal);
                    println!("프록시 무브: {} (종가 {})", live.es_move, live.proxy_close);
                    println!("변동성 무브: {} (종가 {})", live.vix_move, live.vol_close);
                }
                Err(e) if e.downcast_ref::<esvix_core::DataError>().is_some() => {
                    // 데이터 부족은 진단 메시지로 끝낸다
                    println!("\n⚠️  시그널 계산 불가: {e}");
                }
                Err(e) => {
                    error!("Live signal failed: {e}");
                    return Err(e);
                }
            }
        }

        Commands::Backtest {
            proxy_csv,
            vol_csv,
            config,
            rule,
            output,
            trade_log,
        } => {
            let config = BacktestCliConfig {
                proxy_csv,
                vol_csv,
                config_path: config,
                rule: parse_rule(rule.as_deref())?,
                output_path: output.clone(),
                trade_log_path: trade_log.clone(),
            };

            println!("\n📊 백테스트 실행 중...");
            match run_backtest(config) {
                Ok(report) => {
                    println!("\n{}", report.summary());
                    if let Some(path) = output {
                        println!("\n📁 리포트 저장됨: {}", path.display());
                    }
                    if let Some(path) = trade_log {
                        println!("📁 트레이드 로그 저장됨: {}", path.display());
                    }
                }
                Err(e) => {
                    error!("Backtest failed: {e}");
                    return Err(e);
                }
            }
        }

        Commands::Simulate {
            proxy_csv,
            vol_csv,
            position_size,
            starting_equity,
            rule,
            trade_log,
        } => {
            let config = SimulateCliConfig {
                proxy_csv,
                vol_csv,
                position_size: parse_decimal(position_size.as_deref(), "포지션 크기")?,
                starting_equity: parse_decimal(starting_equity.as_deref(), "시작 자산")?,
                rule: parse_rule(rule.as_deref())?,
                trade_log_path: trade_log.clone(),
            };

            println!("\n📈 시뮬레이션 실행 중...");
            match run_simulate(config) {
                Ok(report) => {
                    println!("\n{}", report.summary());
                    if let Some(path) = trade_log {
                        println!("\n📁 트레이드 로그 저장됨: {}", path.display());
                    }
                }
                Err(e) => {
                    error!("Simulation failed: {e}");
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
