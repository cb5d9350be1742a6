//! 경량 자산 곡선 시뮬레이터
//!
//! ATR/레짐 필터를 건너뛰고 원시 다이버전스 시그널을 그대로 적용하는
//! 단순 백테스트 경로입니다. 거래가 있는 행마다 고정 포지션 크기로
//! 손익을 누적하여 자산 곡선을 만듭니다.
//!
//! 자산 누적은 날짜순 순차 합산이므로 같은 입력은 항상 같은 곡선을
//! 만듭니다.

use chrono::NaiveDate;
use esvix_core::{AlignedRow, DivergenceRule, SignalKind};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// 설정
// =============================================================================

/// 시뮬레이터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// 거래당 명목 포지션 크기
    #[serde(default = "default_position_size")]
    pub position_size: Decimal,

    /// 시작 자산
    #[serde(default = "default_starting_equity")]
    pub starting_equity: Decimal,

    /// 진입 규칙
    #[serde(default)]
    pub divergence_rule: DivergenceRule,
}

fn default_position_size() -> Decimal {
    dec!(10000)
}
fn default_starting_equity() -> Decimal {
    dec!(10000)
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            position_size: default_position_size(),
            starting_equity: default_starting_equity(),
            divergence_rule: DivergenceRule::default(),
        }
    }
}

impl SimulatorConfig {
    /// 포지션 크기 설정
    pub fn with_position_size(mut self, size: Decimal) -> Self {
        self.position_size = size;
        self
    }

    /// 시작 자산 설정
    pub fn with_starting_equity(mut self, equity: Decimal) -> Self {
        self.starting_equity = equity;
        self
    }

    /// 진입 규칙 설정
    pub fn with_divergence_rule(mut self, rule: DivergenceRule) -> Self {
        self.divergence_rule = rule;
        self
    }
}

// =============================================================================
// 결과 타입
// =============================================================================

/// 시뮬레이션 거래 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimTrade {
    /// 거래 날짜
    pub date: NaiveDate,
    /// 방향
    pub side: SignalKind,
    /// 프록시 다리 수익률 (방향 반영)
    pub trade_return: Decimal,
    /// 손익 (position_size × trade_return)
    pub pnl: Decimal,
    /// 거래 직후 자산
    pub equity: Decimal,
}

/// 확장 통계.
///
/// 비율 지표는 f64로 계산합니다. 모든 나눗셈은 0 분모를 명시적으로
/// 가드하며, 그 경우 0을 반환합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// 거래 횟수
    pub trades: usize,
    /// 승리 횟수 (손익 > 0)
    pub wins: usize,
    /// 패배 횟수 (손익 < 0)
    pub losses: usize,
    /// 전체 수익률 (final/starting − 1)
    pub total_return: f64,
    /// 승률 % (소수 둘째 자리 반올림, 거래 0회면 0)
    pub win_rate_pct: f64,
    /// 평균 승리 손익 (승리 없으면 0)
    pub avg_win: f64,
    /// 평균 패배 손익 (패배 없으면 0)
    pub avg_loss: f64,
    /// 기대값 (win_rate·avg_win + (1−win_rate)·avg_loss)
    pub expectancy: f64,
    /// 최대 낙폭 (곡선이 비어있으면 0)
    pub max_drawdown: f64,
    /// 연환산 샤프 비율 (거래 2회 미만 또는 분산 0이면 0)
    pub sharpe: f64,
}

/// 시뮬레이션 실행 리포트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// 설정 정보
    pub config: SimulatorConfig,
    /// 거래 로그 (날짜순)
    pub trades: Vec<SimTrade>,
    /// 최종 자산
    pub final_equity: Decimal,
    /// 자산 곡선 (거래당 한 점)
    pub equity_curve: Vec<Decimal>,
    /// 확장 통계
    pub stats: SimulationStats,
}

impl SimulationReport {
    /// 요약 문자열 반환
    pub fn summary(&self) -> String {
        format!(
            "시뮬레이션 결과 요약\n\
             ═══════════════════════════════════════\n\
             거래: {} (승 {} / 패 {})\n\
             승률: {:.2}%\n\
             ───────────────────────────────────────\n\
             시작 자산: {:.2}\n\
             최종 자산: {:.2}\n\
             전체 수익률: {:.2}%\n\
             최대 낙폭: {:.2}%\n\
             샤프 비율: {:.2}\n\
             ═══════════════════════════════════════",
            self.stats.trades,
            self.stats.wins,
            self.stats.losses,
            self.stats.win_rate_pct,
            self.config.starting_equity,
            self.final_equity,
            self.stats.total_return * 100.0,
            self.stats.max_drawdown * 100.0,
            self.stats.sharpe,
        )
    }
}

// =============================================================================
// 시뮬레이터
// =============================================================================

/// 자산 곡선 시뮬레이터
#[derive(Debug, Clone, Default)]
pub struct EquityCurveSimulator {
    config: SimulatorConfig,
}

impl EquityCurveSimulator {
    /// 새로운 시뮬레이터를 생성합니다.
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// 설정 조회
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// 정렬된 행 시퀀스에 대해 시뮬레이션 실행.
    ///
    /// 입력이 비어있으면 거래 0건, 최종 자산 = 시작 자산인 리포트를
    /// 반환합니다. 비어있는 입력의 진단은 호출자 책임입니다.
    pub fn simulate(&self, rows: &[AlignedRow]) -> SimulationReport {
        let mut trades = Vec::new();
        let mut equity = self.config.starting_equity;

        for row in rows {
            let proxy = &row.proxy;
            let signal = self.config.divergence_rule.evaluate(
                proxy.open,
                proxy.close,
                row.vol.open,
                row.vol.close,
            );
            if !signal.is_active() {
                continue;
            }
            // 규칙 평가가 프록시 시가 0을 걸러내므로 여기서 분모는 항상 양수
            let trade_return = match signal {
                SignalKind::Long => (proxy.close - proxy.open) / proxy.open,
                SignalKind::Short => (proxy.open - proxy.close) / proxy.open,
                SignalKind::None => Decimal::ZERO,
            };

            let pnl = self.config.position_size * trade_return;
            equity += pnl;

            debug!(date = %row.date, side = %signal, %pnl, %equity, "시뮬레이션 거래");

            trades.push(SimTrade {
                date: row.date,
                side: signal,
                trade_return,
                pnl,
                equity,
            });
        }

        let equity_curve: Vec<Decimal> = trades.iter().map(|t| t.equity).collect();
        let stats = build_stats(&trades, self.config.starting_equity, equity);

        SimulationReport {
            config: self.config.clone(),
            trades,
            final_equity: equity,
            equity_curve,
            stats,
        }
    }
}

/// 거래 로그에서 확장 통계 계산.
fn build_stats(trades: &[SimTrade], starting_equity: Decimal, final_equity: Decimal) -> SimulationStats {
    let pnls: Vec<f64> = trades.iter().map(|t| decimal_to_f64(t.pnl)).collect();
    let wins: Vec<f64> = pnls.iter().copied().filter(|p| *p > 0.0).collect();
    let losses: Vec<f64> = pnls.iter().copied().filter(|p| *p < 0.0).collect();

    let trade_count = trades.len();
    let win_rate = if trade_count == 0 {
        0.0
    } else {
        wins.len() as f64 / trade_count as f64
    };

    let avg_win = mean(&wins);
    let avg_loss = mean(&losses);

    let total_return = if starting_equity.is_zero() {
        0.0
    } else {
        decimal_to_f64(final_equity / starting_equity) - 1.0
    };

    // 최대 낙폭: 러닝 맥스 대비 하락 폭의 최솟값
    let mut max_drawdown = 0.0f64;
    let mut running_max = f64::MIN;
    for equity in trades.iter().map(|t| decimal_to_f64(t.equity)) {
        running_max = running_max.max(equity);
        if running_max > 0.0 {
            let drawdown = (equity - running_max) / running_max;
            max_drawdown = max_drawdown.min(drawdown);
        }
    }

    let returns: Vec<f64> = trades
        .iter()
        .map(|t| decimal_to_f64(t.trade_return))
        .collect();
    let sharpe = if returns.len() < 2 {
        0.0
    } else {
        let mean_ret = mean(&returns);
        let variance =
            returns.iter().map(|r| (r - mean_ret).powi(2)).sum::<f64>() / returns.len() as f64;
        let std = variance.sqrt();
        if std == 0.0 {
            0.0
        } else {
            mean_ret / std * 252.0f64.sqrt()
        }
    };

    SimulationStats {
        trades: trade_count,
        wins: wins.len(),
        losses: losses.len(),
        total_return,
        win_rate_pct: (win_rate * 100.0 * 100.0).round() / 100.0,
        avg_win,
        avg_loss,
        expectancy: win_rate * avg_win + (1.0 - win_rate) * avg_loss,
        max_drawdown,
        sharpe,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

// =============================================================================
// 테스트
// =============================================================================
