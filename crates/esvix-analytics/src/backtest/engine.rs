//! 백테스팅 엔진
//!
//! SPY/VIX 일봉 시계열로 다이버전스 전략을 시뮬레이션하고 성과를 분석합니다.
//!
//! # 파이프라인
//!
//! ```text
//! 정규화 → 날짜 inner join → 원시 시그널 → 필터(무브/ATR/레짐)
//!        → 사이즈 배수 → 이중 계약 손익 → 월별 집계 + 통계
//! ```
//!
//! 네 가지 필터 조건은 모두 논리곱입니다. 하나라도 실패하면 해당 행의
//! 최종 시그널은 NONE이 되고 손익 기여는 0입니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use esvix_analytics::backtest::{BacktestConfig, BacktestEngine};
//! use rust_decimal_macros::dec;
//!
//! let config = BacktestConfig::default()
//!     .with_min_atr(dec!(20))
//!     .with_min_move(dec!(10));
//!
//! let engine = BacktestEngine::new(config);
//! let report = engine.run(&spy_bars, &vix_bars)?;
//!
//! println!("{}", report.summary());
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use esvix_core::{
    align_series, normalize_series, AtrCalculator, DailyBar, DataError, DivergenceRule,
    RawDailyRecord, SignalKind, VolRegime,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// 백테스트 오류
#[derive(Debug, Error)]
pub enum BacktestError {
    /// 설정 오류
    #[error("백테스트 설정 오류: {0}")]
    Config(String),

    /// 입력 데이터 오류
    #[error("데이터 오류: {0}")]
    Data(#[from] DataError),
}

/// 백테스트 결과 타입
pub type BacktestResult<T> = Result<T, BacktestError>;

// =============================================================================
// 계약 규격
// =============================================================================

/// 선물 계약 손익 규격.
///
/// `dollars = points / tick_size * tick_value * (base_contracts * size_mult)
/// - fixed_cost`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractSpec {
    /// 틱 크기 (포인트)
    pub tick_size: Decimal,
    /// 틱당 가치 (달러)
    pub tick_value: Decimal,
    /// 기본 계약 수
    pub base_contracts: Decimal,
    /// 거래당 고정 비용 (수수료 등)
    pub fixed_cost: Decimal,
}

impl ContractSpec {
    /// 소형 계약 규격 (마이크로급).
    pub fn small() -> Self {
        Self {
            tick_size: dec!(0.25),
            tick_value: dec!(1.25),
            base_contracts: dec!(2),
            fixed_cost: dec!(1.00),
        }
    }

    /// 표준 계약 규격 (미니급).
    pub fn standard() -> Self {
        Self {
            tick_size: dec!(0.25),
            tick_value: dec!(12.5),
            base_contracts: dec!(2),
            fixed_cost: dec!(8.60),
        }
    }

    /// 포인트 손익을 달러 손익으로 변환.
    pub fn dollars(&self, points: Decimal, size_mult: Decimal) -> Decimal {
        points / self.tick_size * self.tick_value * (self.base_contracts * size_mult)
            - self.fixed_cost
    }
}

// =============================================================================
// 설정
// =============================================================================

/// 백테스트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// ATR 기간
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,

    /// ATR 필터 하한 (프록시 포인트)
    #[serde(default = "default_min_atr")]
    pub min_atr: Decimal,

    /// 최소 프록시 무브 (절대 포인트)
    #[serde(default = "default_min_move")]
    pub min_move: Decimal,

    /// 변동성 부스트 임계값 (|vix_move| 초과 시 사이즈 2배)
    #[serde(default = "default_vol_boost_threshold")]
    pub vol_boost_threshold: Decimal,

    /// 진입 규칙
    #[serde(default)]
    pub divergence_rule: DivergenceRule,

    /// 소형 계약 규격
    #[serde(default = "ContractSpec::small")]
    pub small: ContractSpec,

    /// 표준 계약 규격
    #[serde(default = "ContractSpec::standard")]
    pub standard: ContractSpec,
}

// 설정 기본값 함수들 (serde default용)
fn default_atr_period() -> usize {
    14
}
fn default_min_atr() -> Decimal {
    dec!(20)
}
fn default_min_move() -> Decimal {
    dec!(10)
}
fn default_vol_boost_threshold() -> Decimal {
    dec!(2)
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            atr_period: default_atr_period(),
            min_atr: default_min_atr(),
            min_move: default_min_move(),
            vol_boost_threshold: default_vol_boost_threshold(),
            divergence_rule: DivergenceRule::default(),
            small: ContractSpec::small(),
            standard: ContractSpec::standard(),
        }
    }
}

impl BacktestConfig {
    /// ATR 기간 설정
    pub fn with_atr_period(mut self, period: usize) -> Self {
        self.atr_period = period;
        self
    }

    /// ATR 필터 하한 설정
    pub fn with_min_atr(mut self, min_atr: Decimal) -> Self {
        self.min_atr = min_atr;
        self
    }

    /// 최소 무브 설정
    pub fn with_min_move(mut self, min_move: Decimal) -> Self {
        self.min_move = min_move;
        self
    }

    /// 변동성 부스트 임계값 설정
    pub fn with_vol_boost_threshold(mut self, threshold: Decimal) -> Self {
        self.vol_boost_threshold = threshold;
        self
    }

    /// 진입 규칙 설정
    pub fn with_divergence_rule(mut self, rule: DivergenceRule) -> Self {
        self.divergence_rule = rule;
        self
    }

    /// 설정 검증
    pub fn validate(&self) -> BacktestResult<()> {
        if self.atr_period == 0 {
            return Err(BacktestError::Config(
                "ATR 기간은 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.min_atr < Decimal::ZERO || self.min_move < Decimal::ZERO {
            return Err(BacktestError::Config(
                "필터 임계값은 0 이상이어야 합니다".to_string(),
            ));
        }
        for spec in [&self.small, &self.standard] {
            if spec.tick_size <= Decimal::ZERO || spec.tick_value <= Decimal::ZERO {
                return Err(BacktestError::Config(
                    "틱 크기와 틱 가치는 0보다 커야 합니다".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// 행 단위 데이터셋
// =============================================================================

/// 파생 컬럼이 모두 붙은 백테스트 행.
///
/// 한 번 계산되면 불변이며, 전체 시퀀스가 날짜 오름차순 백테스트
/// 데이터셋을 구성합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRow {
    /// 달력 날짜
    pub date: NaiveDate,
    /// 프록시(SPY) 바
    pub proxy: DailyBar,
    /// 변동성(VIX) 바
    pub vol: DailyBar,
    /// 프록시 시가→종가 무브
    pub es_move: Decimal,
    /// 변동성 시가→종가 무브
    pub vix_move: Decimal,
    /// 프록시 방향 부호
    pub es_dir: i8,
    /// 변동성 방향 부호
    pub vix_dir: i8,
    /// 필터 적용 전 원시 시그널
    pub raw_signal: SignalKind,
    /// 변동성 레짐
    pub regime: VolRegime,
    /// ATR 값 (워밍업 구간은 None)
    pub atr: Option<Decimal>,
    /// ATR 필터 통과 여부
    pub atr_ok: bool,
    /// 무브 크기 필터 통과 여부
    pub valid_move: bool,
    /// 변동성 부스트 플래그 (사이징 전용, 필터 아님)
    pub vol_boost: bool,
    /// 필터 적용 후 최종 시그널
    pub signal: SignalKind,
    /// 포지션 사이즈 배수
    pub size_multiplier: Decimal,
    /// 소형 계약 손익
    pub pnl_small: Decimal,
    /// 표준 계약 손익
    pub pnl_standard: Decimal,
}

/// 월별 손익 집계 행.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPnl {
    /// 달력 월 (`YYYY-MM`)
    pub month: String,
    /// 소형 계약 손익 합
    pub pnl_small: Decimal,
    /// 표준 계약 손익 합
    pub pnl_standard: Decimal,
}

/// 백테스트 집계 통계.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestStats {
    /// 거래 횟수 (최종 시그널이 NONE이 아닌 행)
    pub trades: usize,
    /// 승리 횟수 (소형 계약 손익 > 0)
    pub wins: usize,
    /// 패배 횟수 (소형 계약 손익 < 0)
    pub losses: usize,
    /// 승률 % (소수 둘째 자리 반올림, 거래 0회면 0)
    pub win_rate_pct: f64,
}

// =============================================================================
// 리포트
// =============================================================================

/// 백테스트 실행 리포트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// 설정 정보
    pub config: BacktestConfig,

    /// 월별 손익 집계 (시간순)
    pub monthly: Vec<MonthlyPnl>,

    /// 집계 통계
    pub stats: BacktestStats,

    /// 행 단위 데이터셋 (모든 파생 컬럼 유지)
    pub rows: Vec<SignalRow>,
}

impl BacktestReport {
    /// 전체 소형 계약 손익.
    pub fn total_pnl_small(&self) -> Decimal {
        self.rows.iter().map(|r| r.pnl_small).sum()
    }

    /// 전체 표준 계약 손익.
    pub fn total_pnl_standard(&self) -> Decimal {
        self.rows.iter().map(|r| r.pnl_standard).sum()
    }

    /// 요약 문자열 반환
    pub fn summary(&self) -> String {
        let (start, end) = match (self.rows.first(), self.rows.last()) {
            (Some(f), Some(l)) => (f.date.to_string(), l.date.to_string()),
            _ => ("-".to_string(), "-".to_string()),
        };

        format!(
            "백테스트 결과 요약\n\
             ═══════════════════════════════════════\n\
             기간: {} → {}\n\
             정렬된 거래일: {}\n\
             ───────────────────────────────────────\n\
             거래: {} (승 {} / 패 {})\n\
             승률: {:.2}%\n\
             ───────────────────────────────────────\n\
             소형 계약 손익: {:.2}\n\
             표준 계약 손익: {:.2}\n\
             집계 월 수: {}\n\
             ═══════════════════════════════════════",
            start,
            end,
            self.rows.len(),
            self.stats.trades,
            self.stats.wins,
            self.stats.losses,
            self.stats.win_rate_pct,
            self.total_pnl_small(),
            self.total_pnl_standard(),
            self.monthly.len(),
        )
    }
}

// =============================================================================
// 엔진
// =============================================================================

/// 백테스팅 엔진
///
/// 두 일봉 시계열에 대한 순수 함수로 동작합니다. 실행 간 공유되는
/// 가변 상태가 없으므로 같은 입력은 항상 같은 리포트를 만듭니다.
#[derive(Debug, Clone, Default)]
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// 새로운 백테스트 엔진을 생성합니다.
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// 설정 조회
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// 원시 레코드를 정규화한 뒤 백테스트 실행.
    ///
    /// # Errors
    ///
    /// - `BacktestError::Data(DataError::Schema)`: 필수 컬럼 누락
    /// - 그 외는 [`BacktestEngine::run`]과 동일
    pub fn run_raw(
        &self,
        proxy: &[RawDailyRecord],
        vol: &[RawDailyRecord],
    ) -> BacktestResult<BacktestReport> {
        let proxy = normalize_series(proxy)?;
        let vol = normalize_series(vol)?;
        self.run(&proxy, &vol)
    }

    /// 백테스트 실행.
    ///
    /// # Errors
    ///
    /// - `BacktestError::Config`: 설정 검증 실패
    /// - `BacktestError::Data`: 입력 시리즈가 비어있거나 날짜 교집합 없음
    pub fn run(&self, proxy: &[DailyBar], vol: &[DailyBar]) -> BacktestResult<BacktestReport> {
        self.config.validate()?;

        if proxy.is_empty() {
            return Err(DataError::unavailable("프록시 시리즈가 비어있습니다").into());
        }
        if vol.is_empty() {
            return Err(DataError::unavailable("변동성 시리즈가 비어있습니다").into());
        }

        let aligned = align_series(proxy, vol);
        if aligned.is_empty() {
            return Err(DataError::unavailable("두 시리즈의 날짜 교집합이 없습니다").into());
        }

        let mut atr_calc = AtrCalculator::new(self.config.atr_period);
        let mut rows = Vec::with_capacity(aligned.len());
        let mut monthly: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
        let mut trades = 0usize;
        let mut wins = 0usize;
        let mut losses = 0usize;

        for aligned_row in &aligned {
            let row = self.build_row(aligned_row, &mut atr_calc);

            // 달력 월 단위 집계: 거래가 없는 행도 소속 월을 0 기여로 남긴다
            let key = (row.date.year(), row.date.month());
            let entry = monthly.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += row.pnl_small;
            entry.1 += row.pnl_standard;

            if row.signal.is_active() {
                trades += 1;
                if row.pnl_small > Decimal::ZERO {
                    wins += 1;
                } else if row.pnl_small < Decimal::ZERO {
                    losses += 1;
                }
            } else if row.raw_signal.is_active() {
                debug!(
                    date = %row.date,
                    raw_signal = %row.raw_signal,
                    valid_move = row.valid_move,
                    atr_ok = row.atr_ok,
                    regime = ?row.regime,
                    "필터에 의해 시그널 제외"
                );
            }

            rows.push(row);
        }

        let win_rate_pct = if trades == 0 {
            0.0
        } else {
            (wins as f64 / trades as f64 * 100.0 * 100.0).round() / 100.0
        };

        let monthly = monthly
            .into_iter()
            .map(|((year, month), (pnl_small, pnl_standard))| MonthlyPnl {
                month: format!("{year:04}-{month:02}"),
                pnl_small,
                pnl_standard,
            })
            .collect();

        Ok(BacktestReport {
            config: self.config.clone(),
            monthly,
            stats: BacktestStats {
                trades,
                wins,
                losses,
                win_rate_pct,
            },
            rows,
        })
    }

    /// 정렬된 행 하나에 대한 모든 파생 컬럼 계산.
    fn build_row(&self, aligned: &esvix_core::AlignedRow, atr_calc: &mut AtrCalculator) -> SignalRow {
        let proxy = &aligned.proxy;
        let vol = &aligned.vol;

        let es_move = proxy.close - proxy.open;
        let vix_move = vol.close - vol.open;
        let es_dir = esvix_core::sign(es_move);
        let vix_dir = esvix_core::sign(vix_move);

        let raw_signal =
            self.config
                .divergence_rule
                .evaluate(proxy.open, proxy.close, vol.open, vol.close);

        // ATR은 프록시 다리에서만 계산
        let atr = atr_calc.update(proxy);
        let atr_ok = atr.is_some_and(|a| a >= self.config.min_atr);

        let regime = VolRegime::classify(vol.close);
        let valid_move = es_move.abs() >= self.config.min_move;
        let vol_boost = vix_move.abs() > self.config.vol_boost_threshold;

        // 네 조건의 논리곱: 하나라도 실패하면 NONE
        let signal = if raw_signal.is_active() && valid_move && atr_ok && regime.is_tradeable() {
            raw_signal
        } else {
            SignalKind::None
        };

        let size_mult_vol = if vol_boost { dec!(2) } else { Decimal::ONE };
        let size_multiplier = size_mult_vol * regime.multiplier();

        let (pnl_small, pnl_standard) = if signal.is_active() {
            let points = es_move * Decimal::from(signal.direction());
            (
                self.config.small.dollars(points, size_multiplier),
                self.config.standard.dollars(points, size_multiplier),
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        SignalRow {
            date: aligned.date,
            proxy: proxy.clone(),
            vol: vol.clone(),
            es_move,
            vix_move,
            es_dir,
            vix_dir,
            raw_signal,
            regime,
            atr,
            atr_ok,
            valid_move,
            vol_boost,
            signal,
            size_multiplier,
            pnl_small,
            pnl_standard,
        }
    }
}

// =============================================================================
// 테스트
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 워밍업 구간용 무해한 바: 다이버전스 없음, 레인지는 ATR을 채움.
    fn warmup_proxy_bar(day: u32) -> DailyBar {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        // 시가 = 종가 → 무브 0, TR = 25
        DailyBar::new(date, dec!(4500), dec!(4515), dec!(4490), dec!(4500))
    }

    fn warmup_vol_bar(day: u32) -> DailyBar {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        DailyBar::new(date, dec!(20), dec!(21), dec!(19), dec!(20))
    }

    /// 워밍업 14행 + 다이버전스 1행으로 구성한 픽스처.
    fn divergence_fixture() -> (Vec<DailyBar>, Vec<DailyBar>) {
        let mut proxy: Vec<DailyBar> = (1..=14).map(warmup_proxy_bar).collect();
        let mut vol: Vec<DailyBar> = (1..=14).map(warmup_vol_bar).collect();

        // 15일: SPY +12, VIX -3 → LONG, 무브/ATR/레짐 모두 통과
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        proxy.push(DailyBar::new(date, dec!(4500), dec!(4520), dec!(4495), dec!(4512)));
        vol.push(DailyBar::new(date, dec!(23), dec!(23.5), dec!(19.5), dec!(20)));

        (proxy, vol)
    }

    #[test]
    fn test_config_validation() {
        assert!(BacktestConfig::default().validate().is_ok());

        let config = BacktestConfig::default().with_atr_period(0);
        assert!(matches!(
            BacktestEngine::new(config).run(&[], &[]),
            Err(BacktestError::Config(_))
        ));
    }

    #[test]
    fn test_empty_input_is_data_error() {
        let engine = BacktestEngine::default();
        let bar = warmup_proxy_bar(1);

        let result = engine.run(&[], &[bar.clone()]);
        assert!(matches!(
            result,
            Err(BacktestError::Data(DataError::Unavailable(_)))
        ));

        let result = engine.run(&[bar], &[]);
        assert!(matches!(result, Err(BacktestError::Data(_))));
    }

    #[test]
    fn test_no_date_overlap_is_data_error() {
        let engine = BacktestEngine::default();
        let proxy = vec![warmup_proxy_bar(1)];
        let vol = vec![warmup_vol_bar(2)];

        assert!(matches!(
            engine.run(&proxy, &vol),
            Err(BacktestError::Data(DataError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_divergence_long_with_boost() {
        let (proxy, vol) = divergence_fixture();
        let report = BacktestEngine::default().run(&proxy, &vol).unwrap();

        assert_eq!(report.stats.trades, 1);
        assert_eq!(report.stats.wins, 1);
        assert_eq!(report.stats.win_rate_pct, 100.0);

        let row = report.rows.last().unwrap();
        assert_eq!(row.raw_signal, SignalKind::Long);
        assert_eq!(row.signal, SignalKind::Long);
        assert_eq!(row.es_move, dec!(12));
        assert_eq!(row.vix_move, dec!(-3));
        assert!(row.vol_boost);
        assert_eq!(row.regime, VolRegime::Full);
        // 부스트 2 × Full 1
        assert_eq!(row.size_multiplier, dec!(2));

        // points 12 → 48틱: 소형 48*1.25*(2*2) - 1 = 239
        assert_eq!(row.pnl_small, dec!(239));
        // 표준 48*12.5*(2*2) - 8.6 = 2391.4
        assert_eq!(row.pnl_standard, dec!(2391.4));
    }

    #[test]
    fn test_atr_warmup_rows_never_trade() {
        let (proxy, vol) = divergence_fixture();
        let report = BacktestEngine::default().run(&proxy, &vol).unwrap();

        // 처음 13행은 ATR이 없으므로 atr_ok = false
        for row in &report.rows[..13] {
            assert!(row.atr.is_none());
            assert!(!row.atr_ok);
            assert_eq!(row.signal, SignalKind::None);
        }
        assert!(report.rows[13].atr.is_some());
    }

    #[test]
    fn test_monthly_aggregation_groups_by_calendar_month() {
        let (mut proxy, mut vol) = divergence_fixture();

        // 4월에 SHORT 거래 하나 추가: SPY -11, VIX +2.5
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        proxy.push(DailyBar::new(date, dec!(4512), dec!(4515), dec!(4490), dec!(4501)));
        vol.push(DailyBar::new(date, dec!(20), dec!(23), dec!(19.8), dec!(22.5)));

        let report = BacktestEngine::default().run(&proxy, &vol).unwrap();
        assert_eq!(report.stats.trades, 2);
        assert_eq!(report.monthly.len(), 2);
        assert_eq!(report.monthly[0].month, "2024-03");
        assert_eq!(report.monthly[1].month, "2024-04");

        // 3월 = LONG 거래 손익
        assert_eq!(report.monthly[0].pnl_small, dec!(239));
    }

    #[test]
    fn test_zero_trades_win_rate_is_zero() {
        // 다이버전스가 전혀 없는 시리즈
        let proxy: Vec<DailyBar> = (1..=20).map(warmup_proxy_bar).collect();
        let vol: Vec<DailyBar> = (1..=20).map(warmup_vol_bar).collect();

        let report = BacktestEngine::default().run(&proxy, &vol).unwrap();
        assert_eq!(report.stats.trades, 0);
        assert_eq!(report.stats.win_rate_pct, 0.0);

        // 거래가 없어도 데이터셋의 달력 월은 0 기여로 남는다
        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.monthly[0].month, "2024-03");
        assert_eq!(report.monthly[0].pnl_small, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_keeps_zero_trade_months() {
        // 3월에는 거래 하나, 4월은 다이버전스 없는 행만 있는 시리즈
        let (mut proxy, mut vol) = divergence_fixture();
        for day in 1..=5 {
            let date = NaiveDate::from_ymd_opt(2024, 4, day).unwrap();
            proxy.push(DailyBar::new(date, dec!(4512), dec!(4527), dec!(4502), dec!(4512)));
            vol.push(DailyBar::new(date, dec!(20), dec!(21), dec!(19), dec!(20)));
        }

        let report = BacktestEngine::default().run(&proxy, &vol).unwrap();
        assert_eq!(report.stats.trades, 1);

        let months: Vec<&str> = report.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-03", "2024-04"]);
        assert_eq!(report.monthly[0].pnl_small, dec!(239));
        assert_eq!(report.monthly[1].pnl_small, Decimal::ZERO);
        assert_eq!(report.monthly[1].pnl_standard, Decimal::ZERO);
    }

    #[test]
    fn test_run_raw_surfaces_schema_error() {
        let record = RawDailyRecord {
            date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            open: Some("4500".to_string()),
            // Close 누락
            ..Default::default()
        };

        let engine = BacktestEngine::default();
        let result = engine.run_raw(&[record.clone()], &[record]);
        assert!(matches!(
            result,
            Err(BacktestError::Data(DataError::Schema { .. }))
        ));
    }

    #[test]
    fn test_report_summary_renders() {
        let (proxy, vol) = divergence_fixture();
        let report = BacktestEngine::default().run(&proxy, &vol).unwrap();
        let summary = report.summary();
        assert!(summary.contains("승률"));
        assert!(summary.contains("100.00%"));
    }
}
