//! Mock 시장 데이터 제공자.
//!
//! 업스트림 API 없이 결정적인 합성 시세를 생성하는 가상 제공자입니다.
//! 테스트와 CLI 데모 경로에서 사용합니다.
//!
//! # 결정성
//!
//! 시드 기반 랜덤워크를 사용하므로 같은 시드에서는 항상 같은 시리즈가
//! 생성됩니다. 실패 주입 플래그로 제공자 장애 시나리오를 재현할 수
//! 있습니다.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use esvix_core::{DailyBar, IntradayBar};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::{MarketDataProvider, ProviderError};

/// Mock 시장 데이터 제공자.
#[derive(Debug, Clone)]
pub struct MockMarketDataProvider {
    /// 랜덤워크 시드
    seed: u64,
    /// true면 모든 조회가 Unavailable로 실패
    should_fail: bool,
}

impl Default for MockMarketDataProvider {
    fn default() -> Self {
        Self {
            seed: 42,
            should_fail: false,
        }
    }
}

impl MockMarketDataProvider {
    /// 지정한 시드로 생성.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            should_fail: false,
        }
    }

    /// 실패 주입 제공자 생성.
    pub fn failing() -> Self {
        Self {
            seed: 0,
            should_fail: true,
        }
    }

    /// 심볼별 시작가. SPY류 프록시는 지수대, VIX류는 변동성대.
    fn base_price(symbol: &str) -> (Decimal, Decimal) {
        if symbol.to_uppercase().contains("VIX") {
            // (시작가, 스텝 크기)
            (dec!(18), dec!(0.6))
        } else {
            (dec!(450), dec!(12))
        }
    }

    /// 심볼+시드로부터 독립 RNG 구성. 호출 간 상태를 공유하지 않습니다.
    /// 위치 가중 해시라서 애너그램 심볼도 서로 다른 스트림을 받습니다.
    fn rng_for(&self, symbol: &str) -> StdRng {
        let sym_hash = symbol
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        StdRng::seed_from_u64(self.seed ^ sym_hash.wrapping_mul(0x9e37_79b9))
    }

    fn random_walk_bar(rng: &mut StdRng, price: &mut Decimal, step: Decimal) -> (Decimal, Decimal, Decimal, Decimal) {
        let open = *price;
        let drift = Decimal::try_from(rng.gen_range(-1.0..1.0)).unwrap_or(Decimal::ZERO);
        let close = (open + drift * step).max(dec!(0.01));
        let high = open.max(close) + step * dec!(0.2);
        let low = (open.min(close) - step * dec!(0.2)).max(dec!(0.01));
        *price = close;
        (open, high, low, close)
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn get_daily_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, ProviderError> {
        if self.should_fail {
            return Err(ProviderError::Unavailable(format!(
                "{} 일봉 데이터 없음 (실패 주입)",
                symbol
            )));
        }
        if start > end {
            return Err(ProviderError::Api("시작일이 종료일 이후입니다".to_string()));
        }

        let (mut price, step) = Self::base_price(symbol);
        let mut rng = self.rng_for(symbol);
        let mut bars = Vec::new();
        let mut date = start;

        while date <= end {
            // 주말 제외
            if date.weekday().number_from_monday() <= 5 {
                let (open, high, low, close) = Self::random_walk_bar(&mut rng, &mut price, step);
                bars.push(
                    DailyBar::new(date, open, high, low, close).with_volume(dec!(1_000_000)),
                );
            }
            date = date.succ_opt().ok_or_else(|| {
                ProviderError::Api("날짜 범위를 벗어났습니다".to_string())
            })?;
        }

        debug!(symbol, count = bars.len(), "mock 일봉 시리즈 생성");
        Ok(bars)
    }

    async fn get_recent_intraday_bars(
        &self,
        symbol: &str,
        count: usize,
    ) -> Result<Vec<IntradayBar>, ProviderError> {
        if self.should_fail {
            return Err(ProviderError::Unavailable(format!(
                "{} 인트라데이 데이터 없음 (실패 주입)",
                symbol
            )));
        }

        let (mut price, step) = Self::base_price(symbol);
        let mut rng = self.rng_for(symbol);
        // 고정 기준 시각: 결정성 유지를 위해 벽시계를 쓰지 않음
        let base = Utc.with_ymd_and_hms(2026, 8, 24, 14, 30, 0).unwrap();

        let bars = (0..count)
            .map(|i| {
                let (open, high, low, close) = Self::random_walk_bar(&mut rng, &mut price, step);
                IntradayBar::new(base + chrono::Duration::minutes(i as i64), open, high, low, close)
            })
            .collect();

        Ok(bars)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

// =============================================================================
// 테스트
// =============================================================================
