//! 시장 데이터 제공자 추상화.
//!
//! 업스트림 시세 소스로부터 일봉/인트라데이 OHLC 바를 조회하기 위한
//! 소스 중립적인 인터페이스입니다. 재시도/백오프는 제공자 구현체의
//! 책임이며, 코어는 호출이 완전한 시리즈를 반환하거나 실패하는 것만
//! 가정합니다.

mod mock;

pub use mock::MockMarketDataProvider;

use async_trait::async_trait;
use chrono::NaiveDate;
use esvix_core::{DailyBar, IntradayBar};
use thiserror::Error;

// =============================================================================
// 에러 타입
// =============================================================================

/// MarketDataProvider 에러.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// API 에러
    #[error("API 에러: {0}")]
    Api(String),

    /// 응답 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 요청 범위에 데이터 없음
    #[error("데이터 없음: {0}")]
    Unavailable(String),
}

// =============================================================================
// MarketDataProvider Trait
// =============================================================================

/// 시장 데이터 제공자 trait.
///
/// 실시간 모드는 최근 인트라데이 바를, 백테스트 모드는 기간 내 일봉을
/// 조회합니다. 반환되는 바는 최소한 날짜/타임스탬프, 시가, 종가가
/// 채워져 있어야 하며 고가/저가/거래량은 선택입니다.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct PolygonProvider {
///     client: reqwest::Client,
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for PolygonProvider {
///     async fn get_daily_series(
///         &self,
///         symbol: &str,
///         start: NaiveDate,
///         end: NaiveDate,
///     ) -> Result<Vec<DailyBar>, ProviderError> {
///         // REST 호출 및 변환
///     }
///
///     // ... 나머지 메서드 구현
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 기간 내 일봉 시리즈 조회.
    ///
    /// # Arguments
    ///
    /// * `symbol` - 조회할 심볼 (예: "SPY", "VIX")
    /// * `start` / `end` - 조회 기간 (양 끝 포함)
    ///
    /// # Returns
    ///
    /// 날짜 오름차순의 일봉 목록.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Network`: 네트워크 연결 실패
    /// - `ProviderError::Api`: 업스트림 API 에러
    /// - `ProviderError::Unavailable`: 기간 내 데이터 없음
    async fn get_daily_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, ProviderError>;

    /// 최근 인트라데이 바 조회.
    ///
    /// # Arguments
    ///
    /// * `symbol` - 조회할 심볼
    /// * `count` - 최신 바 개수 (실시간 시그널은 2개면 충분)
    ///
    /// # Returns
    ///
    /// 타임스탬프 오름차순의 인트라데이 바 목록.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Network`: 네트워크 연결 실패
    /// - `ProviderError::Unavailable`: 데이터 없음
    async fn get_recent_intraday_bars(
        &self,
        symbol: &str,
        count: usize,
    ) -> Result<Vec<IntradayBar>, ProviderError>;

    /// 데이터 제공자 이름 반환.
    ///
    /// 로깅 및 진단 목적으로 사용됩니다.
    fn provider_name(&self) -> &str;
}

// =============================================================================
// 테스트
// =============================================================================
