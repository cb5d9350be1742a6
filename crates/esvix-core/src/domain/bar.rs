//! OHLC(V) 바 타입과 원시 레코드 정규화.
//!
//! 업스트림 소스(CSV 파일, 시세 API 응답)는 숫자를 `"4,501.25"` 같은
//! 천 단위 구분자가 포함된 텍스트로 전달할 수 있습니다.
//! [`RawDailyRecord`]는 이런 느슨한 형태를 받아 [`DailyBar`]로
//! 정규화하며, 필수 컬럼(Date/Open/Close)이 없으면
//! [`DataError::Schema`]를 반환합니다.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

// =============================================================================
// 일봉 바
// =============================================================================

/// 일봉 OHLC(V) 바.
///
/// 백테스트 모드에서 사용합니다. 시각 정보 없이 달력 날짜로만 정렬됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    /// 달력 날짜
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량 (일부 소스에서 미제공)
    pub volume: Option<Decimal>,
}

impl DailyBar {
    /// 새 일봉 바 생성.
    pub fn new(date: NaiveDate, open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// 거래량 설정.
    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume = Some(volume);
        self
    }

    /// 당일 시가 대비 종가 변화.
    pub fn intrabar_move(&self) -> Decimal {
        self.close - self.open
    }
}

// =============================================================================
// 인트라데이 바
// =============================================================================

/// 인트라데이 OHLC(V) 바.
///
/// 실시간 시그널 모드에서 사용합니다. 일봉과 달리 타임스탬프로 정렬됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntradayBar {
    /// 바 타임스탬프
    pub timestamp: DateTime<Utc>,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량 (일부 소스에서 미제공)
    pub volume: Option<Decimal>,
}

impl IntradayBar {
    /// 새 인트라데이 바 생성.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }
}

// =============================================================================
// 원시 레코드 정규화
// =============================================================================

/// 정규화 전의 원시 일봉 레코드.
///
/// 모든 가격 필드는 텍스트이며 천 단위 구분자를 포함할 수 있습니다.
/// High/Low가 없으면 Open/Close의 포락선으로 대체합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDailyRecord {
    /// 날짜 (필수)
    pub date: Option<NaiveDate>,
    /// 시가 (필수)
    pub open: Option<String>,
    /// 고가
    pub high: Option<String>,
    /// 저가
    pub low: Option<String>,
    /// 종가 (필수)
    pub close: Option<String>,
    /// 거래량
    pub volume: Option<String>,
}

impl RawDailyRecord {
    /// 원시 레코드를 [`DailyBar`]로 정규화.
    ///
    /// # Errors
    ///
    /// - `DataError::Schema`: Date/Open/Close가 없거나 숫자로 해석 불가
    pub fn normalize(&self) -> Result<DailyBar, DataError> {
        let date = self.date.ok_or_else(|| DataError::schema("Date"))?;
        let open = parse_price(self.open.as_deref(), "Open")?;
        let close = parse_price(self.close.as_deref(), "Close")?;

        // High/Low 미제공 시 Open/Close 포락선으로 대체
        let high = match self.high.as_deref() {
            Some(raw) => parse_price(Some(raw), "High")?,
            None => open.max(close),
        };
        let low = match self.low.as_deref() {
            Some(raw) => parse_price(Some(raw), "Low")?,
            None => open.min(close),
        };

        // 거래량은 선택 필드: 해석 불가 시 버림
        let volume = self
            .volume
            .as_deref()
            .and_then(|raw| Decimal::from_str(&strip_separators(raw)).ok());

        Ok(DailyBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// 원시 레코드 시퀀스를 일괄 정규화.
///
/// # Errors
///
/// - `DataError::Unavailable`: 레코드가 하나도 없음
/// - `DataError::Schema`: 어느 레코드든 필수 컬럼 누락
pub fn normalize_series(records: &[RawDailyRecord]) -> Result<Vec<DailyBar>, DataError> {
    if records.is_empty() {
        return Err(DataError::unavailable("정규화할 레코드가 없습니다"));
    }

    records.iter().map(RawDailyRecord::normalize).collect()
}

/// 천 단위 구분자, 따옴표, 공백 제거.
fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ',' | '"' | ' '))
        .collect()
}

/// 가격 필드 파싱. 필수 컬럼이 없거나 해석 불가하면 스키마 오류.
fn parse_price(raw: Option<&str>, column: &str) -> Result<Decimal, DataError> {
    let raw = raw.ok_or_else(|| DataError::schema(column))?;
    let cleaned = strip_separators(raw);
    if cleaned.is_empty() {
        return Err(DataError::schema(column));
    }
    Decimal::from_str(&cleaned).map_err(|_| DataError::schema(column))
}

// =============================================================================
// 테스트
// =============================================================================
