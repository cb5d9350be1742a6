//! CSV 일봉 로더와 트레이드 로그 내보내기.
//!
//! 로더는 헤더 행(`Date,Open,High,Low,Close[,Volume]`, 순서 무관)을
//! 해석하고 각 행을 [`RawDailyRecord`]로 만든 뒤 코어 정규화를 거칩니다.
//! 따옴표로 감싼 필드와 천 단위 구분자(`"4,501.25"`)를 허용합니다.
//!
//! 트레이드 로그 출력 컬럼 순서는 `Date,Side,PnL[,Equity]`로 고정입니다.

use std::{
    fs,
    io::Write,
    path::Path,
};

use chrono::NaiveDate;
use esvix_core::{normalize_series, DailyBar, DataError, RawDailyRecord};
use rust_decimal::Decimal;
use tracing::{debug, info};

// =============================================================================
// 일봉 로더
// =============================================================================

/// CSV 파일에서 일봉 시리즈를 로드.
///
/// # Errors
///
/// - `DataError::Unavailable`: 파일을 열 수 없거나 데이터 행이 없음
/// - `DataError::Schema`: 필수 헤더/컬럼 누락 또는 값 해석 불가
pub fn load_daily_csv(path: impl AsRef<Path>) -> Result<Vec<DailyBar>, DataError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| DataError::unavailable(format!("{} 파일을 열 수 없습니다: {}", path.display(), e)))?;

    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| DataError::unavailable("CSV에 헤더가 없습니다"))?;

    let columns = ColumnMap::from_header(header)?;

    let records: Vec<RawDailyRecord> = lines
        .map(|line| columns.record_from_line(line))
        .collect::<Result<_, _>>()?;

    let bars = normalize_series(&records)?;
    debug!(path = %path.display(), count = bars.len(), "일봉 CSV 로드");
    Ok(bars)
}

/// 헤더에서 찾은 컬럼 인덱스.
struct ColumnMap {
    date: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: Option<usize>,
    volume: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &str) -> Result<Self, DataError> {
        let names = split_csv_line(header);
        let find = |wanted: &str| {
            names
                .iter()
                .position(|n| n.trim().eq_ignore_ascii_case(wanted))
        };

        Ok(Self {
            date: find("date").ok_or_else(|| DataError::schema("Date"))?,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            close: find("close"),
            volume: find("volume"),
        })
    }

    fn record_from_line(&self, line: &str) -> Result<RawDailyRecord, DataError> {
        let fields = split_csv_line(line);
        let get = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| fields.get(i))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let date_raw = fields
            .get(self.date)
            .map(|s| s.trim())
            .ok_or_else(|| DataError::schema("Date"))?;
        let date = parse_date(date_raw)?;

        Ok(RawDailyRecord {
            date: Some(date),
            open: get(self.open),
            high: get(self.high),
            low: get(self.low),
            close: get(self.close),
            volume: get(self.volume),
        })
    }
}

/// 지원 날짜 형식: `YYYY-MM-DD`, `YYYY/MM/DD`.
fn parse_date(raw: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .map_err(|_| DataError::schema("Date"))
}

/// 따옴표를 존중하는 CSV 행 분리.
///
/// `a,"1,234.5",b` → `["a", "1,234.5", "b"]`
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

// =============================================================================
// 트레이드 로그 내보내기
// =============================================================================

/// 내보낼 트레이드 로그 행.
#[derive(Debug, Clone)]
pub struct TradeLogRow {
    /// 거래 날짜
    pub date: NaiveDate,
    /// 방향 (LONG/SHORT)
    pub side: String,
    /// 손익
    pub pnl: Decimal,
    /// 거래 후 자산 (시뮬레이터 경로에서만 존재)
    pub equity: Option<Decimal>,
}

/// 트레이드 로그를 CSV로 기록.
///
/// 컬럼 순서는 `Date,Side,PnL`이며, 어느 행이든 자산 값이 있으면
/// `Equity` 컬럼이 추가됩니다.
pub fn write_trade_log_csv(
    path: impl AsRef<Path>,
    rows: &[TradeLogRow],
) -> Result<(), std::io::Error> {
    let path = path.as_ref();
    let with_equity = rows.iter().any(|r| r.equity.is_some());

    let mut file = fs::File::create(path)?;
    if with_equity {
        writeln!(file, "Date,Side,PnL,Equity")?;
    } else {
        writeln!(file, "Date,Side,PnL")?;
    }

    for row in rows {
        if with_equity {
            let equity = row
                .equity
                .map(|e| e.to_string())
                .unwrap_or_default();
            writeln!(file, "{},{},{},{}", row.date.format("%Y-%m-%d"), row.side, row.pnl, equity)?;
        } else {
            writeln!(file, "{},{},{}", row.date.format("%Y-%m-%d"), row.side, row.pnl)?;
        }
    }

    info!(path = %path.display(), rows = rows.len(), "트레이드 로그 저장");
    Ok(())
}

// =============================================================================
// 테스트
// =============================================================================

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_split_csv_line_with_quoted_separator() {
        let fields = split_csv_line(r#"2024-01-02,"4,500.25",451"#);
        assert_eq!(fields, vec!["2024-01-02", "4,500.25", "451"]);
    }

    #[test]
    fn test_load_daily_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spy.csv");
        fs::write(
            &path,
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,450.00,452.00,449.00,451.50,1000000\n\
             2024-01-03,\"1,451.50\",453.00,450.00,452.25,900000\n",
        )
        .unwrap();

        let bars = load_daily_csv(&path).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, dec!(451.50));
        assert_eq!(bars[1].open, dec!(1451.50));
    }

    #[test]
    fn test_load_daily_csv_header_order_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vix.csv");
        fs::write(&path, "Close,Date,Open\n16.50,2024-01-02,18.00\n").unwrap();

        let bars = load_daily_csv(&path).unwrap();
        assert_eq!(bars[0].open, dec!(18.00));
        assert_eq!(bars[0].close, dec!(16.50));
        // High/Low 미제공 → Open/Close 포락선
        assert_eq!(bars[0].high, dec!(18.00));
    }

    #[test]
    fn test_load_daily_csv_missing_date_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Open,Close\n450,451\n").unwrap();

        let err = load_daily_csv(&path).unwrap_err();
        assert!(matches!(err, DataError::Schema { ref column } if column == "Date"));
    }

    #[test]
    fn test_load_daily_csv_missing_file_is_unavailable() {
        let err = load_daily_csv("/nonexistent/path.csv").unwrap_err();
        assert!(matches!(err, DataError::Unavailable(_)));
    }

    #[test]
    fn test_write_trade_log_without_equity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");

        let rows = vec![TradeLogRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            side: "LONG".to_string(),
            pnl: dec!(100.50),
            equity: None,
        }];
        write_trade_log_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Date,Side,PnL\n"));
        assert!(content.contains("2024-01-02,LONG,100.50"));
    }

    #[test]
    fn test_write_trade_log_with_equity_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");

        let rows = vec![TradeLogRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            side: "SHORT".to_string(),
            pnl: dec!(-50),
            equity: Some(dec!(10050)),
        }];
        write_trade_log_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Date,Side,PnL,Equity\n"));
        assert!(content.contains("2024-01-02,SHORT,-50,10050"));
    }
}
