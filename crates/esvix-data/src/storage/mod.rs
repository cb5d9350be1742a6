//! 로컬 파일 저장소.

mod csv;

pub use csv::{load_daily_csv, write_trade_log_csv, TradeLogRow};
