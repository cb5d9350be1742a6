//! 도메인 타입 모듈.

mod aligned;
mod bar;
mod regime;
mod signal;

pub use aligned::{align_series, AlignedRow};
pub use bar::{normalize_series, DailyBar, IntradayBar, RawDailyRecord};
pub use regime::VolRegime;
pub use signal::{sign, DivergenceRule, MoveBasis, SignalKind};
