//! 변동성 레짐 분류.
//!
//! VIX 종가 수준을 거래 강도 밴드로 분류합니다. 극단 레벨(공포 또는
//! 무기력 구간)에서는 거래를 건너뛰고, 경계 밴드에서는 포지션을 절반으로
//! 줄입니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 변동성 레짐.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolRegime {
    /// 거래 금지: VIX < 10 또는 > 35
    Skip,
    /// 절반 사이즈: VIX [10, 12) 또는 (30, 35]
    Half,
    /// 정상 사이즈: VIX [12, 30]
    Full,
}

impl VolRegime {
    /// VIX 종가로부터 레짐 분류.
    pub fn classify(vol_close: Decimal) -> Self {
        if vol_close < dec!(10) || vol_close > dec!(35) {
            Self::Skip
        } else if vol_close < dec!(12) || vol_close > dec!(30) {
            Self::Half
        } else {
            Self::Full
        }
    }

    /// 포지션 사이즈 배수 (Skip 0, Half 0.5, Full 1).
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Skip => Decimal::ZERO,
            Self::Half => dec!(0.5),
            Self::Full => Decimal::ONE,
        }
    }

    /// 거래 가능 레짐인지 여부.
    pub fn is_tradeable(&self) -> bool {
        !matches!(self, Self::Skip)
    }
}
