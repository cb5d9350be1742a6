//! 다이버전스 시그널 타입과 진입 규칙.
//!
//! 이 시스템에는 서로 다른 두 가지 진입 규칙과 두 가지 실시간 무브 산출
//! 기준이 공존합니다. 이들은 동등한 리팩터링이 아니라 실제로 다른
//! 전략이므로, 암묵적으로 하나를 고르는 대신 명시적인 variant로
//! 노출합니다:
//!
//! - [`DivergenceRule`]: 부호만 보는 규칙 vs 최소 %변동 게이트 규칙
//! - [`MoveBasis`]: 당일 시가→종가 vs 직전 종가→최신 종가

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 방향 부호. 0 무브는 0이며 어떤 시그널도 발생시키지 않습니다.
pub fn sign(x: Decimal) -> i8 {
    if x > Decimal::ZERO {
        1
    } else if x < Decimal::ZERO {
        -1
    } else {
        0
    }
}

// =============================================================================
// 시그널 종류
// =============================================================================

/// 다이버전스 시그널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    /// 지수 상승 + 변동성 하락 (강세 다이버전스)
    Long,
    /// 지수 하락 + 변동성 상승 (약세 다이버전스)
    Short,
    /// 다이버전스 없음
    #[default]
    None,
}

impl SignalKind {
    /// 방향 부호 (+1 Long, -1 Short, 0 None).
    pub fn direction(&self) -> i8 {
        match self {
            Self::Long => 1,
            Self::Short => -1,
            Self::None => 0,
        }
    }

    /// 거래 가능한 시그널인지 여부.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// 두 다리의 방향 부호로부터 시그널 산출.
    ///
    /// Long iff `es_dir == 1 && vix_dir == -1`,
    /// Short iff `es_dir == -1 && vix_dir == 1`, 그 외 None.
    pub fn from_dirs(es_dir: i8, vix_dir: i8) -> Self {
        match (es_dir, vix_dir) {
            (1, -1) => Self::Long,
            (-1, 1) => Self::Short,
            _ => Self::None,
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
            Self::None => "NONE",
        };
        write!(f, "{s}")
    }
}

// =============================================================================
// 진입 규칙
// =============================================================================

/// 다이버전스 진입 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum DivergenceRule {
    /// 부호만 확인: 두 다리가 반대 방향이면 진입
    SignOnly,
    /// 부호 확인에 더해 두 다리 모두 최소 %변동을 넘어야 진입
    PctThreshold {
        /// 최소 %변동 (예: 0.05 = 0.05%)
        min_move_pct: Decimal,
    },
}

impl Default for DivergenceRule {
    fn default() -> Self {
        Self::SignOnly
    }
}

impl DivergenceRule {
    /// 기본 임계값(0.05%)의 %게이트 규칙.
    pub fn pct_threshold() -> Self {
        Self::PctThreshold {
            min_move_pct: dec!(0.05),
        }
    }

    /// 진입 규칙 평가.
    ///
    /// 두 다리의 시가/종가를 받아 시그널을 산출합니다.
    /// 시가가 0인 다리가 있으면 %변동을 정의할 수 없으므로
    /// `PctThreshold` 모드에서는 시그널을 내지 않습니다.
    pub fn evaluate(
        &self,
        proxy_open: Decimal,
        proxy_close: Decimal,
        vol_open: Decimal,
        vol_close: Decimal,
    ) -> SignalKind {
        let es_move = proxy_close - proxy_open;
        let vix_move = vol_close - vol_open;
        let raw = SignalKind::from_dirs(sign(es_move), sign(vix_move));

        match self {
            Self::SignOnly => raw,
            Self::PctThreshold { min_move_pct } => {
                if !raw.is_active() {
                    return SignalKind::None;
                }
                if proxy_open.is_zero() || vol_open.is_zero() {
                    return SignalKind::None;
                }

                let es_pct = (es_move / proxy_open * dec!(100)).abs();
                let vix_pct = (vix_move / vol_open * dec!(100)).abs();

                if es_pct > *min_move_pct && vix_pct > *min_move_pct {
                    raw
                } else {
                    SignalKind::None
                }
            }
        }
    }

    /// CLI 인자 파싱 (`sign-only`, `pct-threshold`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sign-only" | "sign_only" | "sign" => Some(Self::SignOnly),
            "pct-threshold" | "pct_threshold" | "pct" => Some(Self::pct_threshold()),
            _ => None,
        }
    }
}

// =============================================================================
// 실시간 무브 산출 기준
// =============================================================================

/// 실시간 시그널의 무브 산출 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MoveBasis {
    /// 최신 바 하나의 시가→종가
    #[default]
    Intrabar,
    /// 직전 바 종가→최신 바 종가
    CloseToClose,
}

impl MoveBasis {
    /// CLI 인자 파싱 (`intrabar`, `close-to-close`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "intrabar" | "open-close" => Some(Self::Intrabar),
            "close-to-close" | "close_to_close" | "c2c" => Some(Self::CloseToClose),
            _ => None,
        }
    }
}

// =============================================================================
// 테스트
// =============================================================================

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(sign(dec!(1.5)), 1);
        assert_eq!(sign(dec!(-0.01)), -1);
        assert_eq!(sign(Decimal::ZERO), 0);
    }

    #[test]
    fn test_signal_from_dirs() {
        assert_eq!(SignalKind::from_dirs(1, -1), SignalKind::Long);
        assert_eq!(SignalKind::from_dirs(-1, 1), SignalKind::Short);
        assert_eq!(SignalKind::from_dirs(1, 1), SignalKind::None);
        assert_eq!(SignalKind::from_dirs(-1, -1), SignalKind::None);
        // 0 무브는 어느 쪽이든 시그널을 내지 않음
        assert_eq!(SignalKind::from_dirs(0, -1), SignalKind::None);
        assert_eq!(SignalKind::from_dirs(1, 0), SignalKind::None);
    }

    #[test]
    fn test_sign_only_rule_concrete_scenario() {
        // SPY 450.00 → 451.50 (+1.5), VIX 18.00 → 16.50 (-1.5)
        let signal = DivergenceRule::SignOnly.evaluate(
            dec!(450.00),
            dec!(451.50),
            dec!(18.00),
            dec!(16.50),
        );
        assert_eq!(signal, SignalKind::Long);
    }

    #[test]
    fn test_pct_threshold_gates_small_moves() {
        let rule = DivergenceRule::pct_threshold();

        // SPY +0.01% / VIX -5%: 프록시 다리가 게이트 미달
        let signal = rule.evaluate(dec!(450.00), dec!(450.045), dec!(18.00), dec!(17.10));
        assert_eq!(signal, SignalKind::None);

        // 양 다리 모두 게이트 통과
        let signal = rule.evaluate(dec!(450.00), dec!(451.50), dec!(18.00), dec!(16.50));
        assert_eq!(signal, SignalKind::Long);
    }

    #[test]
    fn test_pct_threshold_zero_open_never_signals() {
        let rule = DivergenceRule::pct_threshold();
        let signal = rule.evaluate(Decimal::ZERO, dec!(1), dec!(18), dec!(17));
        assert_eq!(signal, SignalKind::None);
    }

    #[test]
    fn test_rule_parse() {
        assert_eq!(DivergenceRule::parse("sign-only"), Some(DivergenceRule::SignOnly));
        assert!(matches!(
            DivergenceRule::parse("pct-threshold"),
            Some(DivergenceRule::PctThreshold { .. })
        ));
        assert_eq!(DivergenceRule::parse("unknown"), None);
    }

    #[test]
    fn test_move_basis_parse() {
        assert_eq!(MoveBasis::parse("intrabar"), Some(MoveBasis::Intrabar));
        assert_eq!(MoveBasis::parse("close-to-close"), Some(MoveBasis::CloseToClose));
        assert_eq!(MoveBasis::parse("bogus"), None);
    }
}
