//! 변동성 컨텍스트 지표.
//!
//! ATR은 전체 시리즈 재계산 대신 고정 크기(period)의 트레일링 윈도우
//! 하나로 증분 계산합니다. 윈도우가 차기 전(처음 period-1개 행)에는
//! 값이 없으며, 해당 행들은 ATR 필터를 통과하지 못합니다.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::domain::DailyBar;

/// True Range.
///
/// `max(high-low, |high-prev_close|, |low-prev_close|)`.
/// 직전 종가가 없는 첫 바는 `high-low`를 사용합니다.
pub fn true_range(bar: &DailyBar, prev_close: Option<Decimal>) -> Decimal {
    let hl = bar.high - bar.low;
    match prev_close {
        Some(pc) => hl.max((bar.high - pc).abs()).max((bar.low - pc).abs()),
        None => hl,
    }
}

/// 증분 ATR 계산기 (True Range의 단순이동평균).
#[derive(Debug, Clone)]
pub struct AtrCalculator {
    period: usize,
    window: VecDeque<Decimal>,
    prev_close: Option<Decimal>,
}

impl AtrCalculator {
    /// 새 계산기 생성. `period`는 1 이상이어야 합니다.
    pub fn new(period: usize) -> Self {
        debug_assert!(period >= 1);
        Self {
            period,
            window: VecDeque::with_capacity(period),
            prev_close: None,
        }
    }

    /// 바 하나를 반영하고, 윈도우가 차 있으면 현재 ATR을 반환.
    pub fn update(&mut self, bar: &DailyBar) -> Option<Decimal> {
        let tr = true_range(bar, self.prev_close);
        self.prev_close = Some(bar.close);

        if self.window.len() == self.period {
            self.window.pop_front();
        }
        self.window.push_back(tr);

        if self.window.len() < self.period {
            return None;
        }

        let sum: Decimal = self.window.iter().copied().sum();
        Some(sum / Decimal::from(self.period as u64))
    }
}

// =============================================================================
// 테스트
// =============================================================================
