//! 프록시/변동성 시계열의 날짜 기준 정렬.
//!
//! 두 일봉 시계열을 날짜로 inner join 합니다. 결과는 두 시리즈의 날짜
//! 교집합이며, 오름차순으로 정렬되고 중복이 없습니다. 한쪽에만 존재하는
//! 날짜는 결과에 나타나지 않습니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bar::DailyBar;

/// 같은 날짜의 프록시 바와 변동성 바 한 쌍.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    /// 달력 날짜
    pub date: NaiveDate,
    /// 지수 프록시(SPY) 바
    pub proxy: DailyBar,
    /// 변동성 지수(VIX) 바
    pub vol: DailyBar,
}

/// 두 일봉 시계열을 날짜로 inner join.
///
/// 입력 순서와 무관하게 결과는 날짜 오름차순입니다.
/// 한 시리즈 안에 같은 날짜가 중복되면 첫 바만 유지합니다.
pub fn align_series(proxy: &[DailyBar], vol: &[DailyBar]) -> Vec<AlignedRow> {
    let mut proxy_by_date: BTreeMap<NaiveDate, &DailyBar> = BTreeMap::new();
    for bar in proxy {
        proxy_by_date.entry(bar.date).or_insert(bar);
    }

    let mut vol_by_date: BTreeMap<NaiveDate, &DailyBar> = BTreeMap::new();
    for bar in vol {
        vol_by_date.entry(bar.date).or_insert(bar);
    }

    proxy_by_date
        .into_iter()
        .filter_map(|(date, p)| {
            vol_by_date.get(&date).map(|v| AlignedRow {
                date,
                proxy: p.clone(),
                vol: (*v).clone(),
            })
        })
        .collect()
}

// =============================================================================
// 테스트
// =============================================================================
