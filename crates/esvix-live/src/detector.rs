//! 라이브 다이버전스 탐지기.
//!
//! 가장 최신의 인트라데이 바들로 단일 스냅샷 시그널을 계산합니다.
//! 내부 상태가 없으므로 호출할 때마다 공급된 최신 바에서 다시
//! 유도합니다.

use esvix_core::{sign, DataError, IntradayBar, MoveBasis, SignalKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 라이브 스냅샷 시그널.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSignal {
    /// 다이버전스 시그널
    pub signal: SignalKind,
    /// 프록시 무브
    pub es_move: Decimal,
    /// 변동성 무브
    pub vix_move: Decimal,
    /// 프록시 최신 종가
    pub proxy_close: Decimal,
    /// 변동성 최신 종가
    pub vol_close: Decimal,
}

/// 라이브 다이버전스 탐지기
///
/// 무브 기준([`MoveBasis`])만 설정으로 받으며, 시그널 규칙은 부호
/// 다이버전스입니다. 두 다리에 같은 기준을 일관되게 적용합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveDivergenceDetector {
    basis: MoveBasis,
}

impl LiveDivergenceDetector {
    /// 새로운 탐지기를 생성합니다.
    pub fn new(basis: MoveBasis) -> Self {
        Self { basis }
    }

    /// 무브 기준 조회
    pub fn basis(&self) -> MoveBasis {
        self.basis
    }

    /// 최신 바들로 시그널 계산.
    ///
    /// # Errors
    ///
    /// - `DataError::Unavailable`: 어느 쪽이든 바가 2개 미만
    pub fn detect(
        &self,
        proxy_bars: &[IntradayBar],
        vol_bars: &[IntradayBar],
    ) -> Result<LiveSignal, DataError> {
        let (es_move, proxy_close) = leg_move(proxy_bars, self.basis, "프록시")?;
        let (vix_move, vol_close) = leg_move(vol_bars, self.basis, "변동성")?;

        let signal = SignalKind::from_dirs(sign(es_move), sign(vix_move));
        debug!(%es_move, %vix_move, signal = %signal, "라이브 시그널 계산");

        Ok(LiveSignal {
            signal,
            es_move,
            vix_move,
            proxy_close,
            vol_close,
        })
    }
}

/// 한 다리의 (무브, 최신 종가) 계산. 두 모드 모두 최소 2개 바를
/// 요구합니다.
fn leg_move(
    bars: &[IntradayBar],
    basis: MoveBasis,
    leg: &str,
) -> Result<(Decimal, Decimal), DataError> {
    let [.., prev, last] = bars else {
        return Err(DataError::unavailable(format!(
            "{leg} 시리즈에 바가 2개 미만입니다 ({}개)",
            bars.len()
        )));
    };
    Ok((basis_move(prev, last, basis), last.close))
}

fn basis_move(prev: &IntradayBar, last: &IntradayBar, basis: MoveBasis) -> Decimal {
    match basis {
        MoveBasis::Intrabar => last.close - last.open,
        MoveBasis::CloseToClose => last.close - prev.close,
    }
}
