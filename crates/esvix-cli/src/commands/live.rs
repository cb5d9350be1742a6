//! 라이브 시그널 서브커맨드.
//!
//! (모의) 데이터 공급자에서 두 심볼의 최신 인트라데이 바를 받아
//! 단일 스냅샷 다이버전스 시그널을 계산합니다.

use anyhow::Context;
use esvix_core::MoveBasis;
use esvix_data::{MarketDataProvider, MockMarketDataProvider};
use esvix_live::{LiveDivergenceDetector, LiveSignal};

/// 라이브 커맨드 설정
#[derive(Debug, Clone)]
pub struct LiveCliConfig {
    /// 프록시 심볼 (예: SPY)
    pub proxy_symbol: String,
    /// 변동성 심볼 (예: VIX)
    pub vol_symbol: String,
    /// 무브 산출 기준
    pub basis: MoveBasis,
    /// 공급자에서 받을 바 개수
    pub bar_count: usize,
    /// 모의 공급자 시드
    pub seed: u64,
}

/// 라이브 시그널 계산 실행.
///
/// 공급자 오류는 문맥이 붙어 전파되고, 바 부족은 코어의
/// `DataError::Unavailable`로 올라갑니다.
pub async fn run_live(config: LiveCliConfig) -> anyhow::Result<LiveSignal> {
    let provider = MockMarketDataProvider::with_seed(config.seed);

    let proxy_bars = provider
        .get_recent_intraday_bars(&config.proxy_symbol, config.bar_count)
        .await
        .with_context(|| format!("{} 인트라데이 바 조회 실패", config.proxy_symbol))?;
    let vol_bars = provider
        .get_recent_intraday_bars(&config.vol_symbol, config.bar_count)
        .await
        .with_context(|| format!("{} 인트라데이 바 조회 실패", config.vol_symbol))?;

    let detector = LiveDivergenceDetector::new(config.basis);
    let live = detector.detect(&proxy_bars, &vol_bars)?;
    Ok(live)
}

#[cfg(test)]
mod tests {
    use esvix_core::SignalKind;

    use super::*;

    fn config(bar_count: usize) -> LiveCliConfig {
        LiveCliConfig {
            proxy_symbol: "SPY".to_string(),
            vol_symbol: "VIX".to_string(),
            basis: MoveBasis::Intrabar,
            bar_count,
            seed: 7,
        }
    }

    #[tokio::test]
    async fn test_run_live_returns_signal() {
        let live = run_live(config(30)).await.unwrap();
        // 시드 고정이므로 같은 설정은 같은 결과를 준다
        let again = run_live(config(30)).await.unwrap();
        assert_eq!(live, again);
        assert!(matches!(
            live.signal,
            SignalKind::Long | SignalKind::Short | SignalKind::None
        ));
    }

    #[tokio::test]
    async fn test_run_live_too_few_bars_is_unavailable() {
        let err = run_live(config(1)).await.unwrap_err();
        assert!(err.downcast_ref::<esvix_core::DataError>().is_some());
    }
}
