//! 브로커 커넥터 capability.
//!
//! 브로커는 설정에서 [`BrokerKind`]로 선택되고, 봇에는
//! `Arc<dyn BrokerConnector>`로 주입됩니다. 현재 구현체는 모두
//! 시뮬레이션입니다. 연결 상태만 추적하고 사람이 읽을 수 있는
//! 확인 문자열을 돌려주며, 실제 주문 라우팅은 하지 않습니다.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// 브로커 오류
#[derive(Debug, Error, PartialEq)]
pub enum BrokerError {
    /// 연결 전 주문 시도
    #[error("{0} 브로커에 연결되어 있지 않습니다")]
    NotConnected(&'static str),

    /// 알 수 없는 브로커 이름
    #[error("알 수 없는 브로커: {0}")]
    UnknownBroker(String),
}

/// 주문 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// 매수
    Buy,
    /// 매도
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        };
        write!(f, "{s}")
    }
}

/// 브로커 커넥터 trait
///
/// 봇이 의존하는 주문 실행 경계입니다. 구현체는 시뮬레이션이든
/// 실거래든 같은 인터페이스를 제공합니다.
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    /// 브로커에 연결
    async fn connect(&self) -> Result<(), BrokerError>;

    /// 주문 제출. 확인 문자열을 반환합니다.
    async fn place_order(
        &self,
        symbol: &str,
        side: OrderSide,
        qty: Decimal,
    ) -> Result<String, BrokerError>;

    /// 심볼의 포지션 청산. 확인 문자열을 반환합니다.
    async fn close_position(&self, symbol: &str) -> Result<String, BrokerError>;

    /// 브로커 이름
    fn broker_name(&self) -> &'static str;
}

// =============================================================================
// 브로커 선택
// =============================================================================

/// 지원 브로커 종류
///
/// 설정 값에서 커넥터로 가는 순수 매핑입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokerKind {
    /// Interactive Brokers (시뮬레이션)
    Ibkr,
    /// Alpaca (시뮬레이션)
    Alpaca,
}

impl BrokerKind {
    /// 종류에 해당하는 커넥터 생성
    pub fn connector(&self) -> Arc<dyn BrokerConnector> {
        match self {
            Self::Ibkr => Arc::new(SimulatedIbkrConnector::new()),
            Self::Alpaca => Arc::new(SimulatedAlpacaConnector::new()),
        }
    }
}

impl FromStr for BrokerKind {
    type Err = BrokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ibkr" => Ok(Self::Ibkr),
            "alpaca" => Ok(Self::Alpaca),
            other => Err(BrokerError::UnknownBroker(other.to_string())),
        }
    }
}

impl std::fmt::Display for BrokerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ibkr => "ibkr",
            Self::Alpaca => "alpaca",
        };
        write!(f, "{s}")
    }
}

// =============================================================================
// 시뮬레이션 커넥터
// =============================================================================

/// IBKR 시뮬레이션 커넥터
#[derive(Debug, Default)]
pub struct SimulatedIbkrConnector {
    connected: AtomicBool,
}

impl SimulatedIbkrConnector {
    /// 새로운 커넥터 생성 (미연결 상태)
    pub fn new() -> Self {
        Self::default()
    }

    /// 연결 상태 조회
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrokerConnector for SimulatedIbkrConnector {
    async fn connect(&self) -> Result<(), BrokerError> {
        self.connected.store(true, Ordering::SeqCst);
        info!(broker = self.broker_name(), "브로커 연결 (시뮬레이션)");
        Ok(())
    }

    async fn place_order(
        &self,
        symbol: &str,
        side: OrderSide,
        qty: Decimal,
    ) -> Result<String, BrokerError> {
        if !self.is_connected() {
            return Err(BrokerError::NotConnected(self.broker_name()));
        }
        Ok(format!("[IBKR 시뮬레이션] {side} {qty} {symbol} 주문 접수"))
    }

    async fn close_position(&self, symbol: &str) -> Result<String, BrokerError> {
        if !self.is_connected() {
            return Err(BrokerError::NotConnected(self.broker_name()));
        }
        Ok(format!("[IBKR 시뮬레이션] {symbol} 포지션 청산"))
    }

    fn broker_name(&self) -> &'static str {
        "ibkr"
    }
}

/// Alpaca 시뮬레이션 커넥터
#[derive(Debug, Default)]
pub struct SimulatedAlpacaConnector {
    connected: AtomicBool,
}

impl SimulatedAlpacaConnector {
    /// 새로운 커넥터 생성 (미연결 상태)
    pub fn new() -> Self {
        Self::default()
    }

    /// 연결 상태 조회
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrokerConnector for SimulatedAlpacaConnector {
    async fn connect(&self) -> Result<(), BrokerError> {
        self.connected.store(true, Ordering::SeqCst);
        info!(broker = self.broker_name(), "브로커 연결 (시뮬레이션)");
        Ok(())
    }

    async fn place_order(
        &self,
        symbol: &str,
        side: OrderSide,
        qty: Decimal,
    ) -> Result<String, BrokerError> {
        if !self.is_connected() {
            return Err(BrokerError::NotConnected(self.broker_name()));
        }
        Ok(format!("[Alpaca 시뮬레이션] {side} {qty} {symbol} 주문 접수"))
    }

    async fn close_position(&self, symbol: &str) -> Result<String, BrokerError> {
        if !self.is_connected() {
            return Err(BrokerError::NotConnected(self.broker_name()));
        }
        Ok(format!("[Alpaca 시뮬레이션] {symbol} 포지션 청산"))
    }

    fn broker_name(&self) -> &'static str {
        "alpaca"
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_broker_kind_from_str() {
        assert_eq!("ibkr".parse::<BrokerKind>().unwrap(), BrokerKind::Ibkr);
        assert_eq!("ALPACA".parse::<BrokerKind>().unwrap(), BrokerKind::Alpaca);
        assert!(matches!(
            "robinhood".parse::<BrokerKind>(),
            Err(BrokerError::UnknownBroker(_))
        ));
    }

    #[test]
    fn test_kind_maps_to_matching_connector() {
        assert_eq!(BrokerKind::Ibkr.connector().broker_name(), "ibkr");
        assert_eq!(BrokerKind::Alpaca.connector().broker_name(), "alpaca");
    }

    #[tokio::test]
    async fn test_order_requires_connection() {
        let connector = SimulatedIbkrConnector::new();
        assert!(!connector.is_connected());

        let result = connector.place_order("ES", OrderSide::Buy, dec!(2)).await;
        assert_eq!(result, Err(BrokerError::NotConnected("ibkr")));

        connector.connect().await.unwrap();
        let confirmation = connector
            .place_order("ES", OrderSide::Buy, dec!(2))
            .await
            .unwrap();
        assert!(confirmation.contains("BUY 2 ES"));
    }

    #[tokio::test]
    async fn test_close_position_confirmation() {
        let connector = SimulatedAlpacaConnector::new();
        connector.connect().await.unwrap();

        let confirmation = connector.close_position("SPY").await.unwrap();
        assert!(confirmation.contains("SPY"));

        let unconnected = SimulatedAlpacaConnector::new();
        assert_eq!(
            unconnected.close_position("SPY").await,
            Err(BrokerError::NotConnected("alpaca"))
        );
    }
}
