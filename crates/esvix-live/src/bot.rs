//! 봇 포지션 상태 머신.
//!
//! 포지션은 `Flat`/`Long`/`Short` 세 상태 중 하나이며, 전이는
//! `enter`/`exit` 두 가지뿐입니다. 모든 전이는 거래 로그 항목을
//! 남기고, 잘못된 전이는 오류로 거부됩니다.

use chrono::{DateTime, Utc};
use esvix_core::SignalKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// 봇 상태 머신 오류
#[derive(Debug, Error, PartialEq)]
pub enum BotError {
    /// 시그널 없이 진입 시도
    #[error("NONE 시그널로는 진입할 수 없습니다")]
    NoSignal,

    /// 포지션 보유 중 진입 시도
    #[error("이미 {0} 포지션을 보유 중입니다")]
    AlreadyInPosition(PositionState),

    /// 플랫 상태에서 청산 시도
    #[error("보유 중인 포지션이 없습니다")]
    NotInPosition,
}

/// 포지션 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionState {
    /// 무포지션
    #[default]
    Flat,
    /// 롱 보유
    Long,
    /// 숏 보유
    Short,
}

impl PositionState {
    /// 포지션 보유 여부
    pub fn is_holding(&self) -> bool {
        !matches!(self, Self::Flat)
    }
}

impl std::fmt::Display for PositionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Flat => "FLAT",
            Self::Long => "LONG",
            Self::Short => "SHORT",
        };
        write!(f, "{s}")
    }
}

/// 거래 로그 행동
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    /// 진입
    Enter,
    /// 청산
    Exit,
}

/// 거래 로그 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLogEntry {
    /// 항목 ID
    pub id: Uuid,
    /// 전이 시각
    pub at: DateTime<Utc>,
    /// 행동
    pub action: TradeAction,
    /// 전이 후 상태
    pub state: PositionState,
}

/// 봇 상태 요약.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotStatus {
    /// 현재 포지션
    pub position: PositionState,
    /// 마지막 거래 로그 항목
    pub last_trade: Option<TradeLogEntry>,
    /// 최근 로그 (최대 10건, 오래된 순)
    pub recent_log: Vec<TradeLogEntry>,
}

/// 봇 상태 머신
///
/// 현재 상태와 이벤트만으로 다음 상태가 결정됩니다. 브로커 호출은
/// 이 타입의 책임이 아니며, 호출자가 전이 성공 후 커넥터로 주문을
/// 보냅니다.
#[derive(Debug, Clone, Default)]
pub struct BotEngine {
    state: PositionState,
    log: Vec<TradeLogEntry>,
}

impl BotEngine {
    /// 플랫 상태의 새 봇 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 포지션 상태
    pub fn state(&self) -> PositionState {
        self.state
    }

    /// 전체 거래 로그
    pub fn log(&self) -> &[TradeLogEntry] {
        &self.log
    }

    /// 지금 진입해도 되는가: 플랫이고 시그널이 활성일 때만.
    pub fn should_enter(&self, signal: SignalKind) -> bool {
        self.state == PositionState::Flat && signal.is_active()
    }

    /// 지금 청산해야 하는가: 포지션을 보유 중일 때만.
    pub fn should_exit(&self) -> bool {
        self.state.is_holding()
    }

    /// 시그널 방향으로 진입.
    ///
    /// # Errors
    ///
    /// - `BotError::NoSignal`: 시그널이 NONE
    /// - `BotError::AlreadyInPosition`: 플랫이 아닌 상태에서 호출
    pub fn enter(&mut self, signal: SignalKind, at: DateTime<Utc>) -> Result<&TradeLogEntry, BotError> {
        if self.state.is_holding() {
            return Err(BotError::AlreadyInPosition(self.state));
        }

        let next = match signal {
            SignalKind::Long => PositionState::Long,
            SignalKind::Short => PositionState::Short,
            SignalKind::None => return Err(BotError::NoSignal),
        };

        self.state = next;
        info!(state = %next, "포지션 진입");
        Ok(self.push_entry(TradeAction::Enter, at))
    }

    /// 보유 포지션 청산.
    ///
    /// # Errors
    ///
    /// - `BotError::NotInPosition`: 플랫 상태에서 호출
    pub fn exit(&mut self, at: DateTime<Utc>) -> Result<&TradeLogEntry, BotError> {
        if !self.state.is_holding() {
            return Err(BotError::NotInPosition);
        }

        let prev = self.state;
        self.state = PositionState::Flat;
        info!(from = %prev, "포지션 청산");
        Ok(self.push_entry(TradeAction::Exit, at))
    }

    /// 현재 상태 요약 반환 (최근 로그 10건 포함).
    pub fn status(&self) -> BotStatus {
        let recent_start = self.log.len().saturating_sub(10);
        BotStatus {
            position: self.state,
            last_trade: self.log.last().cloned(),
            recent_log: self.log[recent_start..].to_vec(),
        }
    }

    fn push_entry(&mut self, action: TradeAction, at: DateTime<Utc>) -> &TradeLogEntry {
        self.log.push(TradeLogEntry {
            id: Uuid::new_v4(),
            at,
            action,
            state: self.state,
        });
        // push 직후이므로 마지막 항목은 항상 존재
        &self.log[self.log.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 15, minute, 0).unwrap()
    }

    #[test]
    fn test_enter_long_from_flat() {
        let mut bot = BotEngine::new();
        assert!(bot.should_enter(SignalKind::Long));

        let entry = bot.enter(SignalKind::Long, at(0)).unwrap();
        assert_eq!(entry.action, TradeAction::Enter);
        assert_eq!(entry.state, PositionState::Long);
        assert_eq!(bot.state(), PositionState::Long);
    }

    #[test]
    fn test_enter_with_none_signal_rejected() {
        let mut bot = BotEngine::new();
        assert!(!bot.should_enter(SignalKind::None));
        assert_eq!(bot.enter(SignalKind::None, at(0)), Err(BotError::NoSignal));
        assert_eq!(bot.state(), PositionState::Flat);
        assert!(bot.log().is_empty());
    }

    #[test]
    fn test_double_entry_rejected() {
        let mut bot = BotEngine::new();
        bot.enter(SignalKind::Short, at(0)).unwrap();

        assert!(!bot.should_enter(SignalKind::Long));
        assert_eq!(
            bot.enter(SignalKind::Long, at(1)),
            Err(BotError::AlreadyInPosition(PositionState::Short))
        );
        assert_eq!(bot.state(), PositionState::Short);
    }

    #[test]
    fn test_exit_requires_position() {
        let mut bot = BotEngine::new();
        assert!(!bot.should_exit());
        assert_eq!(bot.exit(at(0)), Err(BotError::NotInPosition));

        bot.enter(SignalKind::Long, at(1)).unwrap();
        assert!(bot.should_exit());

        let entry = bot.exit(at(2)).unwrap();
        assert_eq!(entry.action, TradeAction::Exit);
        assert_eq!(entry.state, PositionState::Flat);
        assert_eq!(bot.state(), PositionState::Flat);
    }

    #[test]
    fn test_status_keeps_last_ten_entries() {
        let mut bot = BotEngine::new();
        for i in 0..7 {
            bot.enter(SignalKind::Long, at(i * 2)).unwrap();
            bot.exit(at(i * 2 + 1)).unwrap();
        }

        let status = bot.status();
        assert_eq!(status.position, PositionState::Flat);
        assert_eq!(bot.log().len(), 14);
        assert_eq!(status.recent_log.len(), 10);
        // 마지막 항목이 최근 로그의 끝과 일치
        assert_eq!(
            status.last_trade.as_ref(),
            status.recent_log.last()
        );
    }

    #[test]
    fn test_log_entries_have_unique_ids() {
        let mut bot = BotEngine::new();
        bot.enter(SignalKind::Long, at(0)).unwrap();
        bot.exit(at(1)).unwrap();

        assert_ne!(bot.log()[0].id, bot.log()[1].id);
    }
}
