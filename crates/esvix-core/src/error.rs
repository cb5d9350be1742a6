//! 데이터 계층 오류 타입.
//!
//! 두 가지 실패 모드를 별도 variant로 유지합니다: 데이터 부재
//! (`Unavailable`)와 스키마 불일치(`Schema`). 호출자는 이 둘을 구분하여
//! 서로 다른 진단 메시지를 표시할 수 있습니다.

use thiserror::Error;

/// 입력 시계열 데이터 오류.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// 제공자가 데이터를 반환하지 않았거나, 시리즈가 비어있거나,
    /// 계산에 필요한 최소 바 개수보다 적음
    #[error("데이터 없음: {0}")]
    Unavailable(String),

    /// 정규화 후에도 필수 컬럼이 없거나 해석할 수 없음
    #[error("스키마 오류: '{column}' 컬럼이 없거나 해석할 수 없습니다")]
    Schema { column: String },
}

impl DataError {
    /// 데이터 부재 오류 생성.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// 스키마 오류 생성.
    pub fn schema(column: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
        }
    }
}
