//! User-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Profile not found: {0}")]
    NotFound(UserId),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("Admin access required")]
    Forbidden,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl UserError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::ProfileNotFound,
            UserError::Unauthenticated => ErrorCode::Unauthorized,
            UserError::Forbidden => ErrorCode::Forbidden,
            UserError::Store(err) => err.code(),
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized => UserError::Unauthenticated,
            ErrorCode::Forbidden => UserError::Forbidden,
            _ => UserError::Store(StoreError::unavailable(err.message)),
        }
    }
}
