//! Error taxonomy
//!
//! Every failure of a data-service operation is an [`ApiError`]. Callers branch
//! on [`ApiError::kind`] and show [`ApiError::message`] to the user.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ItemId, ListId};
use crate::messages::{self, Locale};

pub type ApiResult<T> = Result<T, ApiError>;

/// Machine-readable failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Forbidden,
    Conflict,
    RateLimited,
    Server,
    Network,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Conflict => "conflict",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Server => "server",
            ErrorKind::Network => "network",
        }
    }
}

/// Input rejected before (or by) the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("list name must not be blank")]
    BlankListName,
    #[error("item name must not be blank")]
    BlankItemName,
    #[error("email address is required")]
    EmailRequired,
    #[error("`{0}` is not a valid email address")]
    EmailInvalid(String),
    #[error("request rejected by the server")]
    Rejected,
}

/// What a not-found error refers to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Resource {
    #[error("list {0}")]
    List(ListId),
    #[error("item {0}")]
    Item(ItemId),
    #[error("member {0}")]
    Member(String),
}

/// Why an operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("only an owner may do this")]
    NotOwner,
    #[error("list is archived")]
    ListArchived,
    #[error("owners cannot be removed from their list")]
    OwnerRemoval,
    #[error("list would be left without an owner")]
    LastOwner,
    #[error("access denied")]
    Unspecified,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictReason {
    #[error("{0} is already a member")]
    DuplicateMember(String),
    #[error("state changed on the server")]
    Unspecified,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("forbidden: {0}")]
    Forbidden(Denial),
    #[error("conflict: {0}")]
    Conflict(ConflictReason),
    #[error("too many requests")]
    RateLimited,
    #[error("server error (status {status})")]
    Server { status: u16 },
    #[error("network unreachable: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Forbidden(_) => ErrorKind::Forbidden,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::RateLimited => ErrorKind::RateLimited,
            ApiError::Server { .. } | ApiError::InvalidResponse(_) => ErrorKind::Server,
            ApiError::Network(_) => ErrorKind::Network,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Localized, user-facing text
    pub fn message(&self, locale: Locale) -> &'static str {
        messages::error_message(self, locale)
    }

    pub fn list_not_found(id: ListId) -> Self {
        ApiError::NotFound(Resource::List(id))
    }

    /// Map a non-success HTTP status. `missing` names what a 404 refers to;
    /// without one (collection endpoints) a 404 is a server fault.
    pub fn from_status(status: u16, missing: Option<Resource>) -> Self {
        match (status, missing) {
            (400 | 422, _) => ApiError::Validation(ValidationError::Rejected),
            (401 | 403, _) => ApiError::Forbidden(Denial::Unspecified),
            (404, Some(missing)) => ApiError::NotFound(missing),
            (409, _) => ApiError::Conflict(ConflictReason::Unspecified),
            (429, _) => ApiError::RateLimited,
            _ => ApiError::Server { status },
        }
    }
}
