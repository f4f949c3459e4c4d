//! Member Entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// A participant of a shared list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub is_owner: bool,
}

impl Member {
    /// New non-owner member with a generated id
    pub fn invite(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            is_owner: false,
        }
    }

    pub fn owner(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            is_owner: true,
        }
    }

    /// Emails are compared case-insensitively
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

impl Entity for Member {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}
