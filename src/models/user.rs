use serde::{Deserialize, Serialize};

use crate::models::day::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: String,
    pub player: Player,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub player: Player,
}

impl From<&UserAccount> for UserProfile {
    fn from(account: &UserAccount) -> Self {
        Self {
            username: account.username.clone(),
            player: account.player,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub username: String,
    pub created_at: String,
}
