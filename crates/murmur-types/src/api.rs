use serde::{Deserialize, Serialize};

use crate::models::UserId;

// -- Resources --

/// The four collections the server exposes under `api/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Messages,
    Auth,
    Blocks,
}

impl Resource {
    /// Path relative to the server root, without a leading slash.
    pub fn path(self) -> &'static str {
        match self {
            Self::Users => "api/users",
            Self::Messages => "api/messages",
            Self::Auth => "api/auth",
            Self::Blocks => "api/blocks",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Messages => "messages",
            Self::Auth => "auth",
            Self::Blocks => "blocks",
        }
    }
}

// -- Users --

/// Body of `POST api/users` (create) and `PATCH api/users` (rename).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NicknameRequest {
    pub nickname: String,
}

// -- Messages --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

// -- Blocks --

/// Body of `POST api/blocks` and `DELETE api/blocks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRequest {
    pub identifier: UserId,
}
