use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a user in the server's user list.
///
/// The server has no stable user key; blocks and renames all refer to this
/// index. Keep it opaque so callers never do arithmetic on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub usize);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered nicknames as returned by `GET api/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserList(pub Vec<String>);

impl UserList {
    pub fn get(&self, id: UserId) -> Option<&str> {
        self.0.get(id.0).map(String::as_str)
    }

    /// First user whose nickname matches exactly.
    pub fn position(&self, nickname: &str) -> Option<UserId> {
        self.0.iter().position(|n| n == nickname).map(UserId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserId, &str)> {
        self.0.iter().enumerate().map(|(i, n)| (UserId(i), n.as_str()))
    }
}

/// A chat message. On the wire this is a two element array
/// `[author, content]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Message {
    pub author: String,
    pub content: String,
}

impl Message {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}

impl From<(String, String)> for Message {
    fn from((author, content): (String, String)) -> Self {
        Self { author, content }
    }
}

impl From<Message> for (String, String) {
    fn from(m: Message) -> Self {
        (m.author, m.content)
    }
}

/// Users the current account has blocked, as returned by `GET api/blocks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockList(pub Vec<UserId>);

impl BlockList {
    pub fn contains(&self, id: UserId) -> bool {
        self.0.contains(&id)
    }
}

// -- Session token --

/// Opaque credential returned on account creation.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Returns `None` for an empty string, which the client treats as
    /// "signed out".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_form() {
        let msgs: Vec<Message> = serde_json::from_str(r#"[["alice","hi"],["bob","yo"]]"#).unwrap();
        assert_eq!(msgs, vec![Message::new("alice", "hi"), Message::new("bob", "yo")]);
        assert_eq!(serde_json::to_string(&msgs[0]).unwrap(), r#"["alice","hi"]"#);
    }

    #[test]
    fn test_message_rejects_object_form() {
        let res: Result<Message, _> = serde_json::from_str(r#"{"author":"a","content":"b"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_user_list_position_is_first_match() {
        let users = UserList(vec!["ann".into(), "bo".into(), "ann".into()]);
        assert_eq!(users.position("ann"), Some(UserId(0)));
        assert_eq!(users.position("bo"), Some(UserId(1)));
        assert_eq!(users.position("cy"), None);
        assert_eq!(users.get(UserId(2)), Some("ann"));
        assert_eq!(users.get(UserId(3)), None);
    }

    #[test]
    fn test_block_list_parses_indices() {
        let blocks: BlockList = serde_json::from_str("[2, 0]").unwrap();
        assert!(blocks.contains(UserId(0)));
        assert!(blocks.contains(UserId(2)));
        assert!(!blocks.contains(UserId(1)));
        assert!(serde_json::from_str::<BlockList>("[-1]").is_err());
    }

    #[test]
    fn test_empty_token_is_signed_out() {
        assert!(Token::new("").is_none());
        let t = Token::new("abc").unwrap();
        assert_eq!(t.as_str(), "abc");
        assert_eq!(format!("{:?}", t), "Token(..)");
    }
}
