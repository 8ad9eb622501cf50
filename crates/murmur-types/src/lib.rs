pub mod api;
pub mod models;

pub use api::{BlockRequest, MessageRequest, NicknameRequest, Resource};
pub use models::{BlockList, Message, Token, UserId, UserList};
