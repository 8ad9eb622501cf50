//! One controller per page. Each reads the caches it needs from the store,
//! talks to the server through the api client and writes into the surface.

pub mod account;
pub mod chat;
pub mod gate;
pub mod users;

pub use account::AccountView;
pub use chat::ChatView;
pub use gate::Verdict;
pub use users::UsersView;
