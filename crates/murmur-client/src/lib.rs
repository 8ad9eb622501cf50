//! murmur client: keeps a chat page in sync with the server by polling.
//!
//! - [`api::ApiClient`] issues the HTTP calls for the four `api/*` resources
//! - [`store::Store`] caches each list, discarding responses older than the
//!   one it already holds for the same resource
//! - [`render`] turns the caches into HTML fragments
//! - [`views`] wire the above to a [`surface::Surface`]
//! - [`sync::Poller`] re-runs a view's refresh on a timer

pub mod api;
pub mod banner;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod render;
pub mod store;
pub mod surface;
pub mod sync;
pub mod token;
pub mod views;

// Re-export key types for convenience.
pub use api::{ApiClient, Reply};
pub use banner::Banner;
pub use config::ClientConfig;
pub use context::Context;
pub use error::{Error, Result};
pub use logging::{NullLogger, SyncEvent, SyncLog, SyncLogger, TracingLogger};
pub use store::{Applied, Slot, Store, Ticket};
pub use surface::{Field, MemorySurface, Page, Region, Surface};
pub use sync::Poller;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use views::{AccountView, ChatView, UsersView, Verdict};
