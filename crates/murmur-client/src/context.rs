use std::sync::Arc;

use murmur_types::Resource;

use crate::api::ApiClient;
use crate::banner::Banner;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::logging::{SyncEvent, SyncLog, SyncLogger};
use crate::store::Store;
use crate::surface::{Page, Surface};
use crate::token::TokenStore;

/// Everything a view needs, cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct Context {
    pub api: ApiClient,
    pub store: Arc<Store>,
    pub surface: Arc<dyn Surface>,
    pub banner: Banner,
    pub logger: Arc<dyn SyncLogger>,
    pub config: ClientConfig,
}

impl Context {
    pub fn new(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
        surface: Arc<dyn Surface>,
        logger: Arc<dyn SyncLogger>,
    ) -> Result<Self> {
        let api = ApiClient::new(&config, tokens)?;
        let banner = Banner::new(surface.clone(), config.banner);
        Ok(Self {
            api,
            store: Arc::new(Store::new()),
            surface,
            banner,
            logger,
            config,
        })
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.api.tokens()
    }

    pub fn log(&self, view: &'static str, event: SyncEvent) {
        self.logger.log(SyncLog { view, event });
    }

    pub fn redirect(&self, view: &'static str, page: Page) {
        self.log(view, SyncEvent::Redirected { page });
        self.surface.redirect(page);
    }

    /// Log `err`, and put the server's text in the banner when it has some.
    pub fn report(&self, view: &'static str, resource: Resource, err: Error) {
        if let Some(text) = err.banner_text() {
            self.banner.show(text);
        }

        let event = match err {
            Error::Rejected { status, body } => SyncEvent::Rejected {
                resource,
                status: status.as_u16(),
                body,
            },
            Error::Status { status, .. } => SyncEvent::UnexpectedStatus {
                resource,
                status: status.as_u16(),
            },
            Error::Malformed { source, .. } => SyncEvent::MalformedPayload {
                resource,
                error: source.to_string(),
            },
            Error::Transport(e) => SyncEvent::TransportFailed {
                resource,
                error: e.to_string(),
            },
            other @ (Error::Storage(_) | Error::Config { .. }) => SyncEvent::LocalFailure {
                error: other.to_string(),
            },
        };
        self.log(view, event);
    }
}
