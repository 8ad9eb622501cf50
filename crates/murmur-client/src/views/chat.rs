use murmur_types::Resource;

use crate::context::Context;
use crate::error::Result;
use crate::logging::SyncEvent;
use crate::render;
use crate::surface::{Field, Region};
use crate::sync::{self, Poller};
use crate::views::gate::{self, Verdict};

const VIEW: &str = "chat";

/// Message list plus the input box.
#[derive(Clone)]
pub struct ChatView {
    ctx: Context,
}

impl ChatView {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Page load: fill the caches, check the token, then poll messages.
    ///
    /// Returns `None` when the gate sent the user to the account page.
    pub async fn init(&self) -> Result<Option<Poller>> {
        sync::prime(&self.ctx).await;

        if gate::check(&self.ctx, VIEW).await? == Verdict::Invalid {
            return Ok(None);
        }

        let view = self.clone();
        let poller = Poller::spawn(&self.ctx, VIEW, self.ctx.config.refresh, move || {
            let view = view.clone();
            async move {
                view.update().await;
            }
        });
        Ok(Some(poller))
    }

    /// Fetch messages and re-render. The user and block caches used for
    /// redaction are whatever the store currently holds.
    pub async fn update(&self) -> bool {
        let store = &self.ctx.store;
        let Some(messages) = sync::pull(&self.ctx, VIEW, &store.messages).await else {
            return false;
        };

        let users = store.users.get().await;
        let blocks = store.blocks.get().await;
        self.ctx
            .surface
            .set_html(Region::MessageList, &render::messages(&messages, &users, &blocks));
        true
    }

    /// Post the input box content, then clear it and refresh.
    ///
    /// Only a 400/404 answer stops the clear and refresh; any other outcome
    /// counts as done.
    pub async fn send(&self) {
        let content = self.ctx.surface.field(Field::MessageBox);

        match self.ctx.api.send_message(&content).await {
            Ok(reply) => {
                self.ctx.log(VIEW, SyncEvent::MessageSent {
                    status: reply.status.as_u16(),
                });
            }
            Err(e) if e.is_rejected() => {
                self.ctx.report(VIEW, Resource::Messages, e);
                return;
            }
            Err(e) => self.ctx.report(VIEW, Resource::Messages, e),
        }

        self.ctx.surface.set_field(Field::MessageBox, "");
        self.update().await;
    }
}
