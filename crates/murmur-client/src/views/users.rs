use murmur_types::{Resource, UserId};

use crate::context::Context;
use crate::logging::SyncEvent;
use crate::render;
use crate::surface::Region;
use crate::sync::{self, Poller};

const VIEW: &str = "users";

/// User list with a block toggle per user.
#[derive(Clone)]
pub struct UsersView {
    ctx: Context,
}

impl UsersView {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    pub async fn init(&self) -> Poller {
        sync::prime(&self.ctx).await;

        let view = self.clone();
        Poller::spawn(&self.ctx, VIEW, self.ctx.config.refresh, move || {
            let view = view.clone();
            async move {
                view.update().await;
            }
        })
    }

    /// Fetch blocks, then users, and render from that pair.
    ///
    /// Both reads must land for the list to be redrawn, so the indices in
    /// the block list always refer to the user list they are shown with.
    pub async fn update(&self) -> bool {
        let store = &self.ctx.store;
        let Some(blocks) = sync::pull(&self.ctx, VIEW, &store.blocks).await else {
            return false;
        };
        let Some(users) = sync::pull(&self.ctx, VIEW, &store.users).await else {
            return false;
        };

        self.ctx
            .surface
            .set_html(Region::UserList, &render::users(&users, &blocks));
        true
    }

    /// Block `id` if the cached block list lacks it, unblock it otherwise,
    /// then refresh both lists.
    pub async fn toggle(&self, id: UserId) {
        let store = &self.ctx.store;
        let was_blocked = store.blocks.get().await.contains(id);

        let result = if was_blocked {
            self.ctx.api.unblock(id).await
        } else {
            self.ctx.api.block(id).await
        };

        match result {
            Ok(_) => {
                self.ctx.log(VIEW, SyncEvent::BlockToggled {
                    user: id.0,
                    blocked: !was_blocked,
                });
                let users = store.users.get().await;
                let name = users.get(id).map_or_else(|| id.to_string(), str::to_string);
                let verb = if was_blocked { "Unblocked" } else { "Blocked" };
                self.ctx.banner.show(&format!("{} {}.", verb, name));
            }
            Err(e) if e.is_rejected() => {
                self.ctx.report(VIEW, Resource::Blocks, e);
                return;
            }
            Err(e) => self.ctx.report(VIEW, Resource::Blocks, e),
        }

        self.update().await;
    }
}
