//! Timer-driven polling of list resources.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::context::Context;
use crate::logging::SyncEvent;
use crate::store::{Applied, Slot};

/// Read one resource into its slot.
///
/// Returns the new value when the cache took it. Any failure (transport,
/// non-success status, unparseable body) or a response overtaken by a newer
/// read leaves the cache as it was and returns `None`.
pub async fn pull<T>(ctx: &Context, view: &'static str, slot: &Slot<T>) -> Option<T>
where
    T: DeserializeOwned + Clone + Default,
{
    let resource = slot.resource();
    let ticket = slot.issue();
    ctx.log(view, SyncEvent::ReadIssued { resource, seq: ticket.seq });

    let reply = match ctx.api.fetch(resource).await {
        Ok(reply) => reply,
        Err(e) => {
            ctx.report(view, resource, e);
            return None;
        }
    };

    if !reply.status.is_success() {
        ctx.log(view, SyncEvent::UnexpectedStatus {
            resource,
            status: reply.status.as_u16(),
        });
        return None;
    }

    let value: T = match reply.json(resource) {
        Ok(value) => value,
        Err(e) => {
            ctx.report(view, resource, e);
            return None;
        }
    };

    match slot.apply(ticket, value.clone()).await {
        Applied::Updated => {
            ctx.log(view, SyncEvent::CacheUpdated { resource, seq: ticket.seq });
            Some(value)
        }
        Applied::Superseded { latest } => {
            ctx.log(view, SyncEvent::ResponseSuperseded {
                resource,
                seq: ticket.seq,
                latest,
            });
            None
        }
    }
}

/// Fill every cache once. Run when a page loads, before its own poller.
pub async fn prime(ctx: &Context) {
    let store = &ctx.store;
    tokio::join!(
        pull(ctx, "prime", &store.users),
        pull(ctx, "prime", &store.messages),
        pull(ctx, "prime", &store.blocks),
    );
}

/// Runs a refresh once immediately and then every `interval`.
///
/// Each tick's refresh is spawned on its own, so a hung request never
/// delays the next tick. Dropping the poller stops the timer; refreshes
/// already in flight run to completion.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn<F, Fut>(ctx: &Context, view: &'static str, interval: Duration, refresh: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        ctx.log(view, SyncEvent::PollerStarted {
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        });

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tokio::spawn(refresh());
            }
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {}
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
