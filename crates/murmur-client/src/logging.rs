//! Structured logging for the sync loop.
//!
//! Views report what happened to each request as a [`SyncEvent`]; the
//! logger decides where it goes.

use std::fmt;

use murmur_types::Resource;

use crate::surface::Page;

/// Structured log entry for one view.
#[derive(Debug, Clone)]
pub struct SyncLog {
    pub view: &'static str,
    pub event: SyncEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A poller was started for the view
    PollerStarted { interval_ms: u64 },
    /// A read was issued
    ReadIssued { resource: Resource, seq: u64 },
    /// The cache took the response
    CacheUpdated { resource: Resource, seq: u64 },
    /// A newer read was issued before this response arrived
    ResponseSuperseded { resource: Resource, seq: u64, latest: u64 },
    /// Body did not parse; previous cache kept
    MalformedPayload { resource: Resource, error: String },
    /// Server answered 400/404; body shown in the banner
    Rejected { resource: Resource, status: u16, body: String },
    /// Non-success status where success was needed
    UnexpectedStatus { resource: Resource, status: u16 },
    /// Connection failure or timeout
    TransportFailed { resource: Resource, error: String },
    /// Token storage or configuration failed
    LocalFailure { error: String },
    /// Navigated away
    Redirected { page: Page },
    AccountCreated,
    NicknameChanged,
    MessageSent { status: u16 },
    BlockToggled { user: usize, blocked: bool },
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PollerStarted { interval_ms } => {
                write!(f, "poller_started interval_ms={}", interval_ms)
            }
            Self::ReadIssued { resource, seq } => {
                write!(f, "read_issued resource={} seq={}", resource.name(), seq)
            }
            Self::CacheUpdated { resource, seq } => {
                write!(f, "cache_updated resource={} seq={}", resource.name(), seq)
            }
            Self::ResponseSuperseded { resource, seq, latest } => {
                write!(f, "response_superseded resource={} seq={} latest={}", resource.name(), seq, latest)
            }
            Self::MalformedPayload { resource, error } => {
                write!(f, "malformed_payload resource={} error={}", resource.name(), error)
            }
            Self::Rejected { resource, status, body } => {
                write!(f, "rejected resource={} status={} body={:?}", resource.name(), status, body)
            }
            Self::UnexpectedStatus { resource, status } => {
                write!(f, "unexpected_status resource={} status={}", resource.name(), status)
            }
            Self::TransportFailed { resource, error } => {
                write!(f, "transport_failed resource={} error={}", resource.name(), error)
            }
            Self::LocalFailure { error } => {
                write!(f, "local_failure error={}", error)
            }
            Self::Redirected { page } => {
                write!(f, "redirected page={}", page)
            }
            Self::AccountCreated => f.write_str("account_created"),
            Self::NicknameChanged => f.write_str("nickname_changed"),
            Self::MessageSent { status } => {
                write!(f, "message_sent status={}", status)
            }
            Self::BlockToggled { user, blocked } => {
                write!(f, "block_toggled user={} blocked={}", user, blocked)
            }
        }
    }
}

/// Sink for sync events. Implementations can write to tracing, collect
/// entries for inspection, or discard them.
pub trait SyncLogger: Send + Sync {
    fn log(&self, entry: SyncLog);
}

/// Logger that uses the `tracing` crate.
pub struct TracingLogger;

impl SyncLogger for TracingLogger {
    fn log(&self, entry: SyncLog) {
        match &entry.event {
            // Per-poll traffic is debug only
            SyncEvent::ReadIssued { .. }
            | SyncEvent::CacheUpdated { .. }
            | SyncEvent::ResponseSuperseded { .. } => {
                tracing::debug!(view = entry.view, "{}", entry.event);
            }
            SyncEvent::MalformedPayload { .. }
            | SyncEvent::UnexpectedStatus { .. }
            | SyncEvent::TransportFailed { .. }
            | SyncEvent::LocalFailure { .. } => {
                tracing::warn!(view = entry.view, "{}", entry.event);
            }
            _ => {
                tracing::info!(view = entry.view, "{}", entry.event);
            }
        }
    }
}

/// No-op logger that discards all log entries.
pub struct NullLogger;

impl SyncLogger for NullLogger {
    fn log(&self, _entry: SyncLog) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let e = SyncEvent::ResponseSuperseded {
            resource: Resource::Messages,
            seq: 3,
            latest: 5,
        };
        assert_eq!(e.to_string(), "response_superseded resource=messages seq=3 latest=5");
        assert_eq!(
            SyncEvent::Redirected { page: Page::Account }.to_string(),
            "redirected page=account"
        );
        assert_eq!(
            SyncEvent::Rejected {
                resource: Resource::Blocks,
                status: 400,
                body: "400: Malformed request data.".into(),
            }
            .to_string(),
            "rejected resource=blocks status=400 body=\"400: Malformed request data.\""
        );
    }
}
