use reqwest::StatusCode;

use murmur_types::{Resource, Token};

use crate::context::Context;
use crate::error::Result;
use crate::logging::SyncEvent;
use crate::surface::Page;

/// Outcome of checking a token against `api/auth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// 200; the body is the account's nickname.
    Valid { nickname: String },
    /// Any other status, or no answer at all.
    Invalid,
    /// 400/404; the body went to the banner and nothing else happens.
    Rejected,
}

pub async fn verify(ctx: &Context, view: &'static str, token: Option<&Token>) -> Verdict {
    match ctx.api.verify(token).await {
        Ok(reply) if reply.status == StatusCode::OK => Verdict::Valid {
            nickname: reply.body,
        },
        Ok(reply) => {
            ctx.log(view, SyncEvent::UnexpectedStatus {
                resource: Resource::Auth,
                status: reply.status.as_u16(),
            });
            Verdict::Invalid
        }
        Err(e) if e.is_rejected() => {
            ctx.report(view, Resource::Auth, e);
            Verdict::Rejected
        }
        Err(e) => {
            ctx.report(view, Resource::Auth, e);
            Verdict::Invalid
        }
    }
}

/// Send the stored token to the server and leave for the account page if
/// it is not accepted.
///
/// Only a convenience for the user; the server checks the token on every
/// call regardless.
pub async fn check(ctx: &Context, view: &'static str) -> Result<Verdict> {
    let token = ctx.tokens().get()?;
    let verdict = verify(ctx, view, token.as_ref()).await;
    if verdict == Verdict::Invalid {
        ctx.redirect(view, Page::Account);
    }
    Ok(verdict)
}
