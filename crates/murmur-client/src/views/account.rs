use reqwest::StatusCode;

use murmur_types::Resource;

use crate::context::Context;
use crate::error::Result;
use crate::logging::SyncEvent;
use crate::surface::Field;
use crate::sync;
use crate::views::gate::{self, Verdict};

const VIEW: &str = "account";

pub const SIGN_UP_HINT: &str = "Type your nickname and click submit to sign up.";
pub const ACCOUNT_CREATED: &str = "Created account. You can now access the chat.";
pub const NICKNAME_UPDATED: &str = "Updated nickname.";

/// Sign-up and rename form.
#[derive(Clone)]
pub struct AccountView {
    ctx: Context,
}

impl AccountView {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Page load. A token the server no longer accepts is wiped.
    pub async fn init(&self) -> Result<Verdict> {
        sync::prime(&self.ctx).await;
        self.load(true).await
    }

    /// Fill the nickname and token fields from the server's view of the
    /// stored token.
    pub async fn refresh(&self) -> Result<Verdict> {
        self.load(false).await
    }

    async fn load(&self, forget_invalid: bool) -> Result<Verdict> {
        let surface = &self.ctx.surface;
        let token = self.ctx.tokens().get()?;

        let verdict = gate::verify(&self.ctx, VIEW, token.as_ref()).await;
        match &verdict {
            Verdict::Valid { nickname } => {
                surface.set_field(Field::Nickname, nickname);
                surface.set_field(Field::Token, token.as_ref().map_or("", |t| t.as_str()));
            }
            Verdict::Invalid => {
                surface.set_field(Field::Nickname, "");
                surface.set_field(Field::Token, "");
                if forget_invalid {
                    self.ctx.tokens().set("")?;
                }
                self.ctx.banner.show(SIGN_UP_HINT);
            }
            Verdict::Rejected => {}
        }
        Ok(verdict)
    }

    /// Create an account with the nickname field when signed out, rename
    /// the current account otherwise.
    pub async fn submit(&self) -> Result<()> {
        let nickname = self.ctx.surface.field(Field::Nickname);
        let signed_in = self.ctx.tokens().get()?.is_some();

        let result = if signed_in {
            self.ctx.api.rename(&nickname).await
        } else {
            self.ctx.api.create_account(&nickname).await
        };

        let reply = match result.and_then(|r| r.expect_status(StatusCode::CREATED)) {
            Ok(reply) => reply,
            Err(e) => {
                self.ctx.report(VIEW, Resource::Users, e);
                return Ok(());
            }
        };

        if signed_in {
            self.ctx.log(VIEW, SyncEvent::NicknameChanged);
            self.ctx.banner.show(NICKNAME_UPDATED);
        } else {
            self.ctx.tokens().set(&reply.body)?;
            self.ctx.log(VIEW, SyncEvent::AccountCreated);
            self.ctx.banner.show(ACCOUNT_CREATED);
        }

        self.refresh().await?;
        Ok(())
    }
}
