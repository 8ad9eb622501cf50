use anyhow::{Context as _, Result, bail};

use murmur_types::UserId;

pub const USAGE: &str = "\
usage: murmur <command>

commands:
  chat               check the session, then follow the message list
  send TEXT...       post a message
  users              follow the user list
  block INDEX        block or unblock the user at INDEX
  account [NAME]     show the account; with NAME, sign up or rename
  whoami             print the nickname for the stored token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat,
    Send(String),
    Users,
    Block(UserId),
    Account(Option<String>),
    WhoAmI,
}

impl Command {
    pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let Some(name) = args.next() else {
            bail!("missing command\n\n{}", USAGE);
        };

        let command = match name.as_str() {
            "chat" => Self::Chat,
            "users" => Self::Users,
            "whoami" => Self::WhoAmI,
            "send" => {
                let text = args.by_ref().collect::<Vec<_>>().join(" ");
                if text.trim().is_empty() {
                    bail!("send needs the message text");
                }
                Self::Send(text)
            }
            "block" => {
                let raw = args.next().context("block needs a user index")?;
                let index: usize = raw
                    .parse()
                    .with_context(|| format!("'{}' is not a user index", raw))?;
                Self::Block(UserId(index))
            }
            "account" => Self::Account(args.next()),
            other => bail!("unknown command '{}'\n\n{}", other, USAGE),
        };

        if let Some(extra) = args.next() {
            bail!("unexpected argument '{}'", extra);
        }
        Ok(command)
    }
}
