mod command;
mod terminal;

use std::sync::Arc;

use tracing::info;

use murmur_client::views::gate::{self, Verdict};
use murmur_client::{
    AccountView, ChatView, ClientConfig, Context, Field, FileTokenStore, Surface, TracingLogger,
    UsersView, sync,
};

use command::Command;
use terminal::TerminalSurface;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "murmur_client=info,murmur_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = Command::parse(std::env::args().skip(1))?;

    // Config
    let config = ClientConfig::from_env()?;
    info!("Using server {}", config.server_url);

    let tokens = Arc::new(FileTokenStore::new(&config.token_path));
    let surface: Arc<dyn Surface> = Arc::new(TerminalSurface::new());
    let ctx = Context::new(config, tokens, surface.clone(), Arc::new(TracingLogger))?;

    match command {
        Command::Chat => {
            let Some(poller) = ChatView::new(ctx).init().await? else {
                return Ok(());
            };
            tokio::signal::ctrl_c().await?;
            poller.stop();
        }
        Command::Send(text) => {
            sync::prime(&ctx).await;
            surface.set_field(Field::MessageBox, &text);
            ChatView::new(ctx).send().await;
        }
        Command::Users => {
            let poller = UsersView::new(ctx).init().await;
            tokio::signal::ctrl_c().await?;
            poller.stop();
        }
        Command::Block(id) => {
            let users = UsersView::new(ctx);
            users.update().await;
            users.toggle(id).await;
        }
        Command::Account(nickname) => {
            let account = AccountView::new(ctx.clone());
            account.init().await?;
            if let Some(nickname) = nickname {
                surface.set_field(Field::Nickname, &nickname);
                account.submit().await?;
            }
            println!("nickname: {}", surface.field(Field::Nickname));
            println!("token: {}", surface.field(Field::Token));
        }
        Command::WhoAmI => {
            let token = ctx.tokens().get()?;
            match gate::verify(&ctx, "whoami", token.as_ref()).await {
                Verdict::Valid { nickname } => println!("{}", nickname),
                Verdict::Invalid => println!("signed out"),
                Verdict::Rejected => {}
            }
        }
    }

    Ok(())
}
