mod entity;
mod error;
mod plugins;
mod prelude;
mod state;
mod sv;

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
  prelude::*,
  state::{AppState, Config},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "intent=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  info!("Starting Intent Server v{}", env!("CARGO_PKG_VERSION"));

  let config = Config::from_env()?;
  let app = Arc::new(AppState::new(config).await?);

  plugins::App::new().register(plugins::server::Plugin).run(app).await?;

  tokio::signal::ctrl_c().await?;
  info!("Shutting down");

  Ok(())
}
