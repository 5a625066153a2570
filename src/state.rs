use std::{env, str::FromStr};

use anyhow::Context;

use crate::{prelude::*, sv::Services};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  /// Prefix of the alert headers, e.g. `X-intentApp-alert`.
  pub app_name: String,
  pub request_timeout: Duration,
  /// Interval after which one rate limiter token is replenished.
  pub rate_limit_period: Duration,
  pub rate_limit_burst: u32,
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
  ) -> anyhow::Result<Self> {
    Ok(Self {
      database_url: lookup("DATABASE_URL")
        .unwrap_or_else(|| "sqlite:intent.db?mode=rwc".into()),
      port: parse_var(&lookup, "PORT")?.unwrap_or(8080),
      app_name: lookup("APP_NAME").unwrap_or_else(|| "intentApp".into()),
      request_timeout: duration_var(&lookup, "REQUEST_TIMEOUT")?
        .unwrap_or(Duration::from_secs(30)),
      rate_limit_period: duration_var(&lookup, "RATE_LIMIT_PERIOD")?
        .unwrap_or(Duration::from_millis(500)),
      rate_limit_burst: parse_var(&lookup, "RATE_LIMIT_BURST")?.unwrap_or(100),
    })
  }
}

fn parse_var<T>(
  lookup: &impl Fn(&str) -> Option<String>,
  key: &str,
) -> anyhow::Result<Option<T>>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  lookup(key)
    .map(|raw| raw.trim().parse().with_context(|| format!("Invalid {key}")))
    .transpose()
}

fn duration_var(
  lookup: &impl Fn(&str) -> Option<String>,
  key: &str,
) -> anyhow::Result<Option<Duration>> {
  lookup(key)
    .map(|raw| {
      humantime::parse_duration(raw.trim())
        .with_context(|| format!("Invalid {key}"))
    })
    .transpose()
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    let url = &config.database_url;
    let db = Database::connect(url)
      .await
      .with_context(|| format!("Failed to connect to {url}"))?;

    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    Ok(Self { db, config })
  }

  pub fn sv(&self) -> Services {
    Services::new(&self.db)
  }
}
