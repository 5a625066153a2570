//! Shared test utilities for database setup

#[cfg(test)]
pub mod test_db {
  use sea_orm::{Database, DatabaseConnection};

  use crate::prelude::*;

  /// Creates an in-memory SQLite database with every migration applied
  pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
  }
}
