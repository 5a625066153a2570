pub use std::{sync::Arc, time::Duration};

pub use chrono::Utc;
pub use migration::{Migrator, MigratorTrait};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait,
  PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
pub use tracing::{debug, error, info};

pub use crate::error::{Error, Result};
