pub mod article;
pub mod coupon;
pub mod intent;
pub mod rd_checkout;
pub mod store;
pub mod store_manager;
#[cfg(test)]
pub mod test_utils;
pub mod user;

use std::fmt;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::DbErr;
use serde::{Serialize, de::DeserializeOwned};

pub use article::Article;
pub use coupon::Coupon;
pub use intent::Intent;
pub use rd_checkout::RdCheckout;
pub use store::Store;
pub use store_manager::StoreManager;
pub use user::User;

use crate::{entity::Identified, prelude::*};

/// Persistence contract shared by every REST exposed entity.
///
/// `save` inserts with a freshly generated id when the form carries none
/// and overwrites every column otherwise. `delete` is idempotent.
#[async_trait]
pub trait Repository: Clone + Send + Sync + 'static {
  /// Entity name used in alerts and error bodies.
  const ENTITY: &'static str;

  type Id: Clone
    + PartialEq
    + fmt::Display
    + fmt::Debug
    + DeserializeOwned
    + Send
    + Sync
    + 'static;
  type Model: Identified<Id = Self::Id> + Serialize + Send + 'static;
  type Form: Identified<Id = Self::Id>
    + DeserializeOwned
    + fmt::Debug
    + Send
    + 'static;
  type Changes: Identified<Id = Self::Id>
    + DeserializeOwned
    + fmt::Debug
    + Send
    + 'static;

  async fn all(&self) -> Result<Vec<Self::Model>>;

  async fn by_id(&self, id: &Self::Id) -> Result<Option<Self::Model>>;

  async fn exists(&self, id: &Self::Id) -> Result<bool>;

  async fn save(&self, form: Self::Form) -> Result<Self::Model>;

  async fn delete(&self, id: &Self::Id) -> Result<()>;

  /// Applies the present fields of `changes` to the stored row.
  /// Returns `None` when no row with `id` exists.
  async fn merge(
    &self,
    id: &Self::Id,
    changes: Self::Changes,
  ) -> Result<Option<Self::Model>>;
}

#[derive(Clone)]
pub struct Services {
  pub article: Article,
  pub coupon: Coupon,
  pub intent: Intent,
  pub rd_checkout: RdCheckout,
  pub store: Store,
  pub store_manager: StoreManager,
  pub user: User,
}

impl Services {
  pub fn new(db: &DatabaseConnection) -> Self {
    Self {
      article: Article::new(db.clone()),
      coupon: Coupon::new(db.clone()),
      intent: Intent::new(db.clone()),
      rd_checkout: RdCheckout::new(db.clone()),
      store: Store::new(db.clone()),
      store_manager: StoreManager::new(db.clone()),
      user: User::new(db.clone()),
    }
  }
}

/// Monetary columns are stored with two decimal places, half away from zero.
pub(crate) fn money(value: Decimal) -> Decimal {
  value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Maps the "no row updated" failure of an overwrite to a not-found error.
pub(crate) fn vanished(entity: &'static str) -> impl FnOnce(DbErr) -> Error {
  move |err| match err {
    DbErr::RecordNotUpdated => Error::NotFound(entity),
    err => Error::Db(err),
  }
}

/// Turns a not-found failure of a merge into an absent result.
pub(crate) fn absent_if_vanished<T>(result: Result<T>) -> Result<Option<T>> {
  match result {
    Ok(model) => Ok(Some(model)),
    Err(Error::NotFound(_)) => Ok(None),
    Err(err) => Err(err),
  }
}
