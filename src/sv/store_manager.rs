use async_trait::async_trait;
use uuid::Uuid;

use super::{Repository, absent_if_vanished, vanished};
use crate::{entity::store_manager, prelude::*};

#[derive(Clone)]
pub struct StoreManager {
  db: DatabaseConnection,
}

impl StoreManager {
  pub fn new(db: DatabaseConnection) -> Self {
    Self { db }
  }

  async fn write(
    &self,
    model: store_manager::Model,
  ) -> Result<store_manager::Model> {
    store_manager::ActiveModel { id: Set(model.id), name: Set(model.name) }
      .update(&self.db)
      .await
      .map_err(vanished(Self::ENTITY))
  }
}

#[async_trait]
impl Repository for StoreManager {
  const ENTITY: &'static str = "storeManager";

  type Id = Uuid;
  type Model = store_manager::Model;
  type Form = store_manager::Form;
  type Changes = store_manager::Changes;

  async fn all(&self) -> Result<Vec<store_manager::Model>> {
    Ok(
      store_manager::Entity::find()
        .order_by_asc(store_manager::Column::Id)
        .all(&self.db)
        .await?,
    )
  }

  async fn by_id(&self, id: &Uuid) -> Result<Option<store_manager::Model>> {
    Ok(store_manager::Entity::find_by_id(*id).one(&self.db).await?)
  }

  async fn exists(&self, id: &Uuid) -> Result<bool> {
    Ok(store_manager::Entity::find_by_id(*id).count(&self.db).await? > 0)
  }

  async fn save(
    &self,
    form: store_manager::Form,
  ) -> Result<store_manager::Model> {
    match form.id {
      None => Ok(
        store_manager::ActiveModel {
          id: Set(Uuid::new_v4()),
          name: Set(form.name),
        }
        .insert(&self.db)
        .await?,
      ),
      Some(id) => {
        self.write(store_manager::Model { id, name: form.name }).await
      }
    }
  }

  async fn delete(&self, id: &Uuid) -> Result<()> {
    store_manager::Entity::delete_by_id(*id).exec(&self.db).await?;
    Ok(())
  }

  async fn merge(
    &self,
    id: &Uuid,
    changes: store_manager::Changes,
  ) -> Result<Option<store_manager::Model>> {
    let Some(current) = self.by_id(id).await? else {
      return Ok(None);
    };

    absent_if_vanished(
      self
        .write(store_manager::Model {
          id: current.id,
          name: changes.name.merge(current.name),
        })
        .await,
    )
  }
}
