use async_trait::async_trait;
use uuid::Uuid;

use super::{Repository, absent_if_vanished, vanished};
use crate::{entity::store, prelude::*};

#[derive(Clone)]
pub struct Store {
  db: DatabaseConnection,
}

impl Store {
  pub fn new(db: DatabaseConnection) -> Self {
    Self { db }
  }

  async fn write(&self, model: store::Model) -> Result<store::Model> {
    store::ActiveModel { id: Set(model.id), name: Set(model.name) }
      .update(&self.db)
      .await
      .map_err(vanished(Self::ENTITY))
  }
}

#[async_trait]
impl Repository for Store {
  const ENTITY: &'static str = "store";

  type Id = Uuid;
  type Model = store::Model;
  type Form = store::Form;
  type Changes = store::Changes;

  async fn all(&self) -> Result<Vec<store::Model>> {
    Ok(
      store::Entity::find()
        .order_by_asc(store::Column::Id)
        .all(&self.db)
        .await?,
    )
  }

  async fn by_id(&self, id: &Uuid) -> Result<Option<store::Model>> {
    Ok(store::Entity::find_by_id(*id).one(&self.db).await?)
  }

  async fn exists(&self, id: &Uuid) -> Result<bool> {
    Ok(store::Entity::find_by_id(*id).count(&self.db).await? > 0)
  }

  async fn save(&self, form: store::Form) -> Result<store::Model> {
    match form.id {
      None => Ok(
        store::ActiveModel { id: Set(Uuid::new_v4()), name: Set(form.name) }
          .insert(&self.db)
          .await?,
      ),
      Some(id) => self.write(store::Model { id, name: form.name }).await,
    }
  }

  async fn delete(&self, id: &Uuid) -> Result<()> {
    store::Entity::delete_by_id(*id).exec(&self.db).await?;
    Ok(())
  }

  async fn merge(
    &self,
    id: &Uuid,
    changes: store::Changes,
  ) -> Result<Option<store::Model>> {
    let Some(current) = self.by_id(id).await? else {
      return Ok(None);
    };

    absent_if_vanished(
      self
        .write(store::Model {
          id: current.id,
          name: changes.name.merge(current.name),
        })
        .await,
    )
  }
}
