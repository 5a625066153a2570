use async_trait::async_trait;
use uuid::Uuid;

use super::{Repository, absent_if_vanished, money, vanished};
use crate::{entity::article, prelude::*};

#[derive(Clone)]
pub struct Article {
  db: DatabaseConnection,
}

impl Article {
  pub fn new(db: DatabaseConnection) -> Self {
    Self { db }
  }

  async fn write(&self, model: article::Model) -> Result<article::Model> {
    article::ActiveModel {
      id: Set(model.id),
      price: Set(model.price.map(money)),
    }
      .update(&self.db)
      .await
      .map_err(vanished(Self::ENTITY))
  }
}

#[async_trait]
impl Repository for Article {
  const ENTITY: &'static str = "article";

  type Id = Uuid;
  type Model = article::Model;
  type Form = article::Form;
  type Changes = article::Changes;

  async fn all(&self) -> Result<Vec<article::Model>> {
    Ok(
      article::Entity::find()
        .order_by_asc(article::Column::Id)
        .all(&self.db)
        .await?,
    )
  }

  async fn by_id(&self, id: &Uuid) -> Result<Option<article::Model>> {
    Ok(article::Entity::find_by_id(*id).one(&self.db).await?)
  }

  async fn exists(&self, id: &Uuid) -> Result<bool> {
    Ok(article::Entity::find_by_id(*id).count(&self.db).await? > 0)
  }

  async fn save(&self, form: article::Form) -> Result<article::Model> {
    match form.id {
      None => Ok(
        article::ActiveModel {
          id: Set(Uuid::new_v4()),
          price: Set(form.price.map(money)),
        }
        .insert(&self.db)
        .await?,
      ),
      Some(id) => self.write(article::Model { id, price: form.price }).await,
    }
  }

  async fn delete(&self, id: &Uuid) -> Result<()> {
    article::Entity::delete_by_id(*id).exec(&self.db).await?;
    Ok(())
  }

  async fn merge(
    &self,
    id: &Uuid,
    changes: article::Changes,
  ) -> Result<Option<article::Model>> {
    let Some(current) = self.by_id(id).await? else {
      return Ok(None);
    };

    absent_if_vanished(
      self
        .write(article::Model {
          id: current.id,
          price: changes.price.merge(current.price),
        })
        .await,
    )
  }
}
