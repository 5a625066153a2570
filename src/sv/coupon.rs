use async_trait::async_trait;
use uuid::Uuid;

use super::{Repository, absent_if_vanished, money, vanished};
use crate::{entity::coupon, prelude::*};

#[derive(Clone)]
pub struct Coupon {
  db: DatabaseConnection,
}

impl Coupon {
  pub fn new(db: DatabaseConnection) -> Self {
    Self { db }
  }

  async fn write(&self, model: coupon::Model) -> Result<coupon::Model> {
    coupon::ActiveModel {
      id: Set(model.id),
      text: Set(model.text),
      kind: Set(model.kind),
      value: Set(model.value.map(money)),
    }
    .update(&self.db)
    .await
    .map_err(vanished(Self::ENTITY))
  }
}

#[async_trait]
impl Repository for Coupon {
  const ENTITY: &'static str = "coupon";

  type Id = String;
  type Model = coupon::Model;
  type Form = coupon::Form;
  type Changes = coupon::Changes;

  async fn all(&self) -> Result<Vec<coupon::Model>> {
    Ok(
      coupon::Entity::find()
        .order_by_asc(coupon::Column::Id)
        .all(&self.db)
        .await?,
    )
  }

  async fn by_id(&self, id: &String) -> Result<Option<coupon::Model>> {
    Ok(coupon::Entity::find_by_id(id.clone()).one(&self.db).await?)
  }

  async fn exists(&self, id: &String) -> Result<bool> {
    Ok(coupon::Entity::find_by_id(id.clone()).count(&self.db).await? > 0)
  }

  async fn save(&self, form: coupon::Form) -> Result<coupon::Model> {
    let Some(id) = form.id else {
      let coupon = coupon::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        text: Set(form.text),
        kind: Set(form.kind),
        value: Set(form.value.map(money)),
      };
      return Ok(coupon.insert(&self.db).await?);
    };

    self
      .write(coupon::Model {
        id,
        text: form.text,
        kind: form.kind,
        value: form.value,
      })
      .await
  }

  async fn delete(&self, id: &String) -> Result<()> {
    coupon::Entity::delete_by_id(id.clone()).exec(&self.db).await?;
    Ok(())
  }

  async fn merge(
    &self,
    id: &String,
    changes: coupon::Changes,
  ) -> Result<Option<coupon::Model>> {
    let Some(current) = self.by_id(id).await? else {
      return Ok(None);
    };

    absent_if_vanished(
      self
        .write(coupon::Model {
          id: current.id,
          text: changes.text.merge(current.text),
          kind: changes.kind.merge(current.kind),
          value: changes.value.merge(current.value),
        })
        .await,
    )
  }
}
