use async_trait::async_trait;
use uuid::Uuid;

use super::{Repository, absent_if_vanished, vanished};
use crate::{entity::rd_checkout, prelude::*};

#[derive(Clone)]
pub struct RdCheckout {
  db: DatabaseConnection,
}

impl RdCheckout {
  pub fn new(db: DatabaseConnection) -> Self {
    Self { db }
  }

  async fn write(
    &self,
    model: rd_checkout::Model,
  ) -> Result<rd_checkout::Model> {
    rd_checkout::ActiveModel {
      id: Set(model.id),
      status: Set(model.status),
      payment_status: Set(model.payment_status),
      order_id: Set(model.order_id),
      order_delivery_status: Set(model.order_delivery_status),
    }
    .update(&self.db)
    .await
    .map_err(vanished(Self::ENTITY))
  }
}

#[async_trait]
impl Repository for RdCheckout {
  const ENTITY: &'static str = "rDCheckout";

  type Id = String;
  type Model = rd_checkout::Model;
  type Form = rd_checkout::Form;
  type Changes = rd_checkout::Changes;

  async fn all(&self) -> Result<Vec<rd_checkout::Model>> {
    Ok(
      rd_checkout::Entity::find()
        .order_by_asc(rd_checkout::Column::Id)
        .all(&self.db)
        .await?,
    )
  }

  async fn by_id(&self, id: &String) -> Result<Option<rd_checkout::Model>> {
    Ok(rd_checkout::Entity::find_by_id(id.clone()).one(&self.db).await?)
  }

  async fn exists(&self, id: &String) -> Result<bool> {
    Ok(rd_checkout::Entity::find_by_id(id.clone()).count(&self.db).await? > 0)
  }

  async fn save(&self, form: rd_checkout::Form) -> Result<rd_checkout::Model> {
    let Some(id) = form.id else {
      let checkout = rd_checkout::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        status: Set(form.status),
        payment_status: Set(form.payment_status),
        order_id: Set(form.order_id),
        order_delivery_status: Set(form.order_delivery_status),
      };
      return Ok(checkout.insert(&self.db).await?);
    };

    self
      .write(rd_checkout::Model {
        id,
        status: form.status,
        payment_status: form.payment_status,
        order_id: form.order_id,
        order_delivery_status: form.order_delivery_status,
      })
      .await
  }

  async fn delete(&self, id: &String) -> Result<()> {
    rd_checkout::Entity::delete_by_id(id.clone()).exec(&self.db).await?;
    Ok(())
  }

  async fn merge(
    &self,
    id: &String,
    changes: rd_checkout::Changes,
  ) -> Result<Option<rd_checkout::Model>> {
    let Some(current) = self.by_id(id).await? else {
      return Ok(None);
    };

    absent_if_vanished(
      self
        .write(rd_checkout::Model {
          id: current.id,
          status: changes.status.merge(current.status),
          payment_status: changes.payment_status.merge(current.payment_status),
          order_id: changes.order_id.merge(current.order_id),
          order_delivery_status: changes
            .order_delivery_status
            .merge(current.order_delivery_status),
        })
        .await,
    )
  }
}
