use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, ModelTrait};
use uuid::Uuid;

use super::{Repository, absent_if_vanished, money, vanished};
use crate::{
  entity::{
    Patch, article, coupon, intent, rd_checkout, store, store_manager, user,
  },
  prelude::*,
};

#[derive(Clone)]
pub struct Intent {
  db: DatabaseConnection,
}

impl Intent {
  pub fn new(db: DatabaseConnection) -> Self {
    Self { db }
  }

  /// Loads the intent together with every record it references.
  pub async fn details(&self, id: &Uuid) -> Result<Option<intent::Details>> {
    let Some(intent) = self.by_id(id).await? else {
      return Ok(None);
    };

    Ok(Some(intent::Details {
      article: intent.find_related(article::Entity).one(&self.db).await?,
      user: intent.find_related(user::Entity).one(&self.db).await?,
      store_manager: intent
        .find_related(store_manager::Entity)
        .one(&self.db)
        .await?,
      store: intent.find_related(store::Entity).one(&self.db).await?,
      coupon: intent.find_related(coupon::Entity).one(&self.db).await?,
      rd_checkout: intent
        .find_related(rd_checkout::Entity)
        .one(&self.db)
        .await?,
      intent,
    }))
  }

  /// Intents attributed to the user with the given login.
  pub async fn by_user_login(&self, login: &str) -> Result<Vec<intent::Model>> {
    Ok(
      intent::Entity::find()
        .inner_join(user::Entity)
        .filter(user::Column::Login.eq(login.to_lowercase()))
        .order_by_asc(intent::Column::Id)
        .all(&self.db)
        .await?,
    )
  }

  async fn persist(
    &self,
    model: intent::Model,
    is_new: bool,
  ) -> Result<intent::Model> {
    let txn = self.db.begin().await?;

    Self::ensure_references(&txn, &model).await?;

    let active = intent::ActiveModel {
      id: Set(model.id),
      commission: Set(model.commission.map(money)),
      created_time: Set(model.created_time),
      created_by: Set(model.created_by),
      updated_time: Set(model.updated_time),
      updated_by: Set(model.updated_by),
      article_id: Set(model.article_id),
      user_id: Set(model.user_id),
      store_manager_id: Set(model.store_manager_id),
      store_id: Set(model.store_id),
      coupon_id: Set(model.coupon_id),
      rd_checkout_id: Set(model.rd_checkout_id),
    };

    let saved = if is_new {
      active.insert(&txn).await?
    } else {
      active.update(&txn).await.map_err(vanished(Self::ENTITY))?
    };

    txn.commit().await?;
    Ok(saved)
  }

  async fn ensure_references(
    txn: &DatabaseTransaction,
    model: &intent::Model,
  ) -> Result<()> {
    let dangling = |field| Error::dangling(Self::ENTITY, field);

    if let Some(id) = model.article_id
      && article::Entity::find_by_id(id).count(txn).await? == 0
    {
      return Err(dangling("articleId"));
    }
    if let Some(id) = model.user_id
      && user::Entity::find_by_id(id).count(txn).await? == 0
    {
      return Err(dangling("userId"));
    }
    if let Some(id) = model.store_manager_id
      && store_manager::Entity::find_by_id(id).count(txn).await? == 0
    {
      return Err(dangling("storeManagerId"));
    }
    if let Some(id) = model.store_id
      && store::Entity::find_by_id(id).count(txn).await? == 0
    {
      return Err(dangling("storeId"));
    }
    if let Some(id) = &model.coupon_id
      && coupon::Entity::find_by_id(id.clone()).count(txn).await? == 0
    {
      return Err(dangling("couponId"));
    }
    if let Some(id) = &model.rd_checkout_id
      && rd_checkout::Entity::find_by_id(id.clone()).count(txn).await? == 0
    {
      return Err(dangling("rdCheckoutId"));
    }

    Ok(())
  }
}

#[async_trait]
impl Repository for Intent {
  const ENTITY: &'static str = "intent";

  type Id = Uuid;
  type Model = intent::Model;
  type Form = intent::Form;
  type Changes = intent::Changes;

  async fn all(&self) -> Result<Vec<intent::Model>> {
    Ok(
      intent::Entity::find()
        .order_by_asc(intent::Column::Id)
        .all(&self.db)
        .await?,
    )
  }

  async fn by_id(&self, id: &Uuid) -> Result<Option<intent::Model>> {
    Ok(intent::Entity::find_by_id(*id).one(&self.db).await?)
  }

  async fn exists(&self, id: &Uuid) -> Result<bool> {
    Ok(intent::Entity::find_by_id(*id).count(&self.db).await? > 0)
  }

  async fn save(&self, form: intent::Form) -> Result<intent::Model> {
    let created_time = form
      .created_time
      .ok_or(Error::required(Self::ENTITY, "createdTime"))?;

    let model = intent::Model {
      id: form.id.unwrap_or_else(Uuid::new_v4),
      commission: form.commission,
      created_time,
      created_by: form.created_by,
      updated_time: form.updated_time,
      updated_by: form.updated_by,
      article_id: form.article_id,
      user_id: form.user_id,
      store_manager_id: form.store_manager_id,
      store_id: form.store_id,
      coupon_id: form.coupon_id,
      rd_checkout_id: form.rd_checkout_id,
    };

    self.persist(model, form.id.is_none()).await
  }

  async fn delete(&self, id: &Uuid) -> Result<()> {
    intent::Entity::delete_by_id(*id).exec(&self.db).await?;
    Ok(())
  }

  async fn merge(
    &self,
    id: &Uuid,
    changes: intent::Changes,
  ) -> Result<Option<intent::Model>> {
    let created_time = match changes.created_time {
      Patch::Clear => {
        return Err(Error::required(Self::ENTITY, "createdTime"));
      }
      created_time => created_time,
    };

    let Some(current) = self.by_id(id).await? else {
      return Ok(None);
    };

    let model = intent::Model {
      id: current.id,
      commission: changes.commission.merge(current.commission),
      created_time: created_time
        .merge(Some(current.created_time))
        .unwrap_or(current.created_time),
      created_by: changes.created_by.merge(current.created_by),
      updated_time: changes.updated_time.merge(current.updated_time),
      updated_by: changes.updated_by.merge(current.updated_by),
      article_id: changes.article_id.merge(current.article_id),
      user_id: changes.user_id.merge(current.user_id),
      store_manager_id: changes
        .store_manager_id
        .merge(current.store_manager_id),
      store_id: changes.store_id.merge(current.store_id),
      coupon_id: changes.coupon_id.merge(current.coupon_id),
      rd_checkout_id: changes.rd_checkout_id.merge(current.rd_checkout_id),
    };

    absent_if_vanished(self.persist(model, false).await)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{DateTime, TimeZone};
  use rust_decimal::Decimal;

  use super::*;
  use crate::{
    entity::CouponType,
    sv::{Services, test_utils::test_db},
  };

  fn epoch() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(0).unwrap()
  }

  fn form() -> intent::Form {
    intent::Form {
      commission: Some(Decimal::from(1)),
      created_time: Some(epoch()),
      created_by: Some("AAAAAAAAAA".into()),
      updated_time: Some(epoch()),
      updated_by: Some("AAAAAAAAAA".into()),
      ..Default::default()
    }
  }

  #[tokio::test]
  async fn test_create_intent() {
    let db = test_db::setup().await;
    let sv = Intent::new(db);

    let intent = sv.save(form()).await.unwrap();

    assert_eq!(intent.created_time, epoch());
    assert_eq!(intent.commission, Some(Decimal::from(1)));
    assert_eq!(sv.by_id(&intent.id).await.unwrap(), Some(intent));
  }

  #[tokio::test]
  async fn test_created_time_is_required() {
    let db = test_db::setup().await;
    let sv = Intent::new(db);

    let result =
      sv.save(intent::Form { created_time: None, ..form() }).await;

    assert!(matches!(
      result,
      Err(Error::Validation { field: "createdTime", .. })
    ));
    assert!(sv.all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_merge_cannot_clear_created_time() {
    let db = test_db::setup().await;
    let sv = Intent::new(db);

    let intent = sv.save(form()).await.unwrap();
    let result = sv
      .merge(
        &intent.id,
        intent::Changes { created_time: Patch::Clear, ..Default::default() },
      )
      .await;

    assert!(matches!(result, Err(Error::Validation { .. })));
    assert_eq!(sv.by_id(&intent.id).await.unwrap(), Some(intent));
  }

  #[tokio::test]
  async fn test_dangling_reference_rejected() {
    let db = test_db::setup().await;
    let sv = Intent::new(db);

    let result = sv
      .save(intent::Form { store_id: Some(Uuid::new_v4()), ..form() })
      .await;

    assert!(matches!(
      result,
      Err(Error::Validation { field: "storeId", reason: "refnotfound", .. })
    ));
  }

  #[tokio::test]
  async fn test_details_resolve_references() {
    let db = test_db::setup().await;
    let sv = Services::new(&db);

    let user = sv.user.create("alice").await.unwrap();
    let store = sv
      .store
      .save(store::Form { id: None, name: Some("north".into()) })
      .await
      .unwrap();
    let coupon = sv
      .coupon
      .save(coupon::Form {
        kind: Some(CouponType::Fixed),
        value: Some(Decimal::from(5)),
        ..Default::default()
      })
      .await
      .unwrap();

    let intent = sv
      .intent
      .save(intent::Form {
        user_id: Some(user.id),
        store_id: Some(store.id),
        coupon_id: Some(coupon.id.clone()),
        ..form()
      })
      .await
      .unwrap();

    let details = sv.intent.details(&intent.id).await.unwrap().unwrap();
    assert_eq!(details.intent, intent);
    assert_eq!(details.user, Some(user));
    assert_eq!(details.store, Some(store));
    assert_eq!(details.coupon, Some(coupon));
    assert_eq!(details.article, None);
    assert_eq!(details.store_manager, None);
    assert_eq!(details.rd_checkout, None);
  }

  #[tokio::test]
  async fn test_deleted_reference_is_cleared() {
    let db = test_db::setup().await;
    let sv = Services::new(&db);

    let store = sv
      .store
      .save(store::Form { id: None, name: Some("north".into()) })
      .await
      .unwrap();
    let intent = sv
      .intent
      .save(intent::Form { store_id: Some(store.id), ..form() })
      .await
      .unwrap();

    sv.store.delete(&store.id).await.unwrap();

    let intent = sv.intent.by_id(&intent.id).await.unwrap().unwrap();
    assert_eq!(intent.store_id, None);
  }

  #[tokio::test]
  async fn test_merge_detaches_reference() {
    let db = test_db::setup().await;
    let sv = Services::new(&db);

    let store = sv
      .store
      .save(store::Form { id: None, name: Some("north".into()) })
      .await
      .unwrap();
    let intent = sv
      .intent
      .save(intent::Form { store_id: Some(store.id), ..form() })
      .await
      .unwrap();

    let merged = sv
      .intent
      .merge(
        &intent.id,
        intent::Changes {
          store_id: Patch::Clear,
          updated_by: Patch::Set("BBBBBBBBBB".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap()
      .unwrap();

    assert_eq!(merged.store_id, None);
    assert_eq!(merged.updated_by.as_deref(), Some("BBBBBBBBBB"));
    assert_eq!(merged.created_by, intent.created_by);
    assert_eq!(merged.created_time, intent.created_time);
  }

  #[tokio::test]
  async fn test_by_user_login() {
    let db = test_db::setup().await;
    let sv = Services::new(&db);

    let alice = sv.user.create("alice").await.unwrap();
    let bob = sv.user.create("bob").await.unwrap();

    let mine = sv
      .intent
      .save(intent::Form { user_id: Some(alice.id), ..form() })
      .await
      .unwrap();
    sv.intent
      .save(intent::Form { user_id: Some(bob.id), ..form() })
      .await
      .unwrap();
    sv.intent.save(form()).await.unwrap();

    assert_eq!(sv.intent.by_user_login("alice").await.unwrap(), vec![mine]);
    assert!(sv.intent.by_user_login("carol").await.unwrap().is_empty());
  }
}
