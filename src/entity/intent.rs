use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Patch, article, coupon, rd_checkout, store, store_manager, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "intents")]
#[serde(rename_all = "camelCase")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: Uuid,
  #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
  #[serde(serialize_with = "super::money::serialize")]
  pub commission: Option<Decimal>,
  pub created_time: DateTimeUtc,
  pub created_by: Option<String>,
  pub updated_time: Option<DateTimeUtc>,
  pub updated_by: Option<String>,
  pub article_id: Option<Uuid>,
  pub user_id: Option<i64>,
  pub store_manager_id: Option<Uuid>,
  pub store_id: Option<Uuid>,
  pub coupon_id: Option<String>,
  pub rd_checkout_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "article::Entity",
    from = "Column::ArticleId",
    to = "article::Column::Id",
    on_delete = "SetNull"
  )]
  Article,
  #[sea_orm(
    belongs_to = "user::Entity",
    from = "Column::UserId",
    to = "user::Column::Id",
    on_delete = "SetNull"
  )]
  User,
  #[sea_orm(
    belongs_to = "store_manager::Entity",
    from = "Column::StoreManagerId",
    to = "store_manager::Column::Id",
    on_delete = "SetNull"
  )]
  StoreManager,
  #[sea_orm(
    belongs_to = "store::Entity",
    from = "Column::StoreId",
    to = "store::Column::Id",
    on_delete = "SetNull"
  )]
  Store,
  #[sea_orm(
    belongs_to = "coupon::Entity",
    from = "Column::CouponId",
    to = "coupon::Column::Id",
    on_delete = "SetNull"
  )]
  Coupon,
  #[sea_orm(
    belongs_to = "rd_checkout::Entity",
    from = "Column::RdCheckoutId",
    to = "rd_checkout::Column::Id",
    on_delete = "SetNull"
  )]
  RdCheckout,
}

impl Related<article::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Article.def()
  }
}

impl Related<user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<store_manager::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::StoreManager.def()
  }
}

impl Related<store::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Store.def()
  }
}

impl Related<coupon::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Coupon.def()
  }
}

impl Related<rd_checkout::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::RdCheckout.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
  pub id: Option<Uuid>,
  pub commission: Option<Decimal>,
  pub created_time: Option<DateTimeUtc>,
  pub created_by: Option<String>,
  pub updated_time: Option<DateTimeUtc>,
  pub updated_by: Option<String>,
  pub article_id: Option<Uuid>,
  pub user_id: Option<i64>,
  pub store_manager_id: Option<Uuid>,
  pub store_id: Option<Uuid>,
  pub coupon_id: Option<String>,
  pub rd_checkout_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
  pub id: Option<Uuid>,
  #[serde(default)]
  pub commission: Patch<Decimal>,
  #[serde(default)]
  pub created_time: Patch<DateTimeUtc>,
  #[serde(default)]
  pub created_by: Patch<String>,
  #[serde(default)]
  pub updated_time: Patch<DateTimeUtc>,
  #[serde(default)]
  pub updated_by: Patch<String>,
  #[serde(default)]
  pub article_id: Patch<Uuid>,
  #[serde(default)]
  pub user_id: Patch<i64>,
  #[serde(default)]
  pub store_manager_id: Patch<Uuid>,
  #[serde(default)]
  pub store_id: Patch<Uuid>,
  #[serde(default)]
  pub coupon_id: Patch<String>,
  #[serde(default)]
  pub rd_checkout_id: Patch<String>,
}

/// An intent together with every record it references.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
  #[serde(flatten)]
  pub intent: Model,
  pub article: Option<article::Model>,
  pub user: Option<user::Model>,
  pub store_manager: Option<store_manager::Model>,
  pub store: Option<store::Model>,
  pub coupon: Option<coupon::Model>,
  pub rd_checkout: Option<rd_checkout::Model>,
}

identified!(Uuid => Form, Changes);
identified_model!(Uuid => Model);
