use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rd_checkouts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub status: Option<String>,
  pub payment_status: Option<String>,
  pub order_id: Option<String>,
  pub order_delivery_status: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::intent::Entity")]
  Intents,
}

impl Related<super::intent::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Intents.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
  pub id: Option<String>,
  pub status: Option<String>,
  pub payment_status: Option<String>,
  pub order_id: Option<String>,
  pub order_delivery_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
  pub id: Option<String>,
  #[serde(default)]
  pub status: Patch<String>,
  #[serde(default)]
  pub payment_status: Patch<String>,
  #[serde(default)]
  pub order_id: Patch<String>,
  #[serde(default)]
  pub order_delivery_status: Patch<String>,
}

identified!(String => Form, Changes);
identified_model!(String => Model);
