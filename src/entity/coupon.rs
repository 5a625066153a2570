use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum CouponType {
  #[sea_orm(string_value = "PERCENT")]
  Percent,
  #[sea_orm(string_value = "FIXED")]
  Fixed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub text: Option<String>,
  #[sea_orm(column_name = "type")]
  #[serde(rename = "type")]
  pub kind: Option<CouponType>,
  #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
  #[serde(serialize_with = "super::money::serialize")]
  pub value: Option<Decimal>,
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
pub struct Form {
  pub id: Option<String>,
  pub text: Option<String>,
  #[serde(rename = "type")]
  pub kind: Option<CouponType>,
  pub value: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Changes {
  pub id: Option<String>,
  #[serde(default)]
  pub text: Patch<String>,
  #[serde(default, rename = "type")]
  pub kind: Patch<CouponType>,
  #[serde(default)]
  pub value: Patch<Decimal>,
}

identified!(String => Form, Changes);
identified_model!(String => Model);
