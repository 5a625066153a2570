use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
#[serde(rename_all = "camelCase")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: Uuid,
  #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
  #[serde(serialize_with = "super::money::serialize")]
  pub price: Option<Decimal>,
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
  pub id: Option<Uuid>,
  pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
  pub id: Option<Uuid>,
  #[serde(default)]
  pub price: Patch<Decimal>,
}

identified!(Uuid => Form, Changes);
identified_model!(Uuid => Model);
