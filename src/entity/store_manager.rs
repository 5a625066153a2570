use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store_managers")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: Uuid,
  pub name: Option<String>,
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
  pub id: Option<Uuid>,
  pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Changes {
  pub id: Option<Uuid>,
  #[serde(default)]
  pub name: Patch<String>,
}

identified!(Uuid => Form, Changes);
identified_model!(Uuid => Model);
