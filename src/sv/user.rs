use crate::{entity::user, prelude::*};

#[derive(Clone)]
pub struct User {
  db: DatabaseConnection,
}

impl User {
  pub fn new(db: DatabaseConnection) -> Self {
    Self { db }
  }

  /// Users are provisioned outside this service, tests seed them here.
  #[cfg(test)]
  pub async fn create(&self, login: &str) -> Result<user::Model> {
    let user = user::ActiveModel {
      id: sea_orm::ActiveValue::NotSet,
      login: Set(login.to_lowercase()),
    };
    Ok(user.insert(&self.db).await?)
  }

  pub async fn by_login(&self, login: &str) -> Result<Option<user::Model>> {
    let user = user::Entity::find()
      .filter(user::Column::Login.eq(login.to_lowercase()))
      .one(&self.db)
      .await?;
    Ok(user)
  }
}
