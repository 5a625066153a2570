pub use sea_orm_migration::prelude::*;

mod m20260918_000001_create_users;
mod m20260918_000002_create_articles;
mod m20260918_000003_create_stores;
mod m20260918_000004_create_store_managers;
mod m20260918_000005_create_coupons;
mod m20260918_000006_create_rd_checkouts;
mod m20260918_000007_create_intents;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260918_000001_create_users::Migration),
      Box::new(m20260918_000002_create_articles::Migration),
      Box::new(m20260918_000003_create_stores::Migration),
      Box::new(m20260918_000004_create_store_managers::Migration),
      Box::new(m20260918_000005_create_coupons::Migration),
      Box::new(m20260918_000006_create_rd_checkouts::Migration),
      Box::new(m20260918_000007_create_intents::Migration),
    ]
  }
}
