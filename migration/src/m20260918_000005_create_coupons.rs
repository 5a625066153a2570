use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Coupons::Table)
          .if_not_exists()
          .col(ColumnDef::new(Coupons::Id).string().not_null().primary_key())
          .col(ColumnDef::new(Coupons::Text).string().null())
          // PERCENT | FIXED
          .col(ColumnDef::new(Coupons::Type).string_len(16).null())
          .col(ColumnDef::new(Coupons::Value).decimal_len(16, 2).null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Coupons::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Coupons {
  Table,
  Id,
  Text,
  Type,
  Value,
}
