use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(RdCheckouts::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(RdCheckouts::Id).string().not_null().primary_key(),
          )
          .col(ColumnDef::new(RdCheckouts::Status).string().null())
          .col(ColumnDef::new(RdCheckouts::PaymentStatus).string().null())
          .col(ColumnDef::new(RdCheckouts::OrderId).string().null())
          .col(ColumnDef::new(RdCheckouts::OrderDeliveryStatus).string().null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(RdCheckouts::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum RdCheckouts {
  Table,
  Id,
  Status,
  PaymentStatus,
  OrderId,
  OrderDeliveryStatus,
}
