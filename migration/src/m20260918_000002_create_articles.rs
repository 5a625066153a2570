use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Articles::Table)
          .if_not_exists()
          .col(ColumnDef::new(Articles::Id).uuid().not_null().primary_key())
          .col(ColumnDef::new(Articles::Price).decimal_len(16, 2).null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Articles::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Articles {
  Table,
  Id,
  Price,
}
