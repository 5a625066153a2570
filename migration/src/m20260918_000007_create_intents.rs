use sea_orm_migration::prelude::*;

use super::{
  m20260918_000001_create_users::Users,
  m20260918_000002_create_articles::Articles,
  m20260918_000003_create_stores::Stores,
  m20260918_000004_create_store_managers::StoreManagers,
  m20260918_000005_create_coupons::Coupons,
  m20260918_000006_create_rd_checkouts::RdCheckouts,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Intents::Table)
          .if_not_exists()
          .col(ColumnDef::new(Intents::Id).uuid().not_null().primary_key())
          .col(ColumnDef::new(Intents::Commission).decimal_len(16, 2).null())
          .col(
            ColumnDef::new(Intents::CreatedTime)
              .timestamp_with_time_zone()
              .not_null(),
          )
          .col(ColumnDef::new(Intents::CreatedBy).string().null())
          .col(
            ColumnDef::new(Intents::UpdatedTime)
              .timestamp_with_time_zone()
              .null(),
          )
          .col(ColumnDef::new(Intents::UpdatedBy).string().null())
          .col(ColumnDef::new(Intents::ArticleId).uuid().null())
          .col(ColumnDef::new(Intents::UserId).big_integer().null())
          .col(ColumnDef::new(Intents::StoreManagerId).uuid().null())
          .col(ColumnDef::new(Intents::StoreId).uuid().null())
          .col(ColumnDef::new(Intents::CouponId).string().null())
          .col(ColumnDef::new(Intents::RdCheckoutId).string().null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_intents_article")
              .from(Intents::Table, Intents::ArticleId)
              .to(Articles::Table, Articles::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_intents_user")
              .from(Intents::Table, Intents::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_intents_store_manager")
              .from(Intents::Table, Intents::StoreManagerId)
              .to(StoreManagers::Table, StoreManagers::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_intents_store")
              .from(Intents::Table, Intents::StoreId)
              .to(Stores::Table, Stores::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_intents_coupon")
              .from(Intents::Table, Intents::CouponId)
              .to(Coupons::Table, Coupons::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_intents_rd_checkout")
              .from(Intents::Table, Intents::RdCheckoutId)
              .to(RdCheckouts::Table, RdCheckouts::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_intents_user")
          .table(Intents::Table)
          .col(Intents::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Intents::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Intents {
  Table,
  Id,
  Commission,
  CreatedTime,
  CreatedBy,
  UpdatedTime,
  UpdatedBy,
  ArticleId,
  UserId,
  StoreManagerId,
  StoreId,
  CouponId,
  RdCheckoutId,
}
