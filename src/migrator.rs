use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_first_aid_checks_table::Migration),
            Box::new(m20240601_000002_create_check_items_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240601_000001_create_first_aid_checks_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_first_aid_checks_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FirstAidChecks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FirstAidChecks::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(FirstAidChecks::BoxName).string().not_null())
                        .col(
                            ColumnDef::new(FirstAidChecks::CheckDate)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FirstAidChecks::GeneralNotes).string())
                        .col(
                            ColumnDef::new(FirstAidChecks::CreatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FirstAidChecks::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum FirstAidChecks {
        Table,
        Id,
        BoxName,
        CheckDate,
        GeneralNotes,
        CreatedAt,
    }
}

mod m20240601_000002_create_check_items_table {

    use sea_orm_migration::prelude::*;

    use super::m20240601_000001_create_first_aid_checks_table::FirstAidChecks;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_check_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CheckItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CheckItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(CheckItems::CheckId).integer().not_null())
                        .col(ColumnDef::new(CheckItems::ItemName).string().not_null())
                        .col(
                            ColumnDef::new(CheckItems::StandardQuantity)
                                .integer()
                                .not_null()
                                .check(Expr::col(CheckItems::StandardQuantity).gte(0)),
                        )
                        .col(
                            ColumnDef::new(CheckItems::CurrentQuantity)
                                .integer()
                                .not_null()
                                .check(Expr::col(CheckItems::CurrentQuantity).gte(0)),
                        )
                        .col(ColumnDef::new(CheckItems::ExpiryDate).string())
                        .col(ColumnDef::new(CheckItems::ItemNotes).string())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_check_items_check_id")
                                .from(CheckItems::Table, CheckItems::CheckId)
                                .to(FirstAidChecks::Table, FirstAidChecks::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_check_items_check_id")
                        .table(CheckItems::Table)
                        .col(CheckItems::CheckId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CheckItems::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum CheckItems {
        Table,
        Id,
        CheckId,
        ItemName,
        StandardQuantity,
        CurrentQuantity,
        ExpiryDate,
        ItemNotes,
    }
}
