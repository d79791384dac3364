use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "check_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub check_id: i32,
    pub item_name: String,
    /// Catalog value snapshotted at save time.
    pub standard_quantity: i32,
    pub current_quantity: i32,
    /// ISO-8601 YYYY-MM-DD, absent when no expiry is tracked for the item.
    pub expiry_date: Option<String>,
    pub item_notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::first_aid_check::Entity",
        from = "Column::CheckId",
        to = "super::first_aid_check::Column::Id"
    )]
    FirstAidCheck,
}

impl Related<super::first_aid_check::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FirstAidCheck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
