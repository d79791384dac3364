use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "first_aid_checks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub box_name: String,
    /// ISO-8601 YYYY-MM-DD.
    pub check_date: String,
    pub general_notes: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::check_item::Entity")]
    CheckItems,
}

impl Related<super::check_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CheckItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
