use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, instrument, warn};

use crate::entities::check_item::{self, Entity as CheckItem};
use crate::entities::first_aid_check::{
    self, ActiveModel as CheckActiveModel, Entity as FirstAidCheck,
};
use crate::errors::ServiceError;
use crate::reconcile::ReconciledItem;
use crate::repositories::{BaseRepository, Repository};
use crate::validation::DATE_FORMAT;

/// Field values for the check row of a save unit.
#[derive(Debug, Clone)]
pub struct CheckDraft {
    /// Set when updating an existing check, unset for a first save.
    pub id: Option<i32>,
    pub box_name: String,
    pub check_date: NaiveDate,
    pub general_notes: String,
}

/// Repository owning atomic persistence of a check and its item rows.
#[derive(Debug, Clone)]
pub struct CheckRepository {
    base: BaseRepository,
}

impl CheckRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Writes the check row and its full item set as one atomic unit.
    ///
    /// Inserts a new check row when `draft.id` is unset, otherwise updates the
    /// existing row by id. In both cases every existing item row for the check
    /// is deleted and the supplied set is inserted in its place. The unit
    /// either commits fully or rolls back to the pre-call state; the
    /// transaction handle is released on every exit path.
    #[instrument(skip(self, items), fields(check_id = ?draft.id, box_name = %draft.box_name))]
    pub async fn save(
        &self,
        draft: &CheckDraft,
        items: &[ReconciledItem],
    ) -> Result<i32, ServiceError> {
        let db = self.base.get_db();
        let txn = db.begin().await.map_err(|e| {
            error!("Failed to begin save transaction: {}", e);
            ServiceError::write_failure(e)
        })?;

        let check_id = match draft.id {
            Some(id) => {
                let existing = FirstAidCheck::find_by_id(id)
                    .one(&txn)
                    .await
                    .map_err(ServiceError::write_failure)?
                    .ok_or_else(|| {
                        warn!("Check {} not found for update", id);
                        ServiceError::NotFound(id)
                    })?;

                let mut active: CheckActiveModel = existing.into();
                active.box_name = Set(draft.box_name.clone());
                active.check_date = Set(draft.check_date.format(DATE_FORMAT).to_string());
                active.general_notes = Set(text_column(&draft.general_notes));
                active
                    .update(&txn)
                    .await
                    .map_err(ServiceError::write_failure)?;

                CheckItem::delete_many()
                    .filter(check_item::Column::CheckId.eq(id))
                    .exec(&txn)
                    .await
                    .map_err(ServiceError::write_failure)?;
                id
            }
            None => {
                let active = CheckActiveModel {
                    box_name: Set(draft.box_name.clone()),
                    check_date: Set(draft.check_date.format(DATE_FORMAT).to_string()),
                    general_notes: Set(text_column(&draft.general_notes)),
                    created_at: Set(Utc::now().naive_utc()),
                    ..Default::default()
                };
                let inserted = active
                    .insert(&txn)
                    .await
                    .map_err(ServiceError::write_failure)?;
                inserted.id
            }
        };

        // An empty reconciled set is valid: the check row is kept with no items.
        if !items.is_empty() {
            let rows = items.iter().map(|item| check_item::ActiveModel {
                check_id: Set(check_id),
                item_name: Set(item.item_name.clone()),
                standard_quantity: Set(item.standard_quantity),
                current_quantity: Set(item.current_quantity),
                expiry_date: Set(item.expiry_date.clone()),
                item_notes: Set(text_column(&item.item_notes)),
                ..Default::default()
            });
            CheckItem::insert_many(rows).exec(&txn).await.map_err(|e| {
                error!("Failed to insert item rows for check {}: {}", check_id, e);
                ServiceError::write_failure(e)
            })?;
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit save for check {}: {}", check_id, e);
            ServiceError::write_failure(e)
        })?;
        Ok(check_id)
    }

    /// Fetches a check and its item rows ordered by item name ascending.
    #[instrument(skip(self))]
    pub async fn load(
        &self,
        check_id: i32,
    ) -> Result<(first_aid_check::Model, Vec<check_item::Model>), ServiceError> {
        let db = self.base.get_db();
        let check = FirstAidCheck::find_by_id(check_id)
            .one(db)
            .await
            .map_err(ServiceError::read_failure)?
            .ok_or(ServiceError::NotFound(check_id))?;
        let items = CheckItem::find()
            .filter(check_item::Column::CheckId.eq(check_id))
            .order_by_asc(check_item::Column::ItemName)
            .all(db)
            .await
            .map_err(ServiceError::read_failure)?;
        Ok((check, items))
    }

    /// Deletes a check and all its item rows in one transaction.
    ///
    /// A second delete of the same id reports `NotFound`: callers must not
    /// blindly retry deletes.
    #[instrument(skip(self))]
    pub async fn delete(&self, check_id: i32) -> Result<(), ServiceError> {
        let db = self.base.get_db();
        let txn = db.begin().await.map_err(|e| {
            error!("Failed to begin delete transaction: {}", e);
            ServiceError::write_failure(e)
        })?;

        let check = FirstAidCheck::find_by_id(check_id)
            .one(&txn)
            .await
            .map_err(ServiceError::write_failure)?
            .ok_or_else(|| {
                warn!("Check {} not found for delete", check_id);
                ServiceError::NotFound(check_id)
            })?;

        CheckItem::delete_many()
            .filter(check_item::Column::CheckId.eq(check_id))
            .exec(&txn)
            .await
            .map_err(ServiceError::write_failure)?;
        check
            .delete(&txn)
            .await
            .map_err(ServiceError::write_failure)?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit delete for check {}: {}", check_id, e);
            ServiceError::write_failure(e)
        })?;
        Ok(())
    }

    /// All checks ordered by check date descending, ties in insertion order.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<first_aid_check::Model>, ServiceError> {
        let db = self.base.get_db();
        FirstAidCheck::find()
            .order_by_desc(first_aid_check::Column::CheckDate)
            .order_by_asc(first_aid_check::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::read_failure)
    }
}

fn text_column(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
