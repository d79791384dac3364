use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::catalog;
use crate::entities::first_aid_check;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::reconcile::{self, PersistedItem, ReconciledItem};
use crate::repositories::check_repository::{CheckDraft, CheckRepository};
use crate::status::{self, ExpiryStatus, StockStatus};
use crate::validation;

/// Raw field values collected by the caller for one item row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItemInput {
    pub item_name: String,
    pub quantity: String,
    pub expiry_date: String,
    pub item_notes: String,
}

/// Raw field values for one check submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitCheck {
    /// Set when editing an existing check, unset for a first save.
    pub check_id: Option<i32>,
    pub box_name: String,
    /// YYYY-MM-DD; empty defaults to today.
    pub check_date: String,
    pub general_notes: String,
    pub items: Vec<RawItemInput>,
}

/// One item row annotated with derived status for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedItem {
    pub item_name: String,
    pub standard_quantity: i32,
    pub current_quantity: i32,
    pub expiry_date: Option<String>,
    pub item_notes: String,
    pub stock_status: StockStatus,
    pub expiry_status: ExpiryStatus,
}

/// Summary row for the check history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub id: i32,
    pub box_name: String,
    pub check_date: String,
    pub general_notes: String,
}

impl From<first_aid_check::Model> for CheckSummary {
    fn from(model: first_aid_check::Model) -> Self {
        Self {
            id: model.id,
            box_name: model.box_name,
            check_date: model.check_date,
            general_notes: model.general_notes.unwrap_or_default(),
        }
    }
}

/// A loaded check with its stored item rows annotated for display.
#[derive(Debug, Clone, Serialize)]
pub struct CheckDetails {
    pub check: first_aid_check::Model,
    pub items: Vec<AnnotatedItem>,
}

/// Service exposing the check record lifecycle to the presentation layer.
#[derive(Clone)]
pub struct CheckService {
    repository: CheckRepository,
    event_sender: EventSender,
}

impl CheckService {
    /// Creates a new check service instance
    pub fn new(db_pool: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self {
            repository: CheckRepository::new(db_pool),
            event_sender,
        }
    }

    /// Validates a raw submission and persists the check with its item rows.
    ///
    /// Each item row stores the catalog standard quantity as of now, so the
    /// record stays interpretable if the catalog changes later.
    #[instrument(skip(self, input), fields(check_id = ?input.check_id, box_name = %input.box_name))]
    pub async fn submit_check(&self, input: SubmitCheck) -> Result<i32, ServiceError> {
        let box_name = validation::validate_box_name(&input.box_name)?;
        let today = Utc::now().date_naive();
        let check_date = validation::parse_check_date(&input.check_date, today)?;

        let mut items = Vec::with_capacity(input.items.len());
        for raw in &input.items {
            let current_quantity = validation::parse_quantity(&raw.item_name, &raw.quantity)?;
            let expiry = validation::parse_expiry_date(&raw.item_name, &raw.expiry_date)?;
            items.push(ReconciledItem {
                item_name: raw.item_name.clone(),
                standard_quantity: catalog::standard_quantity(&raw.item_name),
                current_quantity,
                expiry_date: expiry.map(|date| date.format(validation::DATE_FORMAT).to_string()),
                item_notes: raw.item_notes.clone(),
            });
        }

        let draft = CheckDraft {
            id: input.check_id,
            box_name: box_name.clone(),
            check_date,
            general_notes: input.general_notes.clone(),
        };
        let check_id = self.repository.save(&draft, &items).await?;
        info!(check_id, box_name = %box_name, "Check saved");

        if let Err(e) = self
            .event_sender
            .send(Event::CheckSaved {
                check_id,
                box_name,
            })
            .await
        {
            warn!("Failed to publish CheckSaved event: {}", e);
        }
        Ok(check_id)
    }

    /// Seeds the check form for a new or existing check.
    ///
    /// Produces one entry per catalog item in catalog order, carrying
    /// persisted values where the check has them and the *live* catalog
    /// standard quantity throughout (not the stored snapshot; see
    /// [`get_check_details`](Self::get_check_details) for the other side of
    /// that asymmetry).
    #[instrument(skip(self))]
    pub async fn reconcile_for_display(
        &self,
        check_id: Option<i32>,
    ) -> Result<Vec<AnnotatedItem>, ServiceError> {
        let persisted: HashMap<String, PersistedItem> = match check_id {
            Some(id) => {
                let (_, rows) = self.repository.load(id).await?;
                rows.into_iter()
                    .map(|row| {
                        (
                            row.item_name,
                            PersistedItem {
                                current_quantity: row.current_quantity,
                                expiry_date: row.expiry_date,
                                item_notes: row.item_notes.unwrap_or_default(),
                            },
                        )
                    })
                    .collect()
            }
            None => HashMap::new(),
        };

        let today = Utc::now().date_naive();
        Ok(reconcile::reconcile(&persisted)
            .into_iter()
            .map(|item| annotate(item, today))
            .collect())
    }

    /// Loads a check with its stored item rows annotated for display.
    ///
    /// Uses the standard quantities snapshotted on the rows at save time and
    /// performs no catalog reconciliation: a historical check shows exactly
    /// what was recorded.
    #[instrument(skip(self))]
    pub async fn get_check_details(&self, check_id: i32) -> Result<CheckDetails, ServiceError> {
        let (check, rows) = self.repository.load(check_id).await?;
        let today = Utc::now().date_naive();
        let items = rows
            .into_iter()
            .map(|row| AnnotatedItem {
                stock_status: status::evaluate_stock(row.standard_quantity, row.current_quantity),
                expiry_status: status::evaluate_expiry(row.expiry_date.as_deref(), today),
                item_name: row.item_name,
                standard_quantity: row.standard_quantity,
                current_quantity: row.current_quantity,
                expiry_date: row.expiry_date,
                item_notes: row.item_notes.unwrap_or_default(),
            })
            .collect();
        Ok(CheckDetails { check, items })
    }

    /// All checks, most recent check date first.
    #[instrument(skip(self))]
    pub async fn list_checks(&self) -> Result<Vec<CheckSummary>, ServiceError> {
        let checks = self.repository.list_all().await?;
        Ok(checks.into_iter().map(CheckSummary::from).collect())
    }

    /// Deletes a check and its item rows.
    #[instrument(skip(self))]
    pub async fn delete_check(&self, check_id: i32) -> Result<(), ServiceError> {
        self.repository.delete(check_id).await?;
        info!(check_id, "Check deleted");

        if let Err(e) = self.event_sender.send(Event::CheckDeleted { check_id }).await {
            warn!("Failed to publish CheckDeleted event: {}", e);
        }
        Ok(())
    }
}

fn annotate(item: ReconciledItem, today: NaiveDate) -> AnnotatedItem {
    AnnotatedItem {
        stock_status: status::evaluate_stock(item.standard_quantity, item.current_quantity),
        expiry_status: status::evaluate_expiry(item.expiry_date.as_deref(), today),
        item_name: item.item_name,
        standard_quantity: item.standard_quantity,
        current_quantity: item.current_quantity,
        expiry_date: item.expiry_date,
        item_notes: item.item_notes,
    }
}
