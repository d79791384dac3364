use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::validation::DATE_FORMAT;

/// Days before expiry at which an item starts flagging as expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 90;

/// Stock level of an item relative to its standard quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    #[strum(serialize = "OK")]
    Ok,
    #[strum(serialize = "LOW STOCK")]
    LowStock,
    #[strum(serialize = "OVERSTOCK")]
    Overstock,
}

/// Expiry state of an item relative to the current date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStatus {
    #[strum(serialize = "")]
    None,
    #[strum(serialize = "EXPIRING SOON")]
    ExpiringSoon,
    #[strum(serialize = "EXPIRED")]
    Expired,
}

/// Derives the stock status from a standard/current quantity pair.
pub fn evaluate_stock(standard_quantity: i32, current_quantity: i32) -> StockStatus {
    match current_quantity.cmp(&standard_quantity) {
        Ordering::Less => StockStatus::LowStock,
        Ordering::Greater => StockStatus::Overstock,
        Ordering::Equal => StockStatus::Ok,
    }
}

/// Derives the expiry status of an item as of `today`.
///
/// Expiry tracking is optional per item: an absent or unparsable date yields
/// `ExpiryStatus::None` rather than an error.
pub fn evaluate_expiry(expiry_date: Option<&str>, today: NaiveDate) -> ExpiryStatus {
    let raw = match expiry_date {
        Some(value) if !value.is_empty() => value,
        _ => return ExpiryStatus::None,
    };
    let expiry = match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => return ExpiryStatus::None,
    };
    if expiry < today {
        ExpiryStatus::Expired
    } else if (expiry - today).num_days() < EXPIRY_WARNING_DAYS {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::None
    }
}
