use chrono::NaiveDate;

use crate::catalog;
use crate::errors::ServiceError;

/// Calendar date shape used wherever checks store dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date shape used by list and detail surfaces.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses an observed quantity field. Empty input counts as 0.
pub fn parse_quantity(item_name: &str, raw: &str) -> Result<i32, ServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i32>()
        .ok()
        .filter(|quantity| *quantity >= 0)
        .ok_or_else(|| ServiceError::InvalidQuantity {
            item_name: item_name.to_string(),
            value: raw.to_string(),
        })
}

/// Parses a check date. Empty input defaults to `today`.
pub fn parse_check_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(today);
    }
    parse_strict_date("check_date", trimmed)
}

/// Parses a per-item expiry date. Empty input means no expiry is tracked.
pub fn parse_expiry_date(item_name: &str, raw: &str) -> Result<Option<NaiveDate>, ServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_strict_date(&format!("expiry_date[{}]", item_name), trimmed).map(Some)
}

/// Checks that `box_name` is one of the known first aid boxes.
pub fn validate_box_name(box_name: &str) -> Result<String, ServiceError> {
    if catalog::is_known_box(box_name) {
        Ok(box_name.to_string())
    } else {
        Err(ServiceError::InvalidBoxSelection {
            box_name: box_name.to_string(),
        })
    }
}

/// Renders a stored ISO date for display as DD/MM/YYYY.
///
/// An unparsable stored value is returned verbatim rather than erroring,
/// since display formatting must never fail on historical data.
pub fn format_date_for_display(date_str: &str) -> String {
    if date_str.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(date_str, DATE_FORMAT) {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => date_str.to_string(),
    }
}

// Accepts exactly the 4-2-2 hyphen-separated shape: the input must parse and
// round-trip to itself, which rejects forms like "2025-1-1".
fn parse_strict_date(field: &str, raw: &str) -> Result<NaiveDate, ServiceError> {
    let invalid = || ServiceError::InvalidDate {
        field: field.to_string(),
        value: raw.to_string(),
    };
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != raw {
        return Err(invalid());
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn quantity_accepts_non_negative_integers() {
        assert_eq!(parse_quantity("Safety Pins", "4").unwrap(), 4);
        assert_eq!(parse_quantity("Safety Pins", " 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("Safety Pins", "").unwrap(), 0);
    }

    #[test]
    fn quantity_rejects_non_numeric_and_negative_input() {
        assert_matches!(
            parse_quantity("Safety Pins", "abc"),
            Err(ServiceError::InvalidQuantity { ref item_name, .. }) if item_name == "Safety Pins"
        );
        assert_matches!(
            parse_quantity("Safety Pins", "-2"),
            Err(ServiceError::InvalidQuantity { .. })
        );
    }

    #[test]
    fn check_date_defaults_to_today_when_empty() {
        assert_eq!(parse_check_date("", today()).unwrap(), today());
        assert_eq!(
            parse_check_date("2025-01-31", today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
    }

    #[test]
    fn check_date_rejects_malformed_input() {
        assert_matches!(
            parse_check_date("2025/01/01", today()),
            Err(ServiceError::InvalidDate { ref field, ref value })
                if field == "check_date" && value == "2025/01/01"
        );
        assert_matches!(
            parse_check_date("2025-1-1", today()),
            Err(ServiceError::InvalidDate { .. })
        );
        assert_matches!(
            parse_check_date("2025-02-30", today()),
            Err(ServiceError::InvalidDate { .. })
        );
    }

    #[test]
    fn expiry_date_is_optional() {
        assert_eq!(parse_expiry_date("Safety Pins", "").unwrap(), None);
        assert_eq!(
            parse_expiry_date("Safety Pins", "2026-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_matches!(
            parse_expiry_date("Safety Pins", "01-03-2026"),
            Err(ServiceError::InvalidDate { ref field, .. }) if field.contains("Safety Pins")
        );
    }

    #[test]
    fn box_name_must_be_known() {
        assert_eq!(validate_box_name("Cafe").unwrap(), "Cafe");
        assert_matches!(
            validate_box_name("Select First Aid Box"),
            Err(ServiceError::InvalidBoxSelection { .. })
        );
    }

    #[test]
    fn display_date_formatting() {
        assert_eq!(format_date_for_display("2025-01-31"), "31/01/2025");
        assert_eq!(format_date_for_display(""), "");
        assert_eq!(format_date_for_display("garbage"), "garbage");
    }
}
