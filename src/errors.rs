use sea_orm::error::DbErr;
use thiserror::Error;

/// Errors surfaced by the check tracking core.
///
/// Validation variants are produced before any storage call and identify the
/// offending field so the caller can re-prompt. Storage variants are produced
/// after the in-flight transaction has been rolled back; the caller's
/// in-memory state is untouched and a retry is safe.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("quantity for {item_name} must be a non-negative number, got {value:?}")]
    InvalidQuantity { item_name: String, value: String },

    #[error("{field} must be a YYYY-MM-DD date, got {value:?}")]
    InvalidDate { field: String, value: String },

    #[error("{box_name:?} is not a known first aid box")]
    InvalidBoxSelection { box_name: String },

    #[error("check {0} not found")]
    NotFound(i32),

    #[error("failed to save check: {0}")]
    SaveFailed(#[source] DbErr),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] DbErr),
}

fn is_connection_failure(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

impl ServiceError {
    /// Classifies a database error raised inside a `save`/`delete` unit.
    pub(crate) fn write_failure(err: DbErr) -> Self {
        if is_connection_failure(&err) {
            Self::StorageUnavailable(err)
        } else {
            Self::SaveFailed(err)
        }
    }

    /// Classifies a database error raised on a read path.
    pub(crate) fn read_failure(err: DbErr) -> Self {
        if is_connection_failure(&err) {
            Self::StorageUnavailable(err)
        } else {
            Self::DatabaseError(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use sea_orm::RuntimeErr;

    #[test]
    fn connection_errors_map_to_storage_unavailable() {
        let err = DbErr::Conn(RuntimeErr::Internal("connection refused".to_string()));
        assert_matches!(
            ServiceError::write_failure(err),
            ServiceError::StorageUnavailable(_)
        );
    }

    #[test]
    fn write_errors_map_to_save_failed() {
        let err = DbErr::Exec(RuntimeErr::Internal("constraint violated".to_string()));
        assert_matches!(ServiceError::write_failure(err), ServiceError::SaveFailed(_));
    }

    #[test]
    fn read_errors_map_to_database_error() {
        let err = DbErr::Query(RuntimeErr::Internal("syntax error".to_string()));
        assert_matches!(ServiceError::read_failure(err), ServiceError::DatabaseError(_));
    }
}
