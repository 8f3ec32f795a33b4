//! Conversions from external infrastructure errors into domain errors.

use encore_domain::EncoreError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EncoreError);

impl From<InfraError> for EncoreError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<EncoreError> for InfraError {
    fn from(value: EncoreError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoEncoreError {
    fn into_encore(self) -> EncoreError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → EncoreError */
/* -------------------------------------------------------------------------- */

impl IntoEncoreError for SqlError {
    fn into_encore(self) -> EncoreError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        EncoreError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        EncoreError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        EncoreError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        EncoreError::Database("foreign key constraint violation".into())
                    }
                    _ => EncoreError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => EncoreError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                EncoreError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                EncoreError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => EncoreError::Database("invalid UTF-8 returned from sqlite".into()),
            other => EncoreError::Database(format!("sqlite error: {other}")),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_encore())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → EncoreError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(EncoreError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → EncoreError */
/* -------------------------------------------------------------------------- */

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(EncoreError::Storage(value.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → EncoreError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(EncoreError::Database(format!("failed to decode stored value: {value}")))
    }
}
