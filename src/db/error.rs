use sqlx::error::ErrorKind;
use thiserror::Error;

// Driver codes for constraint failures, for drivers that report them as
// `ErrorKind::Other`: SQLite (primary/extended) and MySQL.
const CONSTRAINT_CODES: [&str; 10] = [
    "19", "275", "787", "1299", "1555", "2067", "1048", "1062", "1451", "1452",
];

#[derive(Debug, Error)]
pub enum DbError {
    /// The datastore could not be reached or refused the login.
    #[error("could not connect to the database: {0}")]
    Connect(#[source] sqlx::Error),

    /// A statement violated a table constraint (foreign key, unique, not null).
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("database query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let by_kind = matches!(
                db_err.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            );
            let by_code = db_err
                .code()
                .is_some_and(|code| CONSTRAINT_CODES.contains(&code.as_ref()));
            if by_kind || by_code {
                return DbError::Constraint(db_err.message().to_string());
            }
        }
        DbError::Query(err)
    }
}

impl DbError {
    pub fn is_constraint(&self) -> bool {
        matches!(self, DbError::Constraint(_))
    }
}
