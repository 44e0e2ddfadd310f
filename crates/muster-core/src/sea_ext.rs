use sea_orm::{DbErr, SqlErr};

/// Classification helpers for storage errors surfaced by sea-orm.
pub trait DbErrExt {
    /// The statement violated a `UNIQUE` index or primary key.
    fn is_unique_violation(&self) -> bool;
}

impl DbErrExt for DbErr {
    fn is_unique_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}
