use inkwell_core::error::CoreError;

/// Failure of a repository operation that enforces a domain rule
/// (stock levels, point balances) on top of plain SQL.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
