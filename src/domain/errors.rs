use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown priority tier: {0}")]
    UnknownPriorityTier(String),
    #[error("No eligible agent for category {category_id}: roster is empty and no administrator is available")]
    NoEligibleAgent { category_id: String },
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                DomainError::Database(db_err.message().to_string())
            }
            other => DomainError::Database(other.to_string()),
        }
    }
}
