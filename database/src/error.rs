use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Could not decode column {column}: {message}")]
    Decode { column: &'static str, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{kind} already acquired for player {player}")]
    AlreadyAcquired { kind: &'static str, player: String },

    #[error("UUID parsing error: {0}")]
    UuidParsing(#[from] uuid::Error),
}

impl DatabaseError {
    pub fn decode(column: &'static str, message: impl ToString) -> Self {
        DatabaseError::Decode {
            column,
            message: message.to_string(),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(e: sqlx::Error) -> Self {
        DatabaseError::Query(e.to_string())
    }
}
