use thiserror::Error;

pub type PlaceResult<T> = Result<T, PlaceError>;

#[derive(Error, Debug)]
pub enum PlaceError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Place {0} not found: no rows affected")]
    NotFound(i64),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
