use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate {kind} in reference data: {key}")]
    DuplicateReference { kind: &'static str, key: String },

    #[error("Sanctioned entity {entity_id} has a blank name")]
    BlankEntityName { entity_id: u32 },

    #[error("No data to export")]
    NothingToExport,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
