use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DemandError {
    #[error("Invalid {column} field {raw:?}: {reason}")]
    Decode {
        column: &'static str,
        raw: String,
        reason: String,
    },
    #[error("No {column} value at offset {offset} (length {len})")]
    Index {
        column: &'static str,
        offset: usize,
        len: usize,
    },
    #[error("Error writing {column} value {value} at offset {offset}: {reason}")]
    Mutation {
        column: &'static str,
        offset: usize,
        value: String,
        reason: String,
    },
}

impl DemandError {
    /// Name of the encoded field the error refers to.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Decode { column, .. }
            | Self::Index { column, .. }
            | Self::Mutation { column, .. } => column,
        }
    }
}

pub type Result<T> = std::result::Result<T, DemandError>;
