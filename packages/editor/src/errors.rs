//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid block variant: {0}")]
    InvalidVariant(String),

    #[error("Id generator produced no unused id after {attempts} attempts")]
    IdExhausted { attempts: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),
}
