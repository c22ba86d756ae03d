use thiserror::Error;

/// Errors that can occur during code generation.
///
/// Graph mutation never produces these: illegal edits are rejected locally as
/// no-ops. Generation only fails on the two conditions below; every other gap
/// (missing template, unwired input) has a documented default.
#[derive(Error, Debug, Clone)]
pub enum GenerateError {
    #[error("No entry blocks present: add an 'On Start' or similar event block to generate code")]
    NoEntryBlocks,

    #[error("Cyclic connection graph: block '{block_id}' is wired into its own inputs")]
    CyclicGraph { block_id: String },
}

/// Errors that can occur at the project document boundary (save/load).
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Failed to read or write project file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse project JSON: {0}")]
    Json(String),
}
