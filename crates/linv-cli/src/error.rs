#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Inventory(#[from] linv_core::Error),

    #[error("failed to render inventory: {0}")]
    Json(#[from] serde_json::Error),
}
