use thiserror::Error;

/// Errors that can occur while building or loading the item catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An item with this ID is already registered
    #[error("item '{0}' already registered")]
    DuplicateItem(String),

    /// A resource with this ID is already registered
    #[error("resource '{0}' already registered")]
    DuplicateResource(String),

    /// A resource yields an item that isn't in the catalog
    #[error("resource '{resource}' yields unknown item '{item_id}'")]
    UnknownItem { resource: String, item_id: String },

    /// A resource definition has out-of-range values
    #[error("resource '{resource}' is invalid: {reason}")]
    InvalidResource { resource: String, reason: String },

    #[error("catalog file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    Json(#[from] serde_json::Error),
}
