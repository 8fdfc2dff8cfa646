/// Errors raised while loading host-supplied data (phrase tables, resource catalogs).
///
/// Scoring and filtering themselves never fail; these only surface when a
/// table or catalog is parsed and validated.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid phrase table: {0}")]
    InvalidPhraseTable(String),

    #[error("duplicate resource id: {0}")]
    DuplicateResourceId(u32),

    #[error("unknown concern label: {0}")]
    UnknownLabel(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
