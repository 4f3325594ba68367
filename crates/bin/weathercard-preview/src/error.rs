use weathercard_adapter_html_askama::RenderError;
use weathercard_domain::error::ConfigError;

/// Errors of the preview binary.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// The `[card]` table could not be converted for the card.
    #[error("failed to convert card table")]
    Json(#[from] serde_json::Error),
    /// The card refused its configuration.
    #[error("invalid card configuration")]
    Card(#[from] ConfigError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    #[error("failed to render card")]
    Render(#[from] RenderError),
}
