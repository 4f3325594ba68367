//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! The domain only ever fails at configuration time; everything that happens
//! while rendering degrades to "render less" instead of returning an error.

/// A card configuration was refused.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The `entity` field is missing or empty.
    #[error("Please define a weather entity")]
    MissingEntity,

    /// The configuration could not be decoded.
    #[error("invalid card configuration")]
    Invalid(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_user_facing_message_for_missing_entity() {
        assert_eq!(
            ConfigError::MissingEntity.to_string(),
            "Please define a weather entity"
        );
    }

    #[test]
    fn should_convert_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = err.into();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
