//! Branding and application identity.
//!
//! Names, directory names and environment variables live here so the rest of
//! the crate never spells them out by hand.

/// The human-readable display name of the application.
pub const APP_DISPLAY_NAME: &str = "Fridgify";

/// The binary/executable name (lowercase, no spaces).
pub const APP_BINARY_NAME: &str = "fridgify";

/// The directory name for application config and data.
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/` and `~/.local/share/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "Fridgify";

/// Short description for help text.
pub const APP_DESCRIPTION: &str = "Keep track of your fridge contents.";

/// Overrides the config directory (used by tests and portable installs).
pub const CONFIG_DIR_ENV: &str = "FRIDGIFY_CONFIG_DIR";

/// Overrides the inventory data directory.
pub const DATA_DIR_ENV: &str = "FRIDGIFY_DATA_DIR";

/// Pixabay API key. Takes precedence over the config file.
pub const PIXABAY_KEY_ENV: &str = "PIXABAY_API_KEY";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branding_consistency() {
        assert_eq!(APP_BINARY_NAME, APP_BINARY_NAME.to_lowercase());
        assert!(!APP_BINARY_NAME.contains(' '));
        assert!(!APP_DATA_DIR.contains(' '));
        assert!(CONFIG_DIR_ENV.starts_with("FRIDGIFY_"));
        assert!(DATA_DIR_ENV.starts_with("FRIDGIFY_"));
    }
}
