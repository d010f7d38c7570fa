//! Environment variable and home directory expansion for path settings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - a leading `~` - expands to the user's home directory

use crate::ConfigError;

/// Expand environment variable references and a leading `~` in a path string.
///
/// Strings without `${` skip environment expansion entirely, so a bare
/// `$name` in a directory name is left alone.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = if value.contains("${") {
        shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
            std::env::var(var)
                .map(Some)
                .map_err(|_| UnsetVar(var.to_owned()))
        })
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{0}}} not set", e.cause.0),
        })?
        .into_owned()
    } else {
        value.to_owned()
    };

    Ok(shellexpand::tilde(&expanded).into_owned())
}

/// Name of an environment variable that was referenced but not set.
struct UnsetVar(String);
