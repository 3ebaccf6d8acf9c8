//! Transform option normalization
//!
//! Turns the loosely-typed options object (CLI flags or a JSON options
//! document) into validated settings, and derives the sibling
//! environment-specific document path from the baseline path:
//! `<dir>/<stem>.<environment>.json`.

use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

/// Baseline document path used when the options supply none
pub const DEFAULT_CONFIG_SOURCE: &str = "./appsettings.json";

/// Settings validation errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("options object required")]
    MissingOptions,

    #[error("transform operation aborted: no environment specified")]
    MissingEnvironment,
}

/// Raw, partially-specified options.
///
/// `log_enabled` and `indent` accept any JSON value and are coerced with
/// the loose boolean rules of [`to_bool`]; options documents in the wild
/// carry `"yes"`, `1`, or `"true"` interchangeably.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub environment: Option<String>,
    pub config_source: Option<String>,
    pub output_path: Option<String>,
    pub log_enabled: Option<Value>,
    pub indent: Option<Value>,
}

impl Options {
    /// Shorthand for the bare-environment form of the options object
    pub fn for_environment(name: impl Into<String>) -> Self {
        Options {
            environment: Some(name.into()),
            ..Default::default()
        }
    }

    /// Overlay `other` onto `self`; `other`'s set fields win
    pub fn overlay(mut self, other: Options) -> Options {
        if other.environment.is_some() {
            self.environment = other.environment;
        }
        if other.config_source.is_some() {
            self.config_source = other.config_source;
        }
        if other.output_path.is_some() {
            self.output_path = other.output_path;
        }
        if other.log_enabled.is_some() {
            self.log_enabled = other.log_enabled;
        }
        if other.indent.is_some() {
            self.indent = other.indent;
        }
        self
    }
}

/// Validated settings for one transform run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Target environment name
    pub environment: String,
    /// Baseline configuration document
    pub config_source: PathBuf,
    /// Where the merged document is written
    pub output_path: PathBuf,
    /// Derived environment-specific document path
    pub environment_config_source: PathBuf,
    /// Baseline file name, for log messages
    pub config_file_name: String,
    /// Narrate merge decisions
    pub log_enabled: bool,
    /// Tab-indent the rendered output
    pub indent: bool,
}

impl Settings {
    /// Validate options and derive the environment document path.
    ///
    /// Fails with [`SettingsError::MissingOptions`] when no options were
    /// supplied at all and [`SettingsError::MissingEnvironment`] when no
    /// environment name was resolved.
    pub fn new(options: Option<Options>) -> Result<Self, SettingsError> {
        let options = options.ok_or(SettingsError::MissingOptions)?;

        let environment = options.environment.unwrap_or_default();
        if environment.is_empty() {
            return Err(SettingsError::MissingEnvironment);
        }

        let config_source = PathBuf::from(
            options
                .config_source
                .unwrap_or_else(|| DEFAULT_CONFIG_SOURCE.to_string()),
        );
        let output_path = options
            .output_path
            .map(PathBuf::from)
            .unwrap_or_else(|| config_source.clone());

        let config_file_name = config_source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = config_source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let environment_config_source =
            config_source.with_file_name(format!("{}.{}.json", stem, environment));

        Ok(Settings {
            log_enabled: to_bool(options.log_enabled.as_ref()),
            indent: to_bool(options.indent.as_ref()),
            environment,
            config_source,
            output_path,
            environment_config_source,
            config_file_name,
        })
    }
}

/// Loose boolean coercion: booleans as-is, numbers stringified, then
/// "true"/"yes"/"1"/"y" (case-insensitive) are true and anything else —
/// absent values and non-scalar shapes included — is false.
pub fn to_bool(value: Option<&Value>) -> bool {
    let text = match value {
        None | Some(Value::Null) => return false,
        Some(Value::Bool(flag)) => return *flag,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(_) => return false,
    };

    matches!(text.to_lowercase().as_str(), "true" | "yes" | "1" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_options() {
        let err = Settings::new(None).unwrap_err();
        assert!(matches!(err, SettingsError::MissingOptions));
    }

    #[test]
    fn test_missing_environment() {
        let err = Settings::new(Some(Options::default())).unwrap_err();
        assert!(matches!(err, SettingsError::MissingEnvironment));

        let err = Settings::new(Some(Options::for_environment(""))).unwrap_err();
        assert!(matches!(err, SettingsError::MissingEnvironment));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::new(Some(Options::for_environment("Production"))).unwrap();

        assert_eq!(settings.environment, "Production");
        assert_eq!(settings.config_source, PathBuf::from("./appsettings.json"));
        assert_eq!(settings.output_path, PathBuf::from("./appsettings.json"));
        assert_eq!(settings.config_file_name, "appsettings.json");
        assert!(!settings.log_enabled);
        assert!(!settings.indent);
    }

    #[test]
    fn test_environment_path_derivation() {
        let options = Options {
            environment: Some("Staging".to_string()),
            config_source: Some("config/app.json".to_string()),
            ..Default::default()
        };
        let settings = Settings::new(Some(options)).unwrap();

        assert_eq!(
            settings.environment_config_source,
            PathBuf::from("config/app.Staging.json")
        );
    }

    #[test]
    fn test_output_path_defaults_to_config_source() {
        let options = Options {
            environment: Some("Dev".to_string()),
            config_source: Some("config/app.json".to_string()),
            ..Default::default()
        };
        let settings = Settings::new(Some(options)).unwrap();
        assert_eq!(settings.output_path, PathBuf::from("config/app.json"));
    }

    #[test]
    fn test_overlay_precedence() {
        let from_file = Options {
            environment: Some("Dev".to_string()),
            config_source: Some("a.json".to_string()),
            ..Default::default()
        };
        let from_flags = Options::for_environment("Production");

        let merged = from_file.overlay(from_flags);
        assert_eq!(merged.environment.as_deref(), Some("Production"));
        assert_eq!(merged.config_source.as_deref(), Some("a.json"));
    }

    #[test]
    fn test_options_document_shape() {
        let options: Options = serde_json::from_value(json!({
            "environment": "Production",
            "configSource": "./settings.json",
            "outputPath": "./out.json",
            "logEnabled": "yes",
            "indent": 1
        }))
        .unwrap();
        let settings = Settings::new(Some(options)).unwrap();

        assert!(settings.log_enabled);
        assert!(settings.indent);
        assert_eq!(settings.config_source, PathBuf::from("./settings.json"));
        assert_eq!(settings.output_path, PathBuf::from("./out.json"));
    }

    #[test]
    fn test_to_bool_coercion_table() {
        assert!(to_bool(Some(&json!(true))));
        assert!(to_bool(Some(&json!("true"))));
        assert!(to_bool(Some(&json!("TRUE"))));
        assert!(to_bool(Some(&json!("yes"))));
        assert!(to_bool(Some(&json!("Y"))));
        assert!(to_bool(Some(&json!("1"))));
        assert!(to_bool(Some(&json!(1))));

        assert!(!to_bool(None));
        assert!(!to_bool(Some(&json!(null))));
        assert!(!to_bool(Some(&json!(false))));
        assert!(!to_bool(Some(&json!("no"))));
        assert!(!to_bool(Some(&json!("0"))));
        assert!(!to_bool(Some(&json!(0))));
        assert!(!to_bool(Some(&json!(2))));
        assert!(!to_bool(Some(&json!(["true"]))));
    }
}
