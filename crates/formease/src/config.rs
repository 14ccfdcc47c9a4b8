// File: src/config.rs
// Purpose: Configuration parsing from formease.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Builder configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuilderConfig {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Title shown above the preview; falls back to the form's own title
    #[serde(default)]
    pub title: Option<String>,
}

/// Canvas configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// JSON form loaded at startup (default: the built-in sample form).
    /// A relative path is resolved against the config file's directory by [`BuilderConfig::load`].
    #[serde(default)]
    pub initial_form: Option<String>,
}

/// Preview configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Whether the sidebar preview refuses input (default: true)
    #[serde(default = "default_true")]
    pub read_only: bool,

    /// Whether the JSON structure view is shown next to the preview
    #[serde(default = "default_true")]
    pub show_json: bool,
}

// Default values
fn default_name() -> String {
    "formease".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            title: None,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            read_only: true,
            show_json: true,
        }
    }
}

impl BuilderConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: BuilderConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        // Relative form paths are relative to the config file
        if let (Some(form), Some(dir)) = (config.canvas.initial_form.as_mut(), path.parent()) {
            if Path::new(form.as_str()).is_relative() {
                *form = dir.join(form.as_str()).to_string_lossy().into_owned();
            }
        }

        Ok(config)
    }

    /// Load configuration from default path (./formease.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formease.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert_eq!(config.project.name, "formease");
        assert!(config.preview.read_only);
        assert!(config.preview.show_json);
        assert!(config.canvas.initial_form.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<BuilderConfig>("").unwrap_or_default();
        assert_eq!(config.project.name, "formease");
        assert!(config.preview.read_only);
    }

    #[test]
    fn test_custom_sections() {
        let toml = r#"
            [project]
            title = "Signup"

            [canvas]
            initial_form = "forms/signup.json"

            [preview]
            read_only = false
        "#;
        let config: BuilderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.project.title.as_deref(), Some("Signup"));
        assert_eq!(config.canvas.initial_form.as_deref(), Some("forms/signup.json"));
        assert!(!config.preview.read_only);
        assert!(config.preview.show_json);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = BuilderConfig::load("does/not/exist/formease.toml").unwrap();
        assert_eq!(config.project.name, "formease");
    }

    #[test]
    fn test_initial_form_resolved_against_config_dir() {
        let dir = std::env::temp_dir().join(format!("formease-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("formease.toml");
        fs::write(&path, "[canvas]\ninitial_form = \"forms/signup.json\"\n").unwrap();

        let config = BuilderConfig::load(&path).unwrap();
        let expected = dir.join("forms/signup.json");
        assert_eq!(config.canvas.initial_form.as_deref(), expected.to_str());

        fs::remove_dir_all(&dir).unwrap();
    }
}
