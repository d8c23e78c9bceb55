//! CLI Configuration
//!
//! Two files are involved: the per-user `~/.formforge/config.toml` holding
//! API connection settings, and a per-project `form.config.json` in the
//! working directory holding scaffold preferences for `formforge add`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, String> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path(None)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, content).map_err(|e| e.to_string())
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Cannot find home directory")?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".formforge").join(filename))
    }
}

/// Extension given to scaffolded component files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Js,
    Ts,
}

impl FileType {
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Js => "js",
            FileType::Ts => "ts",
        }
    }
}

/// Directory scaffolded components are written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum DirPref {
    #[value(name = "components")]
    #[serde(rename = "components")]
    Components,
    #[value(name = "src/components")]
    #[serde(rename = "src/components")]
    SrcComponents,
}

impl DirPref {
    pub fn path(&self) -> &'static str {
        match self {
            DirPref::Components => "components",
            DirPref::SrcComponents => "src/components",
        }
    }
}

pub const SCAFFOLD_CONFIG_FILE: &str = "form.config.json";

/// Scaffold preferences, persisted as `form.config.json`.
///
/// Key names stay camelCase so files written by earlier tooling keep
/// parsing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldConfig {
    pub file_type: FileType,
    pub dir_pref: DirPref,
}

impl ScaffoldConfig {
    pub fn load() -> Result<Option<Self>, String> {
        let path = PathBuf::from(SCAFFOLD_CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
        let config = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<(), String> {
        let content = serde_json::to_string(self).map_err(|e| e.to_string())?;
        fs::write(SCAFFOLD_CONFIG_FILE, content).map_err(|e| e.to_string())
    }

    pub fn exists() -> bool {
        PathBuf::from(SCAFFOLD_CONFIG_FILE).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_config_uses_legacy_key_names() {
        let config = ScaffoldConfig {
            file_type: FileType::Ts,
            dir_pref: DirPref::SrcComponents,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"fileType":"ts","dirPref":"src/components"}"#);
    }

    #[test]
    fn scaffold_config_parses_legacy_file() {
        let parsed: ScaffoldConfig =
            serde_json::from_str(r#"{"fileType":"js","dirPref":"components"}"#).unwrap();
        assert_eq!(parsed.file_type, FileType::Js);
        assert_eq!(parsed.dir_pref, DirPref::Components);
    }
}
