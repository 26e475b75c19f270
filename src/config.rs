//! Runtime configuration for the catalogue driver.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! [run]
//! sections = ["solid", "structural"]
//! color = false
//!
//! [facade]
//! magic_square_size = 3
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Solid,
    Creational,
    Structural,
    Behavioral,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Solid,
        Section::Creational,
        Section::Structural,
        Section::Behavioral,
    ];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Solid => "SOLID principles",
            Section::Creational => "Creational",
            Section::Structural => "Structural",
            Section::Behavioral => "Behavioral",
        };
        f.write_str(name)
    }
}

impl FromStr for Section {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(Section::Solid),
            "creational" => Ok(Section::Creational),
            "structural" => Ok(Section::Structural),
            "behavioral" | "behavioural" => Ok(Section::Behavioral),
            _ => Err(CatalogError::UnknownSection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub sections: Vec<Section>,
    pub color: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            color: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub path: PathBuf,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: std::env::temp_dir().join("journal_entries.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub cash: u32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { cash: 9305 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Index of the last page the preview proxy lets through.
    pub preview_last_page: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self { preview_last_page: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    pub magic_square_size: usize,
    pub magic_square_max_value: u32,
    pub magic_square_max_attempts: u32,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            magic_square_size: 3,
            magic_square_max_value: 3,
            magic_square_max_attempts: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub run: RunConfig,
    pub journal: JournalConfig,
    pub chain: ChainConfig,
    pub proxy: ProxyConfig,
    pub facade: FacadeConfig,
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CatalogConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.run.sections.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "at least one section must be enabled".to_string(),
            ));
        }
        if self.facade.magic_square_size == 0 {
            return Err(CatalogError::InvalidConfig(
                "magic square size must be at least 1".to_string(),
            ));
        }
        if self.facade.magic_square_max_value == 0 {
            return Err(CatalogError::InvalidConfig(
                "magic square max value must be at least 1".to_string(),
            ));
        }
        if self.facade.magic_square_max_attempts == 0 {
            return Err(CatalogError::InvalidConfig(
                "magic square max attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Enabled sections in catalogue order, without duplicates.
    pub fn enabled_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.run.sections.contains(section))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CatalogConfig::from_toml_str("").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.enabled_sections(), Section::ALL.to_vec());
        assert_eq!(config.chain.cash, 9305);
        assert_eq!(config.proxy.preview_last_page, 2);
    }

    #[test]
    fn test_partial_document() {
        let toml = "[run]\nsections = [\"behavioral\", \"solid\"]\ncolor = false\n\n[chain]\ncash = 42\n";
        let config = CatalogConfig::from_toml_str(toml).unwrap();
        assert!(!config.run.color);
        assert_eq!(config.chain.cash, 42);
        assert_eq!(config.facade, FacadeConfig::default());
        assert_eq!(
            config.enabled_sections(),
            vec![Section::Solid, Section::Behavioral]
        );
    }

    #[test]
    fn test_unknown_section_in_toml_is_rejected() {
        let result = CatalogConfig::from_toml_str("[run]\nsections = [\"quantum\"]\n");
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn test_validation_rejects_zero_size() {
        let result = CatalogConfig::from_toml_str("[facade]\nmagic_square_size = 0\n");
        assert!(matches!(result, Err(CatalogError::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_rejects_empty_sections() {
        let result = CatalogConfig::from_toml_str("[run]\nsections = []\n");
        assert!(matches!(result, Err(CatalogError::InvalidConfig(_))));
    }

    #[test]
    fn test_section_from_str() {
        assert_eq!("Structural".parse::<Section>().unwrap(), Section::Structural);
        assert_eq!(" behavioural ".parse::<Section>().unwrap(), Section::Behavioral);
        assert!(matches!(
            "nope".parse::<Section>(),
            Err(CatalogError::UnknownSection(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[proxy]\npreview_last_page = 4").unwrap();
        let config = CatalogConfig::from_file(file.path()).unwrap();
        assert_eq!(config.proxy.preview_last_page, 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CatalogConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_sample_catalog_parses() {
        let config = CatalogConfig::from_toml_str(include_str!("../catalog.toml")).unwrap();
        assert_eq!(config.enabled_sections(), Section::ALL.to_vec());
        assert_eq!(config.facade, FacadeConfig::default());
    }
}
