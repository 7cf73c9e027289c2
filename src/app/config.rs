use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, WizardError};
use crate::loaders::{Bucket, DataLoaderType, Links, Substep};

const CONFIG_DIR: &str = "dataloader-wizard";
const CONFIG_FILE: &str = "wizard.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub general: GeneralConfig,
    pub user: UserConfig,
    pub links: Links,
    /// Buckets offered by the Select step, in display order
    pub buckets: Vec<Bucket>,
    pub starting: StartingConfig,
}

impl WizardConfig {
    /// Default location: `$XDG_CONFIG_HOME/dataloader-wizard/wizard.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: WizardConfig = toml::from_str(content)?;
        config.starting.validate(&config.buckets)?;
        Ok(config)
    }

    /// Bucket named by `[starting] bucket`, if any
    pub fn starting_bucket(&self) -> Option<&Bucket> {
        let wanted = self.starting.bucket.as_deref()?;
        self.buckets.iter().find(|b| b.name == wanted || b.id == wanted)
    }

    /// Display name for the Configure/Verify steps
    pub fn username(&self) -> String {
        if !self.user.name.is_empty() {
            return self.user.name.clone();
        }
        std::env::var("USER").unwrap_or_else(|_| "admin".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Load Data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Falls back to `$USER` when empty
    pub name: String,
}

/// Values the wizard starts from when it opens
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StartingConfig {
    /// Bucket name or id
    pub bucket: Option<String>,
    /// `""`/`empty`, `csv`, `streaming`, `line-protocol` or `scraping`
    pub loader_type: Option<String>,
    pub step: Option<usize>,
    /// Index, `streaming` or `config`
    pub substep: Option<String>,
}

impl StartingConfig {
    fn validate(&self, buckets: &[Bucket]) -> Result<()> {
        self.loader_type()?;
        self.substep()?;
        if let Some(wanted) = &self.bucket {
            if !buckets.iter().any(|b| &b.name == wanted || &b.id == wanted) {
                return Err(WizardError::Config(format!("unknown starting bucket: {wanted}")));
            }
        }
        Ok(())
    }

    pub fn loader_type(&self) -> Result<Option<DataLoaderType>> {
        self.loader_type
            .as_deref()
            .map(str::parse::<DataLoaderType>)
            .transpose()
            .map_err(WizardError::from)
    }

    pub fn substep(&self) -> Result<Option<Substep>> {
        self.substep
            .as_deref()
            .map(str::parse::<Substep>)
            .transpose()
            .map_err(WizardError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::ParseError;
    use std::io::Write;

    const SAMPLE: &str = r#"
[general]
title = "Acme Console"

[user]
name = "ada"

[[buckets]]
organization = "acme"
organization_id = "o1"
name = "metrics"
id = "b1"

[[buckets]]
organization = "acme"
organization_id = "o1"
name = "logs"
id = "b2"

[starting]
bucket = "logs"
loader_type = ""
step = 2
substep = "0"
"#;

    #[test]
    fn parses_full_config() {
        let config = WizardConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.general.title, "Acme Console");
        assert_eq!(config.username(), "ada");
        assert_eq!(config.buckets.len(), 2);
        assert_eq!(config.starting_bucket().map(|b| b.id.as_str()), Some("b2"));
        assert_eq!(config.starting.loader_type().unwrap(), Some(DataLoaderType::Empty));
        assert_eq!(config.starting.substep().unwrap(), Some(Substep::Index(0)));
        assert_eq!(config.starting.step, Some(2));
        assert_eq!(config.links, Links::default());
    }

    #[test]
    fn rejects_unknown_starting_bucket() {
        let err = WizardConfig::parse("[starting]\nbucket = \"nope\"\n").unwrap_err();
        assert!(matches!(err, WizardError::Config(_)));
    }

    #[test]
    fn rejects_bad_loader_type() {
        let err = WizardConfig::parse("[starting]\nloader_type = \"kafka\"\n").unwrap_err();
        assert!(matches!(err, WizardError::Parse(ParseError::LoaderType(ref t)) if t == "kafka"));
    }

    #[test]
    fn rejects_bad_substep() {
        let err = WizardConfig::parse("[starting]\nsubstep = \"later\"\n").unwrap_err();
        assert!(matches!(err, WizardError::Parse(ParseError::Substep(ref s)) if s == "later"));
        assert_eq!(err.to_string(), "Invalid starting value: invalid substep: later");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WizardConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert!(config.buckets.is_empty());
        assert!(config.starting.step.is_none());
        assert_eq!(config.general.title, "Load Data");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = WizardConfig::load_from(file.path()).unwrap();
        assert_eq!(config.buckets[0].name, "metrics");
    }
}
