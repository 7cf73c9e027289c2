use thiserror::Error;

use crate::loaders::ParseError;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid starting value: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Wizard view failed: {0}")]
    ViewPanicked(String),
}

pub type Result<T> = std::result::Result<T, WizardError>;
