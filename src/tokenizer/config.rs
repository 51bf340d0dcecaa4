use crate::error::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bytes requested from the source per read.
pub const DEFAULT_CHUNK_CAPACITY: usize = 64 * 1024;

/// Tokenizer settings.
///
/// Every field has a default, so a JSON document only needs the keys it
/// changes:
///
/// ```
/// use cellstream::TokenizerConfig;
///
/// let cfg = TokenizerConfig::from_json_str(r#"{ "separator": ";", "has_headers": true }"#).unwrap();
/// assert_eq!(cfg.separator, ';');
/// assert_eq!(cfg.quote, Some('"'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Field separator. Must be ASCII and not a row terminator.
    pub separator: char,
    /// Quote character, or `None` to treat quotes as ordinary text.
    pub quote: Option<char>,
    /// Size of each read from the source.
    pub chunk_capacity: usize,
    /// Capture the first row as column names instead of dispatching it.
    pub has_headers: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            separator: ',',
            quote: Some('"'),
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            has_headers: false,
        }
    }
}

fn structural_byte(c: char, what: &str) -> Result<u8> {
    if !c.is_ascii() {
        return Err(Error::InvalidConfig(format!("{what} {c:?} is not ASCII")));
    }
    if c == '\n' || c == '\r' {
        return Err(Error::InvalidConfig(format!("{what} cannot be a row terminator")));
    }
    Ok(c as u8)
}

impl TokenizerConfig {
    /// Check that the settings describe a parseable format.
    pub fn validate(&self) -> Result<()> {
        let sep = structural_byte(self.separator, "separator")?;
        if let Some(q) = self.quote {
            let q = structural_byte(q, "quote")?;
            if q == sep {
                return Err(Error::InvalidConfig(
                    "quote and separator must differ".to_string(),
                ));
            }
        }
        if self.chunk_capacity == 0 {
            return Err(Error::InvalidConfig(
                "chunk_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub(crate) fn separator_byte(&self) -> u8 {
        self.separator as u8
    }

    pub(crate) fn quote_byte(&self) -> Option<u8> {
        self.quote.map(|q| q as u8)
    }
}
