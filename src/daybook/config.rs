use crate::error::{DaybookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DOCUMENT_TITLE: &str = "My Personal Journal";

/// Configuration for daybook, stored in the journal directory as
/// `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaybookConfig {
    /// Title shown on the exported document's cover.
    #[serde(default = "default_document_title")]
    pub document_title: String,

    /// How many keywords to store per entry and show in stats.
    #[serde(default = "default_keyword_count")]
    pub keyword_count: usize,

    /// Fixed display size for embedded images in exports.
    #[serde(default = "default_image_width")]
    pub image_width: u32,
    #[serde(default = "default_image_height")]
    pub image_height: u32,
}

fn default_document_title() -> String {
    DEFAULT_DOCUMENT_TITLE.to_string()
}

fn default_keyword_count() -> usize {
    10
}

fn default_image_width() -> u32 {
    crate::document::IMAGE_DISPLAY_WIDTH
}

fn default_image_height() -> u32 {
    crate::document::IMAGE_DISPLAY_HEIGHT
}

impl Default for DaybookConfig {
    fn default() -> Self {
        Self {
            document_title: default_document_title(),
            keyword_count: default_keyword_count(),
            image_width: default_image_width(),
            image_height: default_image_height(),
        }
    }
}

impl DaybookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DaybookError::Io)?;
        let config: DaybookConfig =
            serde_json::from_str(&content).map_err(DaybookError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DaybookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DaybookError::Serialization)?;
        fs::write(config_path, content).map_err(DaybookError::Io)?;
        Ok(())
    }
}
