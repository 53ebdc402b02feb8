use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::renderer::RenderStyle;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

pub const DEFAULT_WIDTH: i64 = 16;
pub const DEFAULT_HEIGHT: i64 = 8;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read or write settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub style: Option<RenderStyle>,
    #[serde(default)]
    pub show_unsolved: Option<bool>,
    #[serde(default)]
    pub show_solved: Option<bool>,
    #[serde(default)]
    pub color: Option<bool>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate(mut self) -> Self {
        self.width = Some(self.get_width());
        self.height = Some(self.get_height());
        self.style = Some(self.get_style());
        self.show_unsolved = Some(self.get_show_unsolved());
        self.show_solved = Some(self.get_show_solved());
        self.color = Some(self.get_color());

        self
    }

    pub fn set_width(mut self, value: i64) -> Self {
        self.width = Some(value);
        self
    }

    pub fn get_width(&self) -> i64 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn set_height(mut self, value: i64) -> Self {
        self.height = Some(value);
        self
    }

    pub fn get_height(&self) -> i64 {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }

    pub fn set_style(mut self, value: RenderStyle) -> Self {
        self.style = Some(value);
        self
    }

    pub fn get_style(&self) -> RenderStyle {
        self.style.unwrap_or_default()
    }

    pub fn set_show_unsolved(mut self, value: bool) -> Self {
        self.show_unsolved = Some(value);
        self
    }

    pub fn get_show_unsolved(&self) -> bool {
        self.show_unsolved.unwrap_or(false)
    }

    pub fn set_show_solved(mut self, value: bool) -> Self {
        self.show_solved = Some(value);
        self
    }

    pub fn get_show_solved(&self) -> bool {
        self.show_solved.unwrap_or(true)
    }

    pub fn set_color(mut self, value: bool) -> Self {
        self.color = Some(value);
        self
    }

    pub fn get_color(&self) -> bool {
        self.color.unwrap_or(false)
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dfmaze")
            .join("settings.ron")
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(data)
    }

    /// Loads settings from `path`, writing the default file first if it is missing.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if let Err(err) = Self::reset_config(path) {
                    log::warn!("Cannot write default settings to {:?}: {}", path, err);
                }
                DEFAULT_SETTINGS.to_string()
            }
            Err(err) => return Err(err.into()),
        };

        Self::from_ron(&data).map_err(|source| SettingsError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}
