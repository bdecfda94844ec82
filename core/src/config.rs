use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    emit::EmitOptions,
    errors::{ConfigError, TileGenError},
};

/// Generator settings, typically loaded from a `tilegen.toml`.
///
/// Every field is optional so command-line flags can fill in or override
/// whatever the file leaves out. A fully specified file looks like:
///
/// ```toml
/// input = "../wolges/src/alphabet.rs"
/// data_dir = "../wolges/alphabets"
/// tile_type = "Tile"
/// parsed_tile_type = "ParsedTile"
/// preamble = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// The alphabet source to scan.
    pub input: Option<PathBuf>,
    /// Where alphabet data files are resolved from. Defaults to the
    /// directory containing `input`.
    pub data_dir: Option<PathBuf>,
    /// The C type of a tile record.
    pub tile_type: Option<String>,
    /// The C type returned by decode functions.
    pub parsed_tile_type: Option<String>,
    /// Emit `#include`s and type definitions first.
    pub preamble: Option<bool>,
}

impl GeneratorConfig {
    /// Load a config file.
    ///
    /// Relative paths inside it are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TileGenError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|io_err| {
            TileGenError::FailedToRead(path.to_owned(), io_err)
        })?;
        let mut config = GeneratorConfig::parse(&content, path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.input = config.input.map(|input| base.join(input));
        config.data_dir = config.data_dir.map(|dir| base.join(dir));
        Ok(config)
    }

    /// Parse config file contents, `path` is only used for errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|toml_err| ConfigError::Parse(path.to_owned(), toml_err))
    }

    /// Fill in anything unset here from `fallback`.
    #[must_use]
    pub fn or(self, fallback: GeneratorConfig) -> Self {
        GeneratorConfig {
            input: self.input.or(fallback.input),
            data_dir: self.data_dir.or(fallback.data_dir),
            tile_type: self.tile_type.or(fallback.tile_type),
            parsed_tile_type: self.parsed_tile_type.or(fallback.parsed_tile_type),
            preamble: self.preamble.or(fallback.preamble),
        }
    }

    /// The input path, which must have been set by now.
    pub fn input(&self) -> Result<&Path, ConfigError> {
        self.input.as_deref().ok_or(ConfigError::MissingInput)
    }

    /// The data directory, falling back to the input's directory.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(data_dir) = &self.data_dir {
            return Ok(data_dir.clone());
        }
        let input = self.input()?;
        Ok(input
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf))
    }

    /// The emitter settings, with defaults for anything unset.
    pub fn emit_options(&self) -> Result<EmitOptions, ConfigError> {
        let defaults = EmitOptions::default();
        let tile_type = self
            .tile_type
            .as_deref()
            .unwrap_or(defaults.tile_type());
        let parsed_tile_type = self
            .parsed_tile_type
            .as_deref()
            .unwrap_or(defaults.parsed_tile_type());
        Ok(EmitOptions::default()
            .with_types(tile_type, parsed_tile_type)?
            .with_preamble(self.preamble.unwrap_or(defaults.preamble())))
    }
}
