//! The errors produced by tilegen.
//!
//! Any of these aborts generation: nothing is emitted for a run that hit one.
use std::{fmt, io, num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// Generation failed, nothing was emitted.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TileGenError {
    /// Unable to read the alphabet source or one of its data files.
    #[error("failed to read from {}: {}", .0.display(), .1)]
    FailedToRead(PathBuf, io::Error),
    /// The alphabet source declared something we can't generate from.
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
    /// A referenced alphabet data file was malformed.
    #[error(transparent)]
    DataFile(#[from] DataFileError),
    /// The generator configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Formatting the generated code failed.
    #[error("failed to format generated code: {0}")]
    Format(#[from] fmt::Error),
}

/// A language in the alphabet source couldn't be turned into a tile table.
#[derive(Debug, Error)]
#[error("{}:{}: {}", .path.display(), .line, .kind)]
pub struct AlphabetError {
    pub(crate) path: PathBuf,
    pub(crate) line: usize,
    pub(crate) kind: AlphabetErrorKind,
}

impl AlphabetError {
    /// The 1-based line in the alphabet source the problem was found on.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> &AlphabetErrorKind {
        &self.kind
    }
}

/// The reason an [`AlphabetError`] was raised.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlphabetErrorKind {
    /// A tile had a `""` label, which can never be decoded.
    #[error("tile {tile} of {language} has an empty label")]
    EmptyLabel {
        /// The language being declared.
        language: String,
        /// The index of the offending tile.
        tile: usize,
    },
    /// A `tile!` line without any quoted label.
    #[error("tile {tile} of {language} has no labels")]
    NoLabels {
        /// The language being declared.
        language: String,
        /// The index of the offending tile.
        tile: usize,
    },
    /// The same `make_<name>_alphabet` appeared twice.
    #[error("alphabet {0} is declared more than once")]
    DuplicateLanguage(String),
    /// An alphabet constructor without a single tile.
    #[error("alphabet {0} declares no tiles")]
    NoTiles(String),
    /// Tile indices are emitted as `uint8_t`.
    #[error("alphabet {language} has {count} tiles, at most 256 are supported")]
    TooManyTiles {
        /// The language being declared.
        language: String,
        /// How many tiles it declared.
        count: usize,
    },
}

/// A line of an alphabet data file didn't have the expected columns.
#[derive(Debug, Error)]
#[error("{}:{}: {}", .path.display(), .line, .kind)]
pub struct DataFileError {
    pub(crate) path: PathBuf,
    pub(crate) line: usize,
    pub(crate) kind: DataFileErrorKind,
}

impl DataFileError {
    /// The 1-based line in the data file the problem was found on.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> &DataFileErrorKind {
        &self.kind
    }
}

/// The reason a [`DataFileError`] was raised.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataFileErrorKind {
    /// The line ended before a required column.
    #[error("missing column {0}")]
    MissingColumn(usize),
    /// A label count column wasn't a number.
    #[error("column {column} should be a label count, got {value:?}: {source}")]
    InvalidCount {
        /// The 0-based column of the count.
        column: usize,
        /// What was actually there.
        value: String,
        /// Why it didn't parse.
        source: ParseIntError,
    },
}

/// The generator configuration was unusable.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file wasn't valid TOML or had unknown keys.
    #[error("failed to parse config from {}: {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
    /// A C type name that C wouldn't accept.
    #[error("{0:?} is not a valid C identifier")]
    InvalidIdentifier(String),
    /// Neither the command line nor the config file named an input.
    #[error("no alphabet source given")]
    MissingInput,
}
