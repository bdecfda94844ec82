#![cfg_attr(docsrs, feature(doc_cfg))]
//! tilegen turns the alphabet definitions of a word-game rules library into C:
//! for every language, a static array of tile labels and a `switch`-based
//! function decoding the tile at the front of a byte string.
//!
//! Generation runs in three stages:
//!
//! 1. [`alphabet::extract`] scans the alphabet source for
//!    `fn make_<name>_alphabet` constructors and their tiles, either inline
//!    `tile!(...)` declarations or a referenced alphabet data file.
//! 2. [`Canonicalized`] flattens every language into [`MappingEntry`]s and
//!    folds structurally identical languages onto the first one seen.
//! 3. [`Emitter`] writes a table and decoder per canonical language, and a
//!    pair of pointer aliases per folded language.
//!
//! ```
//! # use std::path::Path;
//! # use tilegen::{EmitOptions, FsDataSource, Generator};
//! # fn main() -> Result<(), tilegen::errors::TileGenError> {
//! let source = r#"
//! pub fn make_tiny_alphabet() -> Alphabet {
//!     tile!("?", "?", 2, 0, 0),
//!     tile!("A", "a", 9, 1, 1),
//! }
//! "#;
//! let options = EmitOptions::default();
//! let generator = Generator::new(FsDataSource::new("."), &options);
//! let code = generator.generate(source, Path::new("alphabet.rs"))?;
//! assert!(code.contains("tile tiny_tileset[] = {"));
//! assert!(code.contains("parsed_tile tiny_tileset_parse(uint8_t *ptr) {"));
//! # Ok(())
//! # }
//! ```

use std::{fs, path::Path};

use log::info;

pub mod alphabet;
mod config;
pub mod decode;
pub mod emit;
pub mod errors;
pub mod mapping;

pub use alphabet::{DataSource, FsDataSource, Language, TileDef};
pub use config::GeneratorConfig;
pub use decode::{DecodeTable, ParsedTile};
pub use emit::{EmitOptions, Emitter};
pub use mapping::{Canonicalized, MappingEntry};

use crate::errors::TileGenError;

/// Runs the whole pipeline over an alphabet source.
#[derive(Debug)]
pub struct Generator<'a, D> {
    data_source: D,
    options: &'a EmitOptions,
}

impl<'a, D: DataSource> Generator<'a, D> {
    /// Create a generator reading data files from `data_source`.
    pub const fn new(data_source: D, options: &'a EmitOptions) -> Self {
        Generator {
            data_source,
            options,
        }
    }

    /// Extract and canonicalize the languages in `source`.
    ///
    /// `path` is only used in error messages.
    pub fn canonicalize(
        &self,
        source: &str,
        path: &Path,
    ) -> Result<Canonicalized, TileGenError> {
        let languages = alphabet::extract(source, path, &self.data_source)?;
        let canonicalized = Canonicalized::new(languages);
        info!(
            "{} alphabets to generate, {} aliased",
            canonicalized.canonical().len(),
            canonicalized.aliases().len(),
        );
        Ok(canonicalized)
    }

    /// Generate C for every language in `source`.
    ///
    /// Nothing is returned unless every language was generated.
    pub fn generate(
        &self,
        source: &str,
        path: &Path,
    ) -> Result<String, TileGenError> {
        let canonicalized = self.canonicalize(source, path)?;
        let mut code = String::new();
        Emitter::new(self.options).emit(&mut code, &canonicalized)?;
        Ok(code)
    }

    /// Read the alphabet source at `path` and generate C for it.
    pub fn generate_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<String, TileGenError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|io_err| {
            TileGenError::FailedToRead(path.to_owned(), io_err)
        })?;
        self.generate(&source, path)
    }
}

/// Generate C as described by a fully merged [`GeneratorConfig`].
pub fn generate(config: &GeneratorConfig) -> Result<String, TileGenError> {
    let options = config.emit_options()?;
    let data_source = FsDataSource::new(config.data_dir()?);
    Generator::new(data_source, &options).generate_file(config.input()?)
}
