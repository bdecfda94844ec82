//! Extracting per-language tile tables from an alphabet source file.
//!
//! The source is scanned line by line. `fn make_<name>_alphabet` starts a
//! language; its tiles come either from `tile!(...)` lines that follow it, or
//! from a data file named by a quoted path on the introduction line itself.
use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::errors::{
    AlphabetError, AlphabetErrorKind, DataFileError, DataFileErrorKind,
    TileGenError,
};

/// Tile indices are emitted as `uint8_t`.
pub const MAX_TILES: usize = u8::MAX as usize + 1;

const INTRO_PREFIX: &str = "fn make_";
const INTRO_SUFFIX: &str = "_alphabet";
const TILE_MARKER: &str = "tile!";

/// Column holding the alias-label count in an alphabet data file.
const ALIAS_COUNT_COLUMN: usize = 5;

/// One tile position, with every label it can be written as.
///
/// The first label is the normal one, the second (if any) is how the tile is
/// shown when played as a blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDef {
    labels: Vec<String>,
}

impl TileDef {
    /// Create a tile from its labels.
    ///
    /// Returns `None` if `labels` is empty.
    pub fn new(
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Option<Self> {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<_>>();
        (!labels.is_empty()).then_some(TileDef { labels })
    }

    /// The normal display label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.labels[0]
    }

    /// The blank display label, if the tile has one.
    #[inline]
    #[must_use]
    pub fn blank_label(&self) -> Option<&str> {
        self.labels.get(1).map(String::as_str)
    }

    /// All labels, normal first.
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// A language's alphabet, in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    name: String,
    tiles: Vec<TileDef>,
}

impl Language {
    /// Create a language from its tiles.
    pub fn new(name: impl Into<String>, tiles: Vec<TileDef>) -> Self {
        Language {
            name: name.into(),
            tiles,
        }
    }

    /// The name taken from `make_<name>_alphabet`.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tiles; a tile's index is its position here.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[TileDef] {
        &self.tiles
    }
}

/// Where alphabet data files named by the source are read from.
pub trait DataSource {
    /// Resolve the path as written in the alphabet source.
    fn resolve(&self, name: &str) -> PathBuf;

    /// Read a resolved data file.
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads data files relative to a base directory.
#[derive(Debug, Clone)]
pub struct FsDataSource {
    base_dir: PathBuf,
}

impl FsDataSource {
    /// Resolve data files against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        FsDataSource {
            base_dir: base_dir.into(),
        }
    }
}

impl DataSource for FsDataSource {
    fn resolve(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Extract every language declared in `source`, in declaration order.
///
/// `path` is only used in error messages.
pub fn extract(
    source: &str,
    path: &Path,
    data_source: &impl DataSource,
) -> Result<Vec<Language>, TileGenError> {
    let mut scanner = Scanner::new(path, data_source);
    source
        .lines()
        .enumerate()
        .try_for_each(|(index, line)| scanner.scan_line(index + 1, line))?;
    scanner.finish()
}

enum ScanState {
    Outside,
    Inside(PendingLanguage),
}

struct PendingLanguage {
    name: String,
    line: usize,
    body: LanguageBody,
}

enum LanguageBody {
    Inline { tiles: Vec<TileDef> },
    FileReference { file: String },
}

struct Scanner<'a, D> {
    path: &'a Path,
    data_source: &'a D,
    state: ScanState,
    languages: Vec<Language>,
    seen: HashSet<String>,
}

impl<'a, D: DataSource> Scanner<'a, D> {
    fn new(path: &'a Path, data_source: &'a D) -> Self {
        Scanner {
            path,
            data_source,
            state: ScanState::Outside,
            languages: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn scan_line(
        &mut self,
        line_no: usize,
        line: &str,
    ) -> Result<(), TileGenError> {
        if let Some(name) = language_intro(line) {
            self.close()?;
            if !self.seen.insert(name.to_owned()) {
                let kind = AlphabetErrorKind::DuplicateLanguage(name.to_owned());
                return Err(self.error(line_no, kind).into());
            }
            let body = match quoted_strings(line).next() {
                Some(file) => LanguageBody::FileReference {
                    file: file.to_owned(),
                },
                None => LanguageBody::Inline { tiles: Vec::new() },
            };
            debug!("found alphabet {name} on line {line_no}");
            self.state = ScanState::Inside(PendingLanguage {
                name: name.to_owned(),
                line: line_no,
                body,
            });
            return Ok(());
        }

        let ScanState::Inside(PendingLanguage {
            name,
            body: LanguageBody::Inline { tiles },
            ..
        }) = &mut self.state
        else {
            return Ok(());
        };
        if !has_tile_marker(line) {
            return Ok(());
        }
        let labels = quoted_strings(line).collect::<Vec<_>>();
        let kind = if labels.is_empty() {
            Some(AlphabetErrorKind::NoLabels {
                language: name.clone(),
                tile: tiles.len(),
            })
        } else if labels.iter().any(|label| label.is_empty()) {
            Some(AlphabetErrorKind::EmptyLabel {
                language: name.clone(),
                tile: tiles.len(),
            })
        } else {
            None
        };
        if let Some(kind) = kind {
            return Err(self.error(line_no, kind).into());
        }
        // Checked non-empty above
        tiles.extend(TileDef::new(labels));
        Ok(())
    }

    /// Finish the language being collected, if any.
    fn close(&mut self) -> Result<(), TileGenError> {
        let ScanState::Inside(pending) =
            std::mem::replace(&mut self.state, ScanState::Outside)
        else {
            return Ok(());
        };
        let PendingLanguage { name, line, body } = pending;
        let tiles = match body {
            LanguageBody::Inline { tiles } => tiles,
            LanguageBody::FileReference { file } => {
                let data_path = self.data_source.resolve(&file);
                debug!("reading {name} tiles from {}", data_path.display());
                let content =
                    self.data_source.read(&data_path).map_err(|io_err| {
                        TileGenError::FailedToRead(data_path.clone(), io_err)
                    })?;
                parse_data_file(&content, &data_path)?
            },
        };

        if tiles.is_empty() {
            return Err(self.error(line, AlphabetErrorKind::NoTiles(name)).into());
        }
        if tiles.len() > MAX_TILES {
            let kind = AlphabetErrorKind::TooManyTiles {
                language: name,
                count: tiles.len(),
            };
            return Err(self.error(line, kind).into());
        }
        if tiles.iter().any(|tile| tile.labels().len() > 2) {
            warn!(
                "{name} has tiles with more than two labels, the extra labels \
                 are decoded but never displayed"
            );
        }
        debug!("{name} has {} tiles", tiles.len());
        self.languages.push(Language::new(name, tiles));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Language>, TileGenError> {
        self.close()?;
        Ok(self.languages)
    }

    fn error(&self, line: usize, kind: AlphabetErrorKind) -> AlphabetError {
        AlphabetError {
            path: self.path.to_owned(),
            line,
            kind,
        }
    }
}

/// Parse an alphabet data file, one tile per line.
///
/// Columns are whitespace-delimited: the normal and blank labels, three
/// ignored columns, then a count of alias labels followed by that many
/// labels, then a count of blank-alias labels followed by that many labels.
pub fn parse_data_file(
    content: &str,
    path: &Path,
) -> Result<Vec<TileDef>, DataFileError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_data_line(line).map_err(|kind| DataFileError {
                path: path.to_owned(),
                line: index + 1,
                kind,
            })
        })
        .collect()
}

fn parse_data_line(line: &str) -> Result<TileDef, DataFileErrorKind> {
    let columns = line.split_whitespace().collect::<Vec<_>>();
    let column = |index: usize| {
        columns
            .get(index)
            .copied()
            .ok_or(DataFileErrorKind::MissingColumn(index))
    };
    let count = |index: usize| -> Result<usize, DataFileErrorKind> {
        let value = column(index)?;
        value
            .parse::<usize>()
            .map_err(|source| DataFileErrorKind::InvalidCount {
                column: index,
                value: value.to_owned(),
                source,
            })
    };
    let slice = |start: usize, len: usize| {
        columns
            .get(start..start.saturating_add(len))
            .ok_or(DataFileErrorKind::MissingColumn(columns.len().max(start)))
    };

    let mut labels = vec![column(0)?, column(1)?];
    let alias_count = count(ALIAS_COUNT_COLUMN)?;
    let aliases_start = ALIAS_COUNT_COLUMN + 1;
    labels.extend_from_slice(slice(aliases_start, alias_count)?);

    let blank_count_column = aliases_start + alias_count;
    let blank_count = count(blank_count_column)?;
    labels.extend_from_slice(slice(blank_count_column + 1, blank_count)?);

    Ok(TileDef {
        labels: labels.into_iter().map(String::from).collect(),
    })
}

/// The language name if `line` introduces an alphabet constructor.
fn language_intro(line: &str) -> Option<&str> {
    line.match_indices(INTRO_PREFIX).find_map(|(start, _)| {
        if !word_boundary_before(line, start) {
            return None;
        }
        let rest = &line[start + INTRO_PREFIX.len()..];
        let word_len = rest
            .find(|c: char| !is_word_char(c))
            .unwrap_or(rest.len());
        rest[..word_len]
            .strip_suffix(INTRO_SUFFIX)
            .filter(|name| !name.is_empty())
    })
}

fn has_tile_marker(line: &str) -> bool {
    line.match_indices(TILE_MARKER)
        .any(|(start, _)| word_boundary_before(line, start))
}

/// Every complete `"..."` run, with no escape handling.
fn quoted_strings(line: &str) -> impl Iterator<Item = &str> {
    let mut rest = line;
    std::iter::from_fn(move || {
        let open = rest.find('"')?;
        let after_open = &rest[open + 1..];
        let close = after_open.find('"')?;
        let quoted = &after_open[..close];
        rest = &after_open[close + 1..];
        Some(quoted)
    })
}

fn word_boundary_before(line: &str, index: usize) -> bool {
    line[..index].chars().next_back().is_none_or(|c| !is_word_char(c))
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
