//! The decision table behind a generated decode function.
//!
//! [`DecodeTable`] is exactly what the emitter renders as a `switch`, and it
//! can also decode bytes in-process with the same result the generated C
//! would give.
use std::collections::HashSet;

use itertools::Itertools;

use crate::mapping::{MappingEntry, decode_order};

/// The result of decoding: how many bytes were consumed and which tile they
/// spelled.
///
/// `len == 0` means nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedTile {
    /// Bytes consumed.
    pub len: usize,
    /// The tile index, meaningless when `len` is 0.
    pub index: u8,
}

impl ParsedTile {
    /// Nothing matched.
    pub const NOT_FOUND: ParsedTile = ParsedTile { len: 0, index: 0 };

    /// Returns `true` unless this is [`ParsedTile::NOT_FOUND`].
    #[inline]
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.len != 0
    }
}

/// Every label starting with one particular byte.
#[derive(Debug, Clone)]
pub struct DecodeCase {
    first_byte: u8,
    multi_byte: Vec<MappingEntry>,
    single_byte: Option<MappingEntry>,
}

impl DecodeCase {
    /// The byte this case is selected by.
    #[inline]
    #[must_use]
    pub const fn first_byte(&self) -> u8 {
        self.first_byte
    }

    /// Labels longer than one byte, longest first.
    #[inline]
    #[must_use]
    pub fn multi_byte(&self) -> &[MappingEntry] {
        &self.multi_byte
    }

    /// The one-byte label, if any. Without one, the case falls through to
    /// not found.
    #[inline]
    #[must_use]
    pub const fn single_byte(&self) -> Option<&MappingEntry> {
        self.single_byte.as_ref()
    }

    fn decode(&self, input: &[u8]) -> ParsedTile {
        self.multi_byte
            .iter()
            .find(|entry| {
                entry.bytes()[1..]
                    .iter()
                    .enumerate()
                    .all(|(offset, byte)| input.get(offset + 1) == Some(byte))
            })
            .or(self.single_byte.as_ref())
            .map_or(ParsedTile::NOT_FOUND, |entry| ParsedTile {
                len: entry.byte_len(),
                index: entry.tile_index(),
            })
    }
}

/// A language's labels grouped by first byte, in the order they're tested.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    cases: Vec<DecodeCase>,
}

impl DecodeTable {
    /// Build the table for a language's mapping entries.
    ///
    /// Entries are sorted by [`decode_order`], and an entry whose label text
    /// was already seen earlier in that order is dropped.
    #[must_use]
    pub fn new(entries: &[MappingEntry]) -> Self {
        let mut seen = HashSet::new();
        let cases = entries
            .iter()
            .sorted_by(|a, b| decode_order(a, b))
            .filter(|&entry| seen.insert(entry.label()))
            .chunk_by(|entry| entry.first_byte())
            .into_iter()
            .map(|(first_byte, group)| {
                let (multi_byte, single_byte): (Vec<_>, Vec<_>) = group
                    .cloned()
                    .partition(|entry| entry.byte_len() > 1);
                // Equal one-byte labels were deduplicated, and any two
                // different one-byte labels have different first bytes
                debug_assert!(single_byte.len() <= 1);
                DecodeCase {
                    first_byte,
                    multi_byte,
                    single_byte: single_byte.into_iter().next(),
                }
            })
            .collect();
        DecodeTable { cases }
    }

    /// The cases, by ascending first byte.
    #[inline]
    #[must_use]
    pub fn cases(&self) -> &[DecodeCase] {
        &self.cases
    }

    /// Decode the tile at the start of `input`.
    ///
    /// Behaves like the generated C function, with bytes past the end of
    /// `input` never matching.
    #[must_use]
    pub fn decode(&self, input: &[u8]) -> ParsedTile {
        let Some(first_byte) = input.first() else {
            return ParsedTile::NOT_FOUND;
        };
        self.cases
            .binary_search_by_key(first_byte, DecodeCase::first_byte)
            .map_or(ParsedTile::NOT_FOUND, |index| {
                self.cases[index].decode(input)
            })
    }
}
