//! Flattening languages into byte-level label mappings, and finding which
//! languages are structurally identical.
use std::cmp::Ordering;

use indexmap::IndexMap;
use log::debug;

use crate::alphabet::Language;

/// One label of one tile, as seen by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingEntry {
    first_byte: u8,
    len: usize,
    tile_index: u8,
    position: usize,
    label: String,
}

impl MappingEntry {
    /// The byte the decoder switches on.
    #[inline]
    #[must_use]
    pub const fn first_byte(&self) -> u8 {
        self.first_byte
    }

    /// The label's length in bytes.
    #[inline]
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.len
    }

    /// The index of the tile this label belongs to.
    #[inline]
    #[must_use]
    pub const fn tile_index(&self) -> u8 {
        self.tile_index
    }

    /// Where the label sits among its tile's labels, 0 being the normal one.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The label text.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label's bytes.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.label.as_bytes()
    }
}

/// The order the decoder tests labels in.
///
/// Fields compare as: first byte ascending, byte length descending, then
/// tile index, position and label text ascending. Longer labels are thus
/// tried before any shorter label sharing their first byte.
#[must_use]
pub fn decode_order(a: &MappingEntry, b: &MappingEntry) -> Ordering {
    a.first_byte
        .cmp(&b.first_byte)
        .then_with(|| b.len.cmp(&a.len))
        .then_with(|| a.tile_index.cmp(&b.tile_index))
        .then_with(|| a.position.cmp(&b.position))
        .then_with(|| a.label.cmp(&b.label))
}

/// Flatten a language into one [`MappingEntry`] per label, in tile order.
///
/// # Panics
///
/// If a tile has an empty label or there are more than
/// [`MAX_TILES`](crate::alphabet::MAX_TILES) tiles. Languages from
/// [`extract`](crate::alphabet::extract) never do.
#[must_use]
pub fn flatten(language: &Language) -> Vec<MappingEntry> {
    language
        .tiles()
        .iter()
        .enumerate()
        .flat_map(|(index, tile)| {
            let tile_index = u8::try_from(index).unwrap_or_else(|_| {
                panic!("{} has too many tiles", language.name())
            });
            tile.labels().iter().enumerate().map(move |(position, label)| {
                let Some(&first_byte) = label.as_bytes().first() else {
                    panic!(
                        "tile {index} of {} has an empty label",
                        language.name()
                    );
                };
                MappingEntry {
                    first_byte,
                    len: label.len(),
                    tile_index,
                    position,
                    label: label.clone(),
                }
            })
        })
        .collect()
}

/// A language along with its flattened mapping.
#[derive(Debug, Clone)]
pub struct LanguageMapping {
    language: Language,
    entries: Vec<MappingEntry>,
}

impl LanguageMapping {
    /// Flatten `language`.
    #[must_use]
    pub fn new(language: Language) -> Self {
        let entries = flatten(&language);
        LanguageMapping { language, entries }
    }

    /// The language this mapping was made from.
    #[inline]
    #[must_use]
    pub const fn language(&self) -> &Language {
        &self.language
    }

    /// The entries, in tile order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }
}

/// A language that reuses another's table and decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// The language being aliased.
    pub name: String,
    /// The canonical language it shares everything with.
    pub target: String,
}

/// Languages split into those that get their own tables and those that
/// alias one of them.
#[derive(Debug, Clone)]
pub struct Canonicalized {
    canonical: Vec<LanguageMapping>,
    aliases: Vec<Alias>,
}

impl Canonicalized {
    /// Group languages by identical mappings.
    ///
    /// Within each group the first language in `languages` is canonical.
    /// Both the canonical languages and the aliases keep `languages`' order.
    #[must_use]
    pub fn new(languages: impl IntoIterator<Item = Language>) -> Self {
        let mut by_entries = IndexMap::<Vec<MappingEntry>, Language>::new();
        let mut aliases = Vec::new();
        for language in languages {
            let entries = flatten(&language);
            match by_entries.get(&entries) {
                Some(target) => {
                    debug!("{} aliases {}", language.name(), target.name());
                    aliases.push(Alias {
                        name: language.name().to_owned(),
                        target: target.name().to_owned(),
                    });
                },
                None => {
                    by_entries.insert(entries, language);
                },
            }
        }
        let canonical = by_entries
            .into_iter()
            .map(|(entries, language)| LanguageMapping { language, entries })
            .collect();
        Canonicalized { canonical, aliases }
    }

    /// Languages that get their own table and decoder, in discovery order.
    #[inline]
    #[must_use]
    pub fn canonical(&self) -> &[LanguageMapping] {
        &self.canonical
    }

    /// Languages that reuse a canonical language, in discovery order.
    #[inline]
    #[must_use]
    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    /// The canonical language `name` resolves to, if it was seen at all.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&LanguageMapping> {
        let target = self
            .aliases
            .iter()
            .find(|alias| alias.name == name)
            .map_or(name, |alias| alias.target.as_str());
        self.canonical
            .iter()
            .find(|mapping| mapping.language.name() == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::TileDef;

    fn language(name: &str, tiles: &[&[&str]]) -> Language {
        Language::new(
            name,
            tiles
                .iter()
                .map(|labels| TileDef::new(labels.iter().copied()).unwrap())
                .collect(),
        )
    }

    #[test]
    fn flatten_emits_one_entry_per_label() {
        let entries = flatten(&language("tiny", &[&["A"], &["B", "?"]]));
        let summary = entries
            .iter()
            .map(|entry| {
                (
                    entry.first_byte(),
                    entry.byte_len(),
                    entry.tile_index(),
                    entry.position(),
                    entry.label(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(summary, [
            (b'A', 1, 0, 0, "A"),
            (b'B', 1, 1, 0, "B"),
            (b'?', 1, 1, 1, "?"),
        ]);
    }

    #[test]
    fn flatten_counts_bytes_not_chars() {
        let entries = flatten(&language("catalan", &[&["L·L", "l·l"]]));
        assert_eq!(entries[0].byte_len(), 4);
        assert_eq!(entries[0].first_byte(), b'L');
        assert_eq!(entries[1].first_byte(), b'l');
    }

    #[test]
    fn decode_order_puts_longer_labels_first() {
        let mut entries = flatten(&language("spanish", &[
            &["C", "c"],
            &["CH", "ch"],
            &["A", "a"],
        ]));
        entries.sort_by(decode_order);
        let labels = entries.iter().map(MappingEntry::label).collect::<Vec<_>>();
        assert_eq!(labels, ["A", "CH", "C", "a", "ch", "c"]);
    }

    #[test]
    fn decode_order_breaks_ties_by_index_then_position() {
        let mut entries =
            flatten(&language("dupes", &[&["X", "Y"], &["Y", "X"]]));
        entries.sort_by(decode_order);
        let keys = entries
            .iter()
            .map(|entry| (entry.label(), entry.tile_index(), entry.position()))
            .collect::<Vec<_>>();
        assert_eq!(keys, [("X", 0, 0), ("X", 1, 1), ("Y", 0, 1), ("Y", 1, 0)]);
    }

    #[test]
    fn identical_languages_alias_the_first() {
        let tiles: &[&[&str]] = &[&["?", "?"], &["A", "a"], &["B", "b"]];
        let canonicalized = Canonicalized::new([
            language("english", tiles),
            language("german", &[&["?", "?"], &["Ä", "ä"]]),
            language("french", tiles),
            language("super_english", tiles),
        ]);
        let canonical = canonicalized
            .canonical()
            .iter()
            .map(|mapping| mapping.language().name())
            .collect::<Vec<_>>();
        assert_eq!(canonical, ["english", "german"]);
        assert_eq!(canonicalized.aliases(), [
            Alias {
                name: String::from("french"),
                target: String::from("english"),
            },
            Alias {
                name: String::from("super_english"),
                target: String::from("english"),
            },
        ]);
        assert_eq!(
            canonicalized.resolve("french").unwrap().language().name(),
            "english",
        );
        assert!(canonicalized.resolve("klingon").is_none());
    }

    #[test]
    fn label_order_matters_for_identity() {
        let canonicalized = Canonicalized::new([
            language("one", &[&["A", "a"]]),
            language("two", &[&["a", "A"]]),
        ]);
        assert_eq!(canonicalized.canonical().len(), 2);
        assert!(canonicalized.aliases().is_empty());
    }
}
