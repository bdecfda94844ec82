// Alphabet definitions in the shape the generator scans for.

macro_rules! tile {
    ($label:expr, $blank_label:expr, $freq:expr, $score:expr, $vowel:expr $(,)?) => {
        Tile {
            label: $label,
            blank_label: $blank_label,
            freq: $freq,
            score: $score,
            is_vowel: $vowel != 0,
            alias_labels: &[],
            alias_blank_labels: &[],
        }
    };
    ($label:expr, $blank_label:expr, $freq:expr, $score:expr, $vowel:expr, $alias:expr, $blank_alias:expr $(,)?) => {
        Tile {
            label: $label,
            blank_label: $blank_label,
            freq: $freq,
            score: $score,
            is_vowel: $vowel != 0,
            alias_labels: $alias,
            alias_blank_labels: $blank_alias,
        }
    };
}

pub fn make_catalan_alphabet() -> Alphabet {
    Alphabet::new_static(StaticAlphabet {
        tiles: &[
            tile!("?", "?", 2, 0, 0),
            tile!("A", "a", 12, 1, 1),
            tile!("C", "c", 3, 2, 0),
            tile!("Ç", "ç", 1, 10, 0, &["K"], &["k"]),
            tile!("L", "l", 4, 1, 0),
            tile!("L·L", "l·l", 1, 10, 0, &["L.L", "W"], &["l.l", "w"]),
            tile!("N", "n", 6, 1, 0),
            tile!("NY", "ny", 1, 10, 0, &["Y"], &["y"]),
            tile!("QU", "qu", 1, 8, 0),
        ],
        ..Default::default()
    })
}

pub fn make_english_alphabet() -> Alphabet {
    Alphabet::new_static(StaticAlphabet {
        tiles: &[
            tile!("?", "?", 2, 0, 0),
            tile!("A", "a", 9, 1, 1),
            tile!("B", "b", 2, 3, 0),
            tile!("Z", "z", 1, 10, 0),
        ],
        ..Default::default()
    })
}

// Same tiles as English.
pub fn make_french_alphabet() -> Alphabet {
    Alphabet::new_static(StaticAlphabet {
        tiles: &[
            tile!("?", "?", 2, 0, 0),
            tile!("A", "a", 9, 1, 1),
            tile!("B", "b", 2, 3, 0),
            tile!("Z", "z", 1, 10, 0),
        ],
        ..Default::default()
    })
}

pub fn make_spanish_alphabet() -> Alphabet {
    Alphabet::new_static(StaticAlphabet {
        tiles: &[
            tile!("?", "?", 2, 0, 0),
            tile!("A", "a", 12, 1, 1),
            tile!("C", "c", 4, 3, 0),
            tile!("[CH]", "[ch]", 1, 5, 0, &["CH", "Ç"], &["ch", "ç"]),
            tile!("Ñ", "ñ", 1, 8, 0),
        ],
        ..Default::default()
    })
}

// Same tiles as English again.
pub fn make_super_english_alphabet() -> Alphabet {
    Alphabet::new_static(StaticAlphabet {
        tiles: &[
            tile!("?", "?", 2, 0, 0),
            tile!("A", "a", 9, 1, 1),
            tile!("B", "b", 2, 3, 0),
            tile!("Z", "z", 1, 10, 0),
        ],
        ..Default::default()
    })
}
