// Alphabet definitions backed by data files.

pub fn make_english_alphabet() -> Alphabet { Alphabet::from_file("english.txt") }

pub fn make_french_alphabet() -> Alphabet { Alphabet::from_file("french.txt") }

pub fn make_catalan_alphabet() -> Alphabet { Alphabet::from_file("catalan.txt") }
