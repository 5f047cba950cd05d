//! Letter-to-number encodings of a personal name.
//!
//! Both alphabets assign every letter A-Z a digit 1-9 in a repeating
//! 9-cycle, but with different permutations, so one name yields two
//! figures that are reported separately.

use crate::core::reduction::reduce_to_archetype_range;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A=1 … I=9, J=1 … R=9, S=1 … Z=8.
const CABALISTIC_VALUES: [u32; 26] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, // A-I
    1, 2, 3, 4, 5, 6, 7, 8, 9, // J-R
    1, 2, 3, 4, 5, 6, 7, 8, // S-Z
];

/// Cycle 1 2 3 4 5 8 6 9 7.
const GEMATRIA_VALUES: [u32; 26] = [
    1, 2, 3, 4, 5, 8, 6, 9, 7, // A-I
    1, 2, 3, 4, 5, 8, 6, 9, 7, // J-R
    1, 2, 3, 4, 5, 8, 6, 9, // S-Z
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameAlphabet {
    Cabalistic,
    Gematria,
}

impl NameAlphabet {
    fn table(self) -> &'static [u32; 26] {
        match self {
            NameAlphabet::Cabalistic => &CABALISTIC_VALUES,
            NameAlphabet::Gematria => &GEMATRIA_VALUES,
        }
    }

    /// Value of an uppercase ASCII letter, 0 for anything else.
    pub fn letter_value(self, letter: char) -> u32 {
        if letter.is_ascii_uppercase() {
            self.table()[(letter as u8 - b'A') as usize]
        } else {
            0
        }
    }
}

/// Folds accents to base Latin letters, uppercases and drops non-letters.
///
/// `"José da Silva-Gonçalves"` → `"JOSEDASILVAGONCALVES"`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        // 無法由 NFD 分解的拉丁字母
        match c {
            'ß' => out.push_str("SS"),
            'æ' | 'Æ' => out.push_str("AE"),
            'œ' | 'Œ' => out.push_str("OE"),
            'ø' | 'Ø' => out.push('O'),
            'đ' | 'Đ' => out.push('D'),
            'ł' | 'Ł' => out.push('L'),
            c if c.is_ascii_alphabetic() => out.push(c.to_ascii_uppercase()),
            _ => {}
        }
    }
    out
}

/// Unreduced sum of the name's letters under `alphabet`.
pub fn raw_name_sum(name: &str, alphabet: NameAlphabet) -> u32 {
    normalize_name(name)
        .chars()
        .map(|c| alphabet.letter_value(c))
        .sum()
}

/// Cabalistic name figure in 1..=22.
pub fn cabalistic_number(name: &str) -> u32 {
    reduce_to_archetype_range(raw_name_sum(name, NameAlphabet::Cabalistic))
}

/// Gematria name figure in 1..=22.
pub fn gematria_number(name: &str) -> u32 {
    reduce_to_archetype_range(raw_name_sum(name, NameAlphabet::Gematria))
}
