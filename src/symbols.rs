//! Symbols for symmetry-point labels. Labels are stored as ASCII (`Gamma`, `Sigma1`, `X1`) and can
//! be rendered with Unicode when desired (`Γ`, `Σ₁`, `X₁`).

/// A glyph with an ASCII spelling and a Unicode rendering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl Symbol {
    pub const fn new(ascii: &'static str, unicode: &'static str) -> Self {
        Self { ascii, unicode }
    }
}

macro_rules! sym {
    ($i:ident, $asc:literal, $uni:literal) => {
        pub const $i: Symbol = Symbol::new($asc, $uni);
    };
}

sym!(GAMMA, "Gamma", "Γ");
sym!(SIGMA, "Sigma", "Σ");

sym!(SUB_1, "1", "\u{2081}");
sym!(SUB_2, "2", "\u{2082}");
sym!(SUB_3, "3", "\u{2083}");
sym!(SUB_4, "4", "\u{2084}");
sym!(SUB_5, "5", "\u{2085}");
sym!(SUB_6, "6", "\u{2086}");
sym!(SUB_7, "7", "\u{2087}");
sym!(SUB_8, "8", "\u{2088}");
sym!(SUB_9, "9", "\u{2089}");
sym!(SUB_0, "0", "\u{2080}");

/// Greek letters that appear in point labels, keyed by their ASCII name.
static GREEK: phf::Map<&'static str, Symbol> = phf::phf_map! {
    "Gamma" => GAMMA,
    "Sigma" => SIGMA,
};

/// Returns the Unicode subscript for a digit, if it exists, otherwise `None`.
pub const fn sub_digit(c: char) -> Option<Symbol> {
    match c {
        '0' => Some(SUB_0),
        '1' => Some(SUB_1),
        '2' => Some(SUB_2),
        '3' => Some(SUB_3),
        '4' => Some(SUB_4),
        '5' => Some(SUB_5),
        '6' => Some(SUB_6),
        '7' => Some(SUB_7),
        '8' => Some(SUB_8),
        '9' => Some(SUB_9),
        _ => None,
    }
}

/// Inverse of [`sub_digit`].
fn unsub_digit(c: char) -> Option<char> {
    ('0'..='9').find(|&d| sub_digit(d).is_some_and(|s| s.unicode.starts_with(c)))
}

/// Renders a single point label: Greek names become letters, trailing digits become subscripts.
fn unicode_point_label(label: &str) -> String {
    let stem = label.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &label[stem.len()..];
    let mut out = GREEK
        .get(stem)
        .map_or_else(|| stem.to_string(), |s| s.unicode.to_string());
    for c in digits.chars() {
        match sub_digit(c) {
            Some(s) => out.push_str(s.unicode),
            None => out.push(c),
        }
    }
    out
}

fn ascii_point_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if let Some(s) = GREEK.values().find(|s| s.unicode.starts_with(c)) {
            out.push_str(s.ascii);
        } else if let Some(d) = unsub_digit(c) {
            out.push(d);
        } else {
            out.push(c);
        }
    }
    out
}

/// Renders a label with Unicode. Segment labels `A-B` are rendered part by part.
pub fn unicode_label(label: &str) -> String {
    label
        .split('-')
        .map(unicode_point_label)
        .collect::<Vec<_>>()
        .join("-")
}

/// Converts a label written with Unicode glyphs back to its ASCII spelling. ASCII input is
/// returned unchanged.
pub fn ascii_label(label: &str) -> String {
    label
        .split('-')
        .map(ascii_point_label)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_unicode() {
        assert_eq!(unicode_label("Gamma"), "Γ");
        assert_eq!(unicode_label("Sigma1"), "Σ₁");
        assert_eq!(unicode_label("X1"), "X₁");
        assert_eq!(unicode_label("Gamma-X"), "Γ-X");
        assert_eq!(unicode_label("K"), "K");
    }

    #[test]
    fn test_ascii() {
        assert_eq!(ascii_label("Σ₁"), "Sigma1");
        assert_eq!(ascii_label("Γ-X₁"), "Gamma-X1");
        assert_eq!(ascii_label("Gamma"), "Gamma");
    }
}
