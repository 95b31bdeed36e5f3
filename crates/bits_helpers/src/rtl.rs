//! Right-to-left text preparation.
//!
//! Bevy's text pipeline (cosmic-text) already shapes Arabic glyphs and applies
//! bidirectional reordering, so strings only need normalising before display.

/// Arabic harakat: tanwin, short vowels, shadda, sukun, the superscript alef
/// and the Quranic annotation marks of the Arabic and Arabic Extended-A blocks.
const fn is_haraka(c: char) -> bool {
    matches!(
        c,
        '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{06D6}'..='\u{06DC}'
            | '\u{06DF}'..='\u{06E8}'
            | '\u{06EA}'..='\u{06ED}'
            | '\u{08D4}'..='\u{08E1}'
            | '\u{08E3}'..='\u{08FF}'
    )
}

/// Prepares right-to-left text for rendering, dropping diacritics.
pub fn rtl_text(text: &str) -> String {
    text.chars().filter(|&c| !is_haraka(c)).collect()
}
