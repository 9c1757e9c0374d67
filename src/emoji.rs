// Emoji catalog for the status-icon picker, sourced from the `emojis` crate.

/// One pickable emoji: the glyph sent as `statusIcon` plus its CLDR name.
#[derive(Debug, Clone, Copy)]
pub struct EmojiEntry {
    pub glyph: &'static str,
    pub description: &'static str,
}

/// The bundled catalog, in CLDR order. Multi-scalar sequences (flags, skin
/// tones, ZWJ combinations) render unreliably in list prompts and are
/// skipped; anything over 4 UTF-8 bytes is one of those.
pub fn catalog() -> Vec<EmojiEntry> {
    emojis::iter()
        .filter(|emoji| emoji.as_str().len() <= 4)
        .map(|emoji| EmojiEntry {
            glyph: emoji.as_str(),
            description: emoji.name(),
        })
        .collect()
}
