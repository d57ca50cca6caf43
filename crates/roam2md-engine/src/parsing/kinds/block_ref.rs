/// Every block uid in an export is exactly this many characters.
pub const UID_CHARS: usize = 9;

/// Inline block reference: `((uid))`.
pub struct BlockRef;

impl BlockRef {
    pub const OPEN: &'static [u8] = b"((";
    pub const CLOSE: &'static [u8] = b"))";
}

/// Full transclusion: `{{embed: ((uid))}}`.
pub struct BlockEmbed;

impl BlockEmbed {
    pub const OPEN: &'static [u8] = b"{{embed: ((";
    pub const CLOSE: &'static [u8] = b"))}}";
}

/// Mention listing: `{{mentions: ((uid))}}`.
pub struct BlockMention;

impl BlockMention {
    pub const OPEN: &'static [u8] = b"{{mentions: ((";
    pub const CLOSE: &'static [u8] = b"))}}";
}
