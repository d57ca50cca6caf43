use super::{
    cursor::Cursor,
    kinds::{BlockEmbed, BlockMention, BlockRef, DayLink, DayPhrase, UID_CHARS},
    span::Span,
    types::{Marker, MarkerKind, Payload},
};

/// Finds the next block marker to substitute.
///
/// Tiers are tried in [`MarkerKind::BLOCK_TIERS`] order; within a tier the
/// leftmost marker whose uid passes `accept` wins. Markers that `accept`
/// rejects are skipped, so an unresolvable marker never shadows a later
/// resolvable one.
pub fn find_block_marker(s: &str, accept: impl Fn(&str) -> bool) -> Option<Marker> {
    MarkerKind::BLOCK_TIERS.iter().find_map(|&kind| {
        let mut at = 0;
        while at < s.len() {
            let mut cur = Cursor::at(s, at);
            if let Some(marker) = try_parse(&mut cur, kind) {
                if marker.uid(s).is_some_and(&accept) {
                    return Some(marker);
                }
            }
            at += 1;
        }
        None
    })
}

/// Scans `s` left to right and returns every non-overlapping marker.
///
/// At each position the block kinds are tried in priority order, then day
/// links, so an embed is reported once rather than as an embed plus the
/// `((uid))` it wraps.
pub fn parse_markers(s: &str) -> Vec<Marker> {
    let mut cur = Cursor::at(s, 0);
    let mut out = vec![];

    'scan: while !cur.eof() {
        for kind in MarkerKind::BLOCK_TIERS
            .into_iter()
            .chain([MarkerKind::DayLink])
        {
            if let Some(marker) = try_parse(&mut cur, kind) {
                out.push(marker);
                continue 'scan;
            }
        }
        cur.bump();
    }

    out
}

/// Attempts to parse a marker of `kind` at the cursor.
///
/// On failure the cursor position is restored.
fn try_parse(cur: &mut Cursor<'_>, kind: MarkerKind) -> Option<Marker> {
    match kind {
        MarkerKind::BlockEmbed => {
            try_parse_uid_marker(cur, kind, BlockEmbed::OPEN, BlockEmbed::CLOSE)
        }
        MarkerKind::BlockMention => {
            try_parse_uid_marker(cur, kind, BlockMention::OPEN, BlockMention::CLOSE)
        }
        MarkerKind::BlockReference => {
            try_parse_uid_marker(cur, kind, BlockRef::OPEN, BlockRef::CLOSE)
        }
        MarkerKind::DayLink => try_parse_day_link(cur),
    }
}

/// Parses `open`, exactly [`UID_CHARS`] chars of uid, then `close`.
fn try_parse_uid_marker(
    cur: &mut Cursor<'_>,
    kind: MarkerKind,
    open: &[u8],
    close: &[u8],
) -> Option<Marker> {
    if !cur.starts_with(open) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(open.len());
    let uid_start = cur.pos();

    if !cur.bump_chars(UID_CHARS) || !cur.starts_with(close) {
        *cur = saved;
        return None;
    }
    let uid_end = cur.pos();
    cur.bump_n(close.len());

    Some(Marker {
        kind,
        full: Span {
            start,
            end: cur.pos(),
        },
        payload: Payload::Uid(Span {
            start: uid_start,
            end: uid_end,
        }),
    })
}

/// Parses `[[<day phrase>]]`.
fn try_parse_day_link(cur: &mut Cursor<'_>) -> Option<Marker> {
    if !cur.starts_with(DayLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(DayLink::OPEN.len());
    let phrase_start = cur.pos();

    let Some(phrase) = DayPhrase::parse_at(cur) else {
        *cur = saved;
        return None;
    };
    let phrase_end = cur.pos();

    if !cur.eat(DayLink::CLOSE) {
        *cur = saved;
        return None;
    }

    Some(Marker {
        kind: MarkerKind::DayLink,
        full: Span {
            start,
            end: cur.pos(),
        },
        payload: Payload::Day {
            phrase,
            span: Span {
                start: phrase_start,
                end: phrase_end,
            },
        },
    })
}
