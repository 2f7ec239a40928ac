//! Target ranges for Change/Delete and their removal from the buffer.

use std::ops::Range;

use crate::motion::{self, is_blank};
use crate::traits::TextBuffer;
use crate::types::{AnchorMode, Motion, Operator};

/// Range delimited by `motion` from the cursor. The motion runs with
/// `KeepAnchor`, so the buffer selection grows over the range as it would
/// for a visual selection.
pub(crate) fn motion_range<B: TextBuffer + ?Sized>(
    buf: &mut B,
    op: Operator,
    motion: Motion,
    count: u32,
) -> Range<usize> {
    let start = buf.cursor();
    buf.set_cursor(start, AnchorMode::MoveAnchor);
    motion::resolve(buf, motion, AnchorMode::KeepAnchor, count);
    let target = buf.cursor();

    let from = start.min(target);
    let mut to = start.max(target);
    if motion.is_inclusive() {
        to = (to + 1).min(buf.len());
    }
    if op == Operator::Delete && motion == Motion::WordForward {
        to = trim_trailing_blanks(buf, from, to);
    }
    from..to
}

// Deleting words keeps the separator after the last one, unless the range
// is nothing but blanks.
fn trim_trailing_blanks<B: TextBuffer + ?Sized>(buf: &B, from: usize, to: usize) -> usize {
    let mut end = to;
    while end > from && is_blank(buf.char_at(end - 1)) {
        end -= 1;
    }
    if end == from { to } else { end }
}

/// The visual selection, including the character under its far end.
pub(crate) fn selection_range<B: TextBuffer + ?Sized>(buf: &B) -> Range<usize> {
    let sel = buf.selection();
    sel.start()..(sel.end() + 1).min(buf.len())
}

/// Up to `count` characters from the cursor, stopping at the line end.
pub(crate) fn char_range<B: TextBuffer + ?Sized>(buf: &B, count: u32) -> Range<usize> {
    let from = buf.clamp(buf.cursor());
    let end = motion::line_end(buf, from);
    from..from.saturating_add(count as usize).min(end)
}

/// Remove `range` and leave a collapsed cursor at its start. Returns whether
/// anything was removed.
pub(crate) fn remove<B: TextBuffer + ?Sized>(buf: &mut B, range: Range<usize>) -> bool {
    let removed = !range.is_empty();
    if removed {
        buf.remove_range(range.start, range.end);
    }
    buf.set_cursor(range.start, AnchorMode::MoveAnchor);
    removed
}
