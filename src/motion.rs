//! Cursor movement over a [`TextBuffer`].
//!
//! Two layers live here. The primitives behind
//! [`TextBuffer::move_cursor`] compute a single kind of step over the text
//! (`step`). The motion resolver (`resolve`) turns a bound [`Motion`] into a
//! sequence of primitive moves, repeated `count` times.
//!
//! Characters fall into three classes: blanks (whitespace, plus the `None`
//! returned past the end of the buffer), word characters (alphanumerics and
//! `_`) and punctuation. A word is a maximal run of one non-blank class.

use crate::traits::TextBuffer;
use crate::types::{AnchorMode, MoveOperation, Motion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Blank,
    Word,
    Punct,
}

fn class_of(c: Option<char>) -> CharClass {
    match c {
        None => CharClass::Blank,
        Some(c) if c.is_whitespace() => CharClass::Blank,
        Some(c) if c.is_alphanumeric() || c == '_' => CharClass::Word,
        Some(_) => CharClass::Punct,
    }
}

/// Whitespace or the end-of-buffer sentinel.
pub(crate) fn is_blank(c: Option<char>) -> bool {
    class_of(c) == CharClass::Blank
}

fn is_line_blank(c: Option<char>) -> bool {
    matches!(c, Some(c) if c != '\n' && c.is_whitespace())
}

/// Offset of the first character of the line containing `pos`.
pub fn line_start<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let mut p = buf.clamp(pos);
    while p > 0 && buf.char_at(p - 1) != Some('\n') {
        p -= 1;
    }
    p
}

/// Offset of the `\n` ending the line containing `pos`, or `len` on the last
/// line.
pub fn line_end<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let len = buf.len();
    let mut p = buf.clamp(pos);
    while p < len && buf.char_at(p) != Some('\n') {
        p += 1;
    }
    p
}

// Keeps the starting column, clamped to the target line's end.
fn vertical<B: TextBuffer + ?Sized>(buf: &B, pos: usize, count: u32, down: bool) -> usize {
    let start = line_start(buf, pos);
    let col = pos - start;
    let mut line = start;
    for _ in 0..count {
        if down {
            let end = line_end(buf, line);
            if end >= buf.len() {
                break;
            }
            line = end + 1;
        } else {
            if line == 0 {
                break;
            }
            line = line_start(buf, line - 1);
        }
    }
    (line + col).min(line_end(buf, line))
}

fn next_word_start<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let len = buf.len();
    if pos >= len {
        return len;
    }
    let mut p = pos;
    match buf.char_at(p) {
        Some('\n') => p += 1,
        c => {
            let class = class_of(c);
            if class != CharClass::Blank {
                while p < len && class_of(buf.char_at(p)) == class {
                    p += 1;
                }
            }
        }
    }
    while p < len && is_line_blank(buf.char_at(p)) {
        p += 1;
    }
    p
}

fn start_of_word<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let mut p = buf.clamp(pos);
    while p > 0 && is_blank(buf.char_at(p)) {
        p -= 1;
    }
    let class = class_of(buf.char_at(p));
    if class == CharClass::Blank {
        return p;
    }
    while p > 0 && class_of(buf.char_at(p - 1)) == class {
        p -= 1;
    }
    p
}

fn end_of_word<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let len = buf.len();
    let mut p = buf.clamp(pos);
    while p < len && is_blank(buf.char_at(p)) {
        p += 1;
    }
    let class = class_of(buf.char_at(p));
    while p < len && class_of(buf.char_at(p)) == class {
        p += 1;
    }
    p
}

fn repeat(from: usize, count: u32, mut f: impl FnMut(usize) -> usize) -> usize {
    let mut pos = from;
    for _ in 0..count {
        let next = f(pos);
        if next == pos {
            break;
        }
        pos = next;
    }
    pos
}

/// Target of `count` primitive steps from `from`, clamped to the buffer.
pub fn step<B: TextBuffer + ?Sized>(buf: &B, from: usize, op: MoveOperation, count: u32) -> usize {
    let from = buf.clamp(from);
    let count = count.max(1);
    match op {
        MoveOperation::Left => from.saturating_sub(count as usize),
        MoveOperation::Right => from.saturating_add(count as usize).min(buf.len()),
        MoveOperation::StartOfLine => line_start(buf, from),
        MoveOperation::EndOfLine => line_end(buf, from),
        MoveOperation::Up => vertical(buf, from, count, false),
        MoveOperation::Down => vertical(buf, from, count, true),
        MoveOperation::NextWord => repeat(from, count, |p| next_word_start(buf, p)),
        MoveOperation::StartOfWord => repeat(from, count, |p| start_of_word(buf, p)),
        MoveOperation::EndOfWord => repeat(from, count, |p| end_of_word(buf, p)),
    }
}

/// Apply `motion` to the buffer cursor `count` times.
pub fn resolve<B: TextBuffer + ?Sized>(buf: &mut B, motion: Motion, anchor: AnchorMode, count: u32) {
    let count = count.max(1);
    match motion {
        Motion::Left => buf.move_cursor(MoveOperation::Left, anchor, count),
        Motion::Down => buf.move_cursor(MoveOperation::Down, anchor, count),
        Motion::Up => buf.move_cursor(MoveOperation::Up, anchor, count),
        Motion::Right => buf.move_cursor(MoveOperation::Right, anchor, count),
        Motion::WordForward => buf.move_cursor(MoveOperation::NextWord, anchor, count),
        Motion::WordBackward => repeat_on(buf, count, |buf| {
            buf.move_cursor(MoveOperation::Left, anchor, 1);
            buf.move_cursor(MoveOperation::StartOfWord, anchor, 1);
        }),
        Motion::WordEnd => repeat_on(buf, count, |buf| word_end(buf, anchor)),
    }
}

fn repeat_on<B: TextBuffer + ?Sized>(buf: &mut B, count: u32, mut f: impl FnMut(&mut B)) {
    for _ in 0..count {
        let before = buf.cursor();
        f(buf);
        if buf.cursor() == before {
            break;
        }
    }
}

// NextWord stops at line ends, so a word ending right before a newline (or
// the buffer end) needs a second jump to reach the next word.
fn word_end<B: TextBuffer + ?Sized>(buf: &mut B, anchor: AnchorMode) {
    let pos = buf.cursor();
    let here = buf.char_at(pos);
    let next = buf.char_at(pos + 1);
    // Already on the last char of a run: move on to the next word first
    if is_blank(here) || class_of(next) != class_of(here) {
        buf.move_cursor(MoveOperation::NextWord, anchor, 1);
    }
    if matches!(next, None | Some('\n')) {
        buf.move_cursor(MoveOperation::NextWord, anchor, 1);
    }
    buf.move_cursor(MoveOperation::EndOfWord, anchor, 1);
    // EndOfWord lands one past the last character
    buf.move_cursor(MoveOperation::Left, anchor, 1);
}
