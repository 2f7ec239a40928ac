use crate::key::{KeyCode, KeyEvent};
use crate::motion;
use crate::types::{AnchorMode, MoveOperation, Selection};

/// The host buffer the engine edits.
///
/// Offsets are character indices in `[0, len]`. The buffer owns the text, the
/// cursor and the selection anchor; the engine only asks for reads and edits
/// through this trait.
pub trait TextBuffer {
    // Basic queries
    /// Character at `offset`, `None` past the end.
    fn char_at(&self, offset: usize) -> Option<char>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Cursor and selection
    fn cursor(&self) -> usize;
    /// Move the cursor to `pos`. `MoveAnchor` collapses the selection onto
    /// the cursor, `KeepAnchor` leaves the anchor where it is.
    fn set_cursor(&mut self, pos: usize, anchor: AnchorMode);
    fn selection(&self) -> Selection;

    // Edits
    fn insert_text(&mut self, pos: usize, text: &str);
    /// Remove the half-open range `[start, end)`.
    fn remove_range(&mut self, start: usize, end: usize);

    fn clamp(&self, pos: usize) -> usize {
        pos.min(self.len())
    }

    /// Multi-step movement primitive. The default walks the text through
    /// `char_at`; hosts with their own cursor model may override it.
    fn move_cursor(&mut self, op: MoveOperation, anchor: AnchorMode, count: u32) {
        let target = motion::step(&*self, self.cursor(), op, count);
        self.set_cursor(target, anchor);
    }

    /// Native text insertion for keys the engine passes through in Insert
    /// mode.
    fn native_key(&mut self, key: &KeyEvent) {
        let at = self.clamp(self.cursor());
        match key.code {
            KeyCode::Backspace => {
                if at > 0 {
                    self.remove_range(at - 1, at);
                    self.set_cursor(at - 1, AnchorMode::MoveAnchor);
                }
            }
            _ => {
                if let Some(c) = key.text {
                    let mut utf8 = [0u8; 4];
                    self.insert_text(at, c.encode_utf8(&mut utf8));
                    self.set_cursor(at + 1, AnchorMode::MoveAnchor);
                }
            }
        }
    }
}
