use ropey::Rope;
use vim_modal::{AnchorMode, Selection, TextBuffer};

pub struct MockBuffer {
    rope: Rope,
    sel: Selection,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self::at(text, 0)
    }

    pub fn at(text: &str, cursor: usize) -> Self {
        let rope = Rope::from_str(text);
        let cursor = cursor.min(rope.len_chars());
        Self {
            rope,
            sel: Selection::caret(cursor),
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    fn shift_after_removal(p: usize, start: usize, end: usize) -> usize {
        if p >= end {
            p - (end - start)
        } else if p > start {
            start
        } else {
            p
        }
    }
}

impl TextBuffer for MockBuffer {
    fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn cursor(&self) -> usize {
        self.sel.position
    }

    fn set_cursor(&mut self, pos: usize, anchor: AnchorMode) {
        self.sel.position = pos.min(self.len());
        if anchor == AnchorMode::MoveAnchor {
            self.sel.anchor = self.sel.position;
        }
    }

    fn selection(&self) -> Selection {
        self.sel
    }

    fn insert_text(&mut self, pos: usize, text: &str) {
        let at = pos.min(self.len());
        self.rope.insert(at, text);
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        let start = start.min(end);
        self.rope.remove(start..end);
        self.sel.anchor = Self::shift_after_removal(self.sel.anchor, start, end);
        self.sel.position = Self::shift_after_removal(self.sel.position, start, end);
    }
}
