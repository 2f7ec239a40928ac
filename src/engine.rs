use std::mem;

use tracing::{debug, trace};

use crate::config::{ConfigError, ConfigFile};
use crate::count::Counts;
use crate::key::KeyEvent;
use crate::keymap::Keymap;
use crate::motion;
use crate::operator;
use crate::status::{self, Notification, StatusLine};
use crate::traits::TextBuffer;
use crate::types::{Action, AnchorMode, Mode, MoveOperation, Motion, Operator, VisualKind};

/// An operator waiting for the motion that delimits its range, together
/// with the count typed before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOperator {
    pub op: Operator,
    pub count: u32,
}

/// What the engine did with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Insert mode: handed to [`TextBuffer::native_key`].
    Forwarded,
    /// The key extended the repeat count, now at this value.
    Count(u32),
    /// The key's action ran. Unbound keys report [`Action::None`].
    Executed(Action),
}

#[derive(Debug, Clone, Copy)]
enum InsertEntry {
    AtCursor,
    AtLineStart,
    AfterCursor,
    AtLineEnd,
    NewlineBelow,
    NewlineAbove,
}

#[derive(Debug, Clone)]
pub struct Engine {
    mode: Mode,
    pending: Option<PendingOperator>,
    counts: Counts,
    keymap: Keymap,
    notifications: Vec<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub pending_operator: Option<Operator>,
    pub pending_count: u32,
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    keymap: Keymap,
}

impl EngineBuilder {
    pub fn keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn config(self, config: &ConfigFile) -> Result<Self, ConfigError> {
        Ok(self.keymap(config.keymap()?))
    }

    pub fn build(self) -> Engine {
        Engine {
            mode: Mode::Normal,
            pending: None,
            counts: Counts::default(),
            keymap: self.keymap,
            notifications: Vec::new(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_operator(&self) -> Option<PendingOperator> {
        self.pending
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            pending_operator: self.pending.map(|p| p.op),
            pending_count: self.counts.value(),
        }
    }

    pub fn status(&self) -> StatusLine {
        StatusLine {
            mode: status::mode_label(self.mode),
            count: status::count_label(self.counts.value()),
            command: status::command_label(self.pending.map(|p| p.op)),
        }
    }

    /// Notifications queued since the last call, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    pub fn handle_key<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, key: KeyEvent) -> Dispatch {
        let action = self.keymap.resolve(key.combination());
        trace!(target: "engine.dispatch", mode = ?self.mode, key = ?key.code, mods = ?key.mods, ?action, count = self.counts.value(), "key");

        if self.mode == Mode::Insert && action != Action::Navigate {
            buf.native_key(&key);
            return Dispatch::Forwarded;
        }

        // Count digits; a leading zero falls through to the keymap
        if let Some(digit) = key.text.and_then(|c| c.to_digit(10))
            && self.counts.accepts(digit)
        {
            self.push_count_digit(digit);
            return Dispatch::Count(self.counts.value());
        }

        self.execute(buf, action);
        Dispatch::Executed(action)
    }

    fn execute<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, action: Action) {
        let count = self.consume_count();
        match action {
            Action::Move(motion) => self.apply_motion(buf, motion, count),
            Action::Change => self.apply_operator(buf, Operator::Change, count),
            Action::Delete => self.apply_operator(buf, Operator::Delete, count),
            Action::CharDelete => self.char_delete(buf, count),
            Action::Navigate => self.navigate(buf),
            Action::EnterVisual => self.enter_visual(buf, VisualKind::Char),
            Action::EnterVisualLine => self.enter_visual(buf, VisualKind::Line),
            Action::EnterVisualBlock => self.enter_visual(buf, VisualKind::Block),
            Action::InsertAtCursor => self.enter_insert(buf, InsertEntry::AtCursor),
            Action::InsertAtLineStart => self.enter_insert(buf, InsertEntry::AtLineStart),
            Action::AppendAfterCursor => self.enter_insert(buf, InsertEntry::AfterCursor),
            Action::AppendAtLineEnd => self.enter_insert(buf, InsertEntry::AtLineEnd),
            Action::InsertNewlineBelow => self.enter_insert(buf, InsertEntry::NewlineBelow),
            Action::InsertNewlineAbove => self.enter_insert(buf, InsertEntry::NewlineAbove),
            Action::None => {}
        }
    }

    fn apply_motion<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, motion: Motion, count: u32) {
        let Some(pending) = self.pending else {
            let anchor = if self.mode.is_visual() {
                AnchorMode::KeepAnchor
            } else {
                AnchorMode::MoveAnchor
            };
            motion::resolve(buf, motion, anchor, count);
            return;
        };

        let count = pending.count.saturating_mul(count);
        let range = operator::motion_range(buf, pending.op, motion, count);
        debug!(target: "engine.operator", op = ?pending.op, ?motion, count, start = range.start, end = range.end, "apply");
        operator::remove(buf, range);
        self.set_pending(None);
        if pending.op == Operator::Change {
            self.set_mode(Mode::Insert);
        }
    }

    fn apply_operator<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, op: Operator, count: u32) {
        if self.mode.is_visual() {
            self.apply_to_selection(buf, op);
            return;
        }
        debug!(target: "engine.operator", ?op, count, "armed");
        self.set_pending(Some(PendingOperator { op, count }));
    }

    fn apply_to_selection<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, op: Operator) {
        let range = operator::selection_range(buf);
        debug!(target: "engine.operator", ?op, start = range.start, end = range.end, "apply_selection");
        operator::remove(buf, range);
        self.set_mode(match op {
            Operator::Change => Mode::Insert,
            Operator::Delete => Mode::Normal,
        });
    }

    fn char_delete<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, count: u32) {
        if self.mode.is_visual() {
            self.apply_to_selection(buf, Operator::Delete);
            return;
        }
        self.set_pending(None);
        let range = operator::char_range(buf, count);
        operator::remove(buf, range);
    }

    fn navigate<B: TextBuffer + ?Sized>(&mut self, buf: &mut B) {
        if self.pending.is_some() {
            debug!(target: "engine.operator", "cancelled");
            self.set_pending(None);
        }
        let pos = buf.cursor();
        buf.set_cursor(pos, AnchorMode::MoveAnchor);
        if self.mode == Mode::Normal {
            return;
        }
        // Step back off the insertion point, staying on this line.
        if pos > 0 && buf.char_at(pos - 1) != Some('\n') {
            buf.move_cursor(MoveOperation::Left, AnchorMode::MoveAnchor, 1);
        }
        self.set_mode(Mode::Normal);
    }

    fn enter_visual<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, kind: VisualKind) {
        match self.mode {
            Mode::Visual(current) if current == kind => {
                let pos = buf.cursor();
                buf.set_cursor(pos, AnchorMode::MoveAnchor);
                self.set_mode(Mode::Normal);
            }
            Mode::Visual(_) => self.set_mode(Mode::Visual(kind)),
            Mode::Normal | Mode::Insert => {
                let pos = buf.cursor();
                buf.set_cursor(pos, AnchorMode::MoveAnchor);
                self.set_mode(Mode::Visual(kind));
            }
        }
    }

    fn enter_insert<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, entry: InsertEntry) {
        if self.mode.is_visual() {
            return;
        }
        let pos = buf.cursor();
        match entry {
            InsertEntry::AtCursor => {}
            InsertEntry::AtLineStart => buf.move_cursor(MoveOperation::StartOfLine, AnchorMode::MoveAnchor, 1),
            InsertEntry::AfterCursor => {
                if matches!(buf.char_at(pos), Some(c) if c != '\n') {
                    buf.move_cursor(MoveOperation::Right, AnchorMode::MoveAnchor, 1);
                }
            }
            InsertEntry::AtLineEnd => buf.move_cursor(MoveOperation::EndOfLine, AnchorMode::MoveAnchor, 1),
            InsertEntry::NewlineBelow => {
                let end = motion::line_end(buf, pos);
                buf.insert_text(end, "\n");
                buf.set_cursor(end + 1, AnchorMode::MoveAnchor);
            }
            InsertEntry::NewlineAbove => {
                let start = motion::line_start(buf, pos);
                buf.insert_text(start, "\n");
                buf.set_cursor(start, AnchorMode::MoveAnchor);
            }
        }
        self.set_mode(Mode::Insert);
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        if mode != Mode::Normal {
            self.set_pending(None);
        }
        debug!(target: "engine.mode", from = ?self.mode, to = ?mode, "mode_change");
        self.mode = mode;
        self.notifications
            .push(Notification::ModeChanged(status::mode_label(mode).to_string()));
    }

    fn set_pending(&mut self, pending: Option<PendingOperator>) {
        let changed = self.pending.map(|p| p.op) != pending.map(|p| p.op);
        self.pending = pending;
        if changed {
            let label = status::command_label(pending.map(|p| p.op));
            self.notifications
                .push(Notification::CommandChanged(label.to_string()));
        }
    }

    fn push_count_digit(&mut self, digit: u32) {
        let before = self.counts.value();
        self.counts.push_digit(digit);
        let after = self.counts.value();
        if after != before {
            trace!(target: "engine.count", count = after, "count_change");
            self.notifications
                .push(Notification::CountChanged(status::count_label(after)));
        }
    }

    fn consume_count(&mut self) -> u32 {
        let count = self.counts.take();
        if count > 1 {
            trace!(target: "engine.count", count = 1, "count_reset");
            self.notifications
                .push(Notification::CountChanged(status::count_label(1)));
        }
        count
    }
}
