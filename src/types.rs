use std::str::FromStr;

use crate::config::ConfigError;

/// The current mode of the engine.
///
/// The same keys perform different actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal mode - for navigation and operators.
    Normal,
    /// Insert mode - keys go to the buffer's own text insertion.
    Insert,
    /// Visual mode - motions grow a selection from a fixed anchor.
    Visual(VisualKind),
}

impl Mode {
    pub fn is_visual(self) -> bool {
        matches!(self, Mode::Visual(_))
    }
}

/// The type of visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    /// Character-wise selection (v).
    Char,
    /// Line-wise selection (V).
    Line,
    /// Block selection (Ctrl-v).
    Block,
}

/// A selection inside the host buffer.
///
/// The anchor stays put while the position follows the cursor. Outside the
/// visual modes the two are always equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub position: usize,
}

impl Selection {
    /// A collapsed selection at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self {
            anchor: pos,
            position: pos,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.position)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.position
    }
}

/// Whether a cursor move drags the selection anchor along or leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// Cursor moves alone; the selection collapses onto it.
    MoveAnchor,
    /// Anchor stays; the selection grows or shrinks.
    KeepAnchor,
}

/// Single-step cursor movements understood by
/// [`TextBuffer::move_cursor`](crate::TextBuffer::move_cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOperation {
    Left,
    Right,
    Up,
    Down,
    /// Start of the next word, stopping at a line end before crossing it.
    NextWord,
    /// Start of the word under or before the cursor.
    StartOfWord,
    /// One past the last character of the word under or after the cursor.
    EndOfWord,
    StartOfLine,
    EndOfLine,
}

/// Motions bound to movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// h
    Left,
    /// j
    Down,
    /// k
    Up,
    /// l
    Right,
    /// w
    WordForward,
    /// b
    WordBackward,
    /// e
    WordEnd,
}

impl Motion {
    /// Inclusive motions take the character under the target into an
    /// operator's range.
    pub fn is_inclusive(self) -> bool {
        matches!(self, Motion::WordEnd)
    }
}

/// Edit operators that wait for a motion in Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Change,
    Delete,
}

/// Abstract intents a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Motion),
    Change,
    Delete,
    CharDelete,
    /// Return to Normal mode (the mode-exit key).
    Navigate,
    EnterVisual,
    EnterVisualLine,
    EnterVisualBlock,
    InsertAtCursor,
    InsertAtLineStart,
    InsertNewlineBelow,
    InsertNewlineAbove,
    AppendAfterCursor,
    AppendAtLineEnd,
    None,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Move(Motion::Left) => "move_left",
            Action::Move(Motion::Down) => "move_down",
            Action::Move(Motion::Up) => "move_up",
            Action::Move(Motion::Right) => "move_right",
            Action::Move(Motion::WordForward) => "word_forward",
            Action::Move(Motion::WordBackward) => "word_backward",
            Action::Move(Motion::WordEnd) => "word_end",
            Action::Change => "change",
            Action::Delete => "delete",
            Action::CharDelete => "char_delete",
            Action::Navigate => "navigate",
            Action::EnterVisual => "enter_visual",
            Action::EnterVisualLine => "enter_visual_line",
            Action::EnterVisualBlock => "enter_visual_block",
            Action::InsertAtCursor => "insert_at_cursor",
            Action::InsertAtLineStart => "insert_at_line_start",
            Action::InsertNewlineBelow => "insert_newline_below",
            Action::InsertNewlineAbove => "insert_newline_above",
            Action::AppendAfterCursor => "append_after_cursor",
            Action::AppendAtLineEnd => "append_at_line_end",
            Action::None => "none",
        }
    }

    /// Every bindable action, in keymap order.
    pub const ALL: [Action; 21] = [
        Action::Move(Motion::Left),
        Action::Move(Motion::Down),
        Action::Move(Motion::Up),
        Action::Move(Motion::Right),
        Action::Move(Motion::WordForward),
        Action::Move(Motion::WordBackward),
        Action::Move(Motion::WordEnd),
        Action::Change,
        Action::Delete,
        Action::CharDelete,
        Action::Navigate,
        Action::EnterVisual,
        Action::EnterVisualLine,
        Action::EnterVisualBlock,
        Action::InsertAtCursor,
        Action::InsertAtLineStart,
        Action::InsertNewlineBelow,
        Action::InsertNewlineAbove,
        Action::AppendAfterCursor,
        Action::AppendAtLineEnd,
        Action::None,
    ];
}

impl FromStr for Action {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ConfigError::UnknownAction(s.to_string()))
    }
}
