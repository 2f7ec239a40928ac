use crate::types::{Mode, Operator, VisualKind};

/// Change notifications for hosts that show the engine state.
///
/// Queued only when the underlying value really changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ModeChanged(String),
    CountChanged(String),
    CommandChanged(String),
}

/// The three status strings at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub mode: &'static str,
    pub count: String,
    pub command: &'static str,
}

pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "NORMAL",
        Mode::Insert => "INSERT",
        Mode::Visual(VisualKind::Char) => "VISUAL",
        Mode::Visual(VisualKind::Line) => "VISUAL LINE",
        Mode::Visual(VisualKind::Block) => "VISUAL BLOCK",
    }
}

pub fn count_label(count: u32) -> String {
    format!("count: {count}")
}

pub fn command_label(op: Option<Operator>) -> &'static str {
    match op {
        Some(Operator::Delete) => "d",
        Some(Operator::Change) => "c",
        None => "no command",
    }
}
