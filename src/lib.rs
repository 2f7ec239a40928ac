//! A Vim-style modal editing engine.
//!
//! The [`Engine`] turns key events into edits on a host buffer reached
//! through the [`TextBuffer`] trait. It tracks the mode, a pending repeat
//! count and a pending operator, and queues [`Notification`]s whenever one
//! of them changes.

pub mod config;
mod count;
pub mod engine;
pub mod key;
pub mod keymap;
pub mod motion;
mod operator;
pub mod status;
pub mod traits;
pub mod types;

pub use crate::config::{ConfigError, ConfigFile};
pub use crate::engine::{Dispatch, Engine, EngineBuilder, EngineSnapshot, PendingOperator};
pub use crate::key::{KeyCode, KeyCombination, KeyEvent, Modifiers};
pub use crate::keymap::Keymap;
pub use crate::status::{Notification, StatusLine};
pub use crate::traits::TextBuffer;
pub use crate::types::{Action, AnchorMode, Mode, MoveOperation, Motion, Operator, Selection, VisualKind};
