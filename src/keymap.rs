use std::collections::HashMap;

use crate::key::{KeyCode, KeyCombination};
use crate::types::{Action, Motion};

/// Table from key combinations to actions.
///
/// Built before the engine and moved into it; the engine only reads it.
/// Unbound combinations resolve to [`Action::None`]. At most one key is
/// bound to [`Action::Navigate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<KeyCombination, Action>,
    exit_key: Option<KeyCombination>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::standard()
    }
}

impl Keymap {
    /// The standard bindings with `Esc` as the mode-exit key.
    pub fn standard() -> Self {
        Self::with_exit_key(KeyCombination::plain(KeyCode::Esc))
    }

    /// The standard bindings with `exit_key` leaving Insert and Visual modes.
    pub fn with_exit_key(exit_key: KeyCombination) -> Self {
        let ch = |c| KeyCombination::plain(KeyCode::Char(c));
        let bindings = HashMap::from([
            // Moving
            (ch('h'), Action::Move(Motion::Left)),
            (ch('j'), Action::Move(Motion::Down)),
            (ch('k'), Action::Move(Motion::Up)),
            (ch('l'), Action::Move(Motion::Right)),
            (ch('w'), Action::Move(Motion::WordForward)),
            (ch('b'), Action::Move(Motion::WordBackward)),
            (ch('e'), Action::Move(Motion::WordEnd)),
            // Editing
            (ch('c'), Action::Change),
            (ch('d'), Action::Delete),
            (ch('x'), Action::CharDelete),
            // Switching modes
            (ch('v'), Action::EnterVisual),
            (KeyCombination::shift('v'), Action::EnterVisualLine),
            (KeyCombination::ctrl('v'), Action::EnterVisualBlock),
            (ch('i'), Action::InsertAtCursor),
            (KeyCombination::shift('i'), Action::InsertAtLineStart),
            (ch('o'), Action::InsertNewlineBelow),
            (KeyCombination::shift('o'), Action::InsertNewlineAbove),
            (ch('a'), Action::AppendAfterCursor),
            (KeyCombination::shift('a'), Action::AppendAtLineEnd),
        ]);
        let mut map = Self {
            bindings,
            exit_key: None,
        };
        map.bind(exit_key, Action::Navigate);
        map
    }

    /// Bind `combo` to `action`, replacing any earlier binding. Binding
    /// [`Action::None`] turns the key into an explicit no-op.
    ///
    /// Binding [`Action::Navigate`] moves the exit key: the previous exit key
    /// is unbound. Rebinding the exit key to anything else leaves no exit key.
    pub fn bind(&mut self, combo: KeyCombination, action: Action) {
        if action == Action::Navigate {
            if let Some(old) = self.exit_key.replace(combo)
                && old != combo
            {
                self.bindings.remove(&old);
            }
        } else if self.exit_key == Some(combo) {
            self.exit_key = None;
        }
        self.bindings.insert(combo, action);
    }

    pub fn resolve(&self, combo: KeyCombination) -> Action {
        self.bindings.get(&combo).copied().unwrap_or(Action::None)
    }

    /// The key bound to [`Action::Navigate`], if any.
    pub fn exit_key(&self) -> Option<KeyCombination> {
        self.exit_key
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
