use vim_modal::{
    Action, Dispatch, Engine, KeyCode, KeyCombination, KeyEvent, Keymap, Mode, Modifiers, Notification,
    Operator, StatusLine, TextBuffer, VisualKind,
};

mod support;
use support::mock_buffer::MockBuffer;
use support::{esc, feed};

fn key(c: char) -> KeyEvent {
    KeyEvent::char(c)
}

#[test]
fn starts_in_normal_mode() {
    let eng = Engine::new();
    let snap = eng.snapshot();
    assert_eq!(snap.mode, Mode::Normal);
    assert_eq!(snap.pending_operator, None);
    assert_eq!(snap.pending_count, 1);
    assert_eq!(
        eng.status(),
        StatusLine {
            mode: "NORMAL",
            count: "count: 1".into(),
            command: "no command",
        }
    );
}

#[test]
fn insert_then_escape() {
    let mut buf = MockBuffer::at("hello world", 5);
    let mut eng = Engine::new();

    eng.handle_key(&mut buf, key('i'));
    assert_eq!(eng.mode(), Mode::Insert);
    assert_eq!(buf.cursor(), 5);

    // Typed text, digits included, goes to the buffer
    assert_eq!(eng.handle_key(&mut buf, key('x')), Dispatch::Forwarded);
    assert_eq!(eng.handle_key(&mut buf, key('3')), Dispatch::Forwarded);
    assert_eq!(buf.text(), "hellox3 world");
    assert_eq!(buf.cursor(), 7);
    assert_eq!(eng.snapshot().pending_count, 1);

    // Leaving Insert steps back onto the last typed character
    eng.handle_key(&mut buf, esc());
    assert_eq!(eng.mode(), Mode::Normal);
    assert_eq!(buf.cursor(), 6);
    assert_eq!(
        eng.take_notifications(),
        vec![
            Notification::ModeChanged("INSERT".into()),
            Notification::ModeChanged("NORMAL".into()),
        ]
    );
}

#[test]
fn insert_mode_backspace_and_enter() {
    let mut buf = MockBuffer::at("ab", 2);
    let mut eng = Engine::new();

    eng.handle_key(&mut buf, key('i'));
    eng.handle_key(&mut buf, KeyEvent::from(KeyCode::Backspace));
    eng.handle_key(&mut buf, KeyEvent::from(KeyCode::Enter));
    eng.handle_key(&mut buf, KeyEvent::new(KeyCode::Char('c'), Modifiers::SHIFT));
    assert_eq!(buf.text(), "a\nC");
    assert_eq!(buf.cursor(), 3);
}

#[test]
fn escape_at_line_start_does_not_move() {
    let mut buf = MockBuffer::at("ab\ncd", 3);
    let mut eng = Engine::new();

    eng.handle_key(&mut buf, key('i'));
    eng.handle_key(&mut buf, esc());
    assert_eq!(buf.cursor(), 3);
}

#[test]
fn escape_in_normal_mode_is_silent() {
    let mut buf = MockBuffer::at("hello", 2);
    let mut eng = Engine::new();

    eng.handle_key(&mut buf, esc());
    assert_eq!(buf.cursor(), 2);
    assert!(eng.take_notifications().is_empty());
}

#[test]
fn append_variants() {
    let mut eng = Engine::new();

    // a moves one right
    let mut buf = MockBuffer::at("hello world", 4);
    eng.handle_key(&mut buf, key('a'));
    assert_eq!(buf.cursor(), 5);
    assert_eq!(eng.mode(), Mode::Insert);
    eng.handle_key(&mut buf, esc());

    // a on an empty line stays put
    let mut buf = MockBuffer::at("a\n\nb", 2);
    eng.handle_key(&mut buf, key('a'));
    assert_eq!(buf.cursor(), 2);
    eng.handle_key(&mut buf, esc());

    // A goes to the end of the line
    let mut buf = MockBuffer::at("hello world\nnext", 2);
    eng.handle_key(&mut buf, key('A'));
    assert_eq!(buf.cursor(), 11);
    assert_eq!(eng.mode(), Mode::Insert);
}

#[test]
fn insert_at_line_start() {
    let mut buf = MockBuffer::at("ab\nhello", 7);
    let mut eng = Engine::new();

    eng.handle_key(&mut buf, key('I'));
    assert_eq!(buf.cursor(), 3);
    assert_eq!(eng.mode(), Mode::Insert);
}

#[test]
fn open_line_below_and_above() {
    let mut eng = Engine::new();

    let mut buf = MockBuffer::at("one\ntwo", 1);
    eng.handle_key(&mut buf, key('o'));
    assert_eq!(buf.text(), "one\n\ntwo");
    assert_eq!(buf.cursor(), 4);
    assert_eq!(eng.mode(), Mode::Insert);
    feed(&mut eng, &mut buf, "new");
    assert_eq!(buf.text(), "one\nnew\ntwo");
    eng.handle_key(&mut buf, esc());

    let mut buf = MockBuffer::at("one\ntwo", 5);
    eng.handle_key(&mut buf, key('O'));
    assert_eq!(buf.text(), "one\n\ntwo");
    assert_eq!(buf.cursor(), 4);
    assert_eq!(eng.mode(), Mode::Insert);

    // Nothing typed: Esc stays at the line start
    eng.handle_key(&mut buf, esc());
    assert_eq!(buf.cursor(), 4);
}

#[test]
fn visual_mode_anchor_and_toggle() {
    let mut buf = MockBuffer::at("hello world", 2);
    let mut eng = Engine::new();

    eng.handle_key(&mut buf, key('v'));
    feed(&mut eng, &mut buf, "ll");
    let sel = buf.selection();
    assert_eq!((sel.anchor, sel.position), (2, 4));

    // Switching kind keeps the selection
    eng.handle_key(&mut buf, KeyEvent::new(KeyCode::Char('v'), Modifiers::CTRL));
    assert_eq!(eng.mode(), Mode::Visual(VisualKind::Block));
    assert_eq!(buf.selection().anchor, 2);

    // The same key again leaves visual mode
    eng.handle_key(&mut buf, KeyEvent::new(KeyCode::Char('v'), Modifiers::CTRL));
    assert_eq!(eng.mode(), Mode::Normal);
    assert!(buf.selection().is_empty());
    assert_eq!(buf.cursor(), 4);
    assert_eq!(
        eng.take_notifications(),
        vec![
            Notification::ModeChanged("VISUAL".into()),
            Notification::ModeChanged("VISUAL BLOCK".into()),
            Notification::ModeChanged("NORMAL".into()),
        ]
    );
}

#[test]
fn escape_leaves_visual_mode() {
    let mut buf = MockBuffer::new("abc");
    let mut eng = Engine::new();

    feed(&mut eng, &mut buf, "vll");
    eng.handle_key(&mut buf, esc());
    assert_eq!(eng.mode(), Mode::Normal);
    assert!(buf.selection().is_empty());
    assert_eq!(buf.cursor(), 1);
    assert_eq!(buf.text(), "abc");
}

#[test]
fn insert_keys_are_ignored_in_visual_mode() {
    let mut buf = MockBuffer::new("abc");
    let mut eng = Engine::new();

    feed(&mut eng, &mut buf, "vloa");
    assert_eq!(eng.mode(), Mode::Visual(VisualKind::Char));
    assert_eq!(buf.text(), "abc");
}

#[test]
fn entering_visual_cancels_pending_operator() {
    let mut buf = MockBuffer::new("abc");
    let mut eng = Engine::new();

    feed(&mut eng, &mut buf, "dv");
    assert_eq!(eng.mode(), Mode::Visual(VisualKind::Char));
    assert_eq!(eng.snapshot().pending_operator, None);
    assert_eq!(
        eng.take_notifications(),
        vec![
            Notification::CommandChanged("d".into()),
            Notification::CommandChanged("no command".into()),
            Notification::ModeChanged("VISUAL".into()),
        ]
    );
}

#[test]
fn count_notifications_fire_on_change_only() {
    let mut buf = MockBuffer::new("abcdefghijklmnop");
    let mut eng = Engine::new();

    // "1" leaves the displayed count at 1
    eng.handle_key(&mut buf, key('1'));
    assert!(eng.take_notifications().is_empty());

    eng.handle_key(&mut buf, key('2'));
    assert_eq!(eng.status().count, "count: 12");
    eng.handle_key(&mut buf, key('l'));
    assert_eq!(buf.cursor(), 12);
    assert_eq!(
        eng.take_notifications(),
        vec![
            Notification::CountChanged("count: 12".into()),
            Notification::CountChanged("count: 1".into()),
        ]
    );
}

#[test]
fn status_tracks_pending_operator() {
    let mut buf = MockBuffer::new("abc");
    let mut eng = Engine::new();

    eng.handle_key(&mut buf, key('c'));
    assert_eq!(eng.status().command, "c");
    assert_eq!(eng.pending_operator().map(|p| p.op), Some(Operator::Change));
}

#[test]
fn custom_exit_key() {
    let keymap = Keymap::with_exit_key(KeyCombination::plain(KeyCode::CapsLock));
    let mut eng = Engine::builder().keymap(keymap).build();
    let mut buf = MockBuffer::new("ab");

    eng.handle_key(&mut buf, key('a'));
    assert_eq!(eng.mode(), Mode::Insert);

    // Esc is ordinary input now; with no text it inserts nothing
    assert_eq!(eng.handle_key(&mut buf, esc()), Dispatch::Forwarded);
    assert_eq!(eng.mode(), Mode::Insert);

    assert_eq!(
        eng.handle_key(&mut buf, KeyEvent::from(KeyCode::CapsLock)),
        Dispatch::Executed(Action::Navigate)
    );
    assert_eq!(eng.mode(), Mode::Normal);
    assert_eq!(buf.text(), "ab");
}
