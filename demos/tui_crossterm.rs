//! Terminal UI demo using crossterm and ratatui.
//!
//! Shows how a host wires a rope buffer into vim_modal and renders the
//! status line from the engine.
//! Run with: cargo run --example tui_crossterm [-- config.toml]
//!
//! Set `RUST_LOG=engine=trace` to write the dispatch log to `vim_modal.log`.

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use ropey::Rope;
use std::error::Error;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use vim_modal::{
    AnchorMode, Engine, KeyCode, KeyEvent, Modifiers, Notification, Selection, TextBuffer,
    config::load_from,
};

/// Text buffer implementation using ropey
struct RopeBuffer {
    rope: Rope,
    sel: Selection,
}

impl RopeBuffer {
    fn new() -> Self {
        Self {
            rope: Rope::from(
                "Welcome to vim_modal!\n\nPress 'i' to enter insert mode.\nPress 'Esc' to return to normal mode.\nPress Ctrl+q to quit.\n\nTry:\n- hjkl, w, b, e for movement\n- 3w to move three words\n- dw, cw, de to delete or change words\n- x to delete a character\n- v, V, Ctrl+v for visual modes\n",
            ),
            sel: Selection::default(),
        }
    }

    /// Line and column of a char offset, for placing the terminal cursor.
    fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        (line, offset - self.rope.line_to_char(line))
    }
}

impl TextBuffer for RopeBuffer {
    fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
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
        self.rope.insert(pos.min(self.len()), text);
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        let start = start.min(end);
        self.rope.remove(start..end);
        let shift = |p: usize| {
            if p >= end {
                p - (end - start)
            } else {
                p.min(start)
            }
        };
        self.sel = Selection {
            anchor: shift(self.sel.anchor),
            position: shift(self.sel.position),
        };
    }
}

struct App {
    engine: Engine,
    buffer: RopeBuffer,
    message: String,
}

impl App {
    fn new(engine: Engine) -> Self {
        Self {
            engine,
            buffer: RopeBuffer::new(),
            message: String::new(),
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        let Some(key) = convert_crossterm_event(event) else {
            return;
        };
        self.engine.handle_key(&mut self.buffer, key);

        // Show the latest change next to the status line
        if let Some(last) = self.engine.take_notifications().pop() {
            self.message = match last {
                Notification::ModeChanged(m) => format!("mode -> {m}"),
                Notification::CountChanged(c) => c,
                Notification::CommandChanged(c) => format!("command -> {c}"),
            };
        }
    }
}

fn convert_crossterm_event(event: CKeyEvent) -> Option<KeyEvent> {
    let mut mods = Modifiers::empty();
    for (flag, m) in [
        (KeyModifiers::SHIFT, Modifiers::SHIFT),
        (KeyModifiers::CONTROL, Modifiers::CTRL),
        (KeyModifiers::ALT, Modifiers::ALT),
        (KeyModifiers::SUPER, Modifiers::META),
    ] {
        if event.modifiers.contains(flag) {
            mods |= m;
        }
    }

    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::CapsLock => KeyCode::CapsLock,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        _ => return None,
    };
    Some(KeyEvent::new(code, mods))
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let rope = &app.buffer.rope;
    let sel = app.buffer.selection();
    let highlighted = if app.engine.mode().is_visual() {
        sel.start()..(sel.end() + 1).min(rope.len_chars())
    } else {
        0..0
    };

    // Main text area, split into spans around the selection
    let mut lines = vec![];
    for i in 0..rope.len_lines() {
        let start = rope.line_to_char(i);
        let text: String = rope.line(i).chars().filter(|&c| c != '\n').collect();
        let end = start + text.chars().count();

        let from = highlighted.start.clamp(start, end) - start;
        let to = highlighted.end.clamp(start, end) - start;
        let before: String = text.chars().take(from).collect();
        let inside: String = text.chars().skip(from).take(to - from).collect();
        let after: String = text.chars().skip(to).collect();
        lines.push(Line::from(vec![
            Span::raw(before),
            Span::styled(inside, Style::default().bg(Color::Blue)),
            Span::raw(after),
        ]));
    }

    let text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("vim_modal demo"),
    );
    f.render_widget(text, chunks[0]);

    // Status line
    let status = app.engine.status();
    let status = Paragraph::new(format!(
        "{} | {} | {} | {}",
        status.mode, status.count, status.command, app.message
    ))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    let (line, col) = app.buffer.line_col(app.buffer.cursor());
    f.set_cursor(chunks[0].x + 1 + col as u16, chunks[0].y + 1 + line as u16);
}

fn configure_logging() -> Option<WorkerGuard> {
    std::env::var_os("RUST_LOG")?;
    let file_appender = tracing_appender::rolling::never(".", "vim_modal.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(err) => {
            eprintln!("logging disabled: {err}");
            None
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _log_guard = configure_logging();

    let mut builder = Engine::builder();
    if let Some(path) = std::env::args().nth(1) {
        builder = builder.config(&load_from(Path::new(&path))?)?;
    }
    let mut app = App::new(builder.build());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if key.code == CKeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            app.handle_crossterm_event(key);
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
