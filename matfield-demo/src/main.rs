use std::cell::Cell;
use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use matfield::{
    Binding, ContentKind, EmailValidator, FieldStyle, MaterialTextField, RequiredValidator,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const HELP_TEXT: &str = "Tab/Shift+Tab move between fields • Ctrl+L clear field • Ctrl+Q quit";

#[derive(Debug, Parser)]
#[command(
    name = "matfield-demo",
    version,
    about = "Showcase the Material text field styles"
)]
struct Cli {
    /// Event poll interval in milliseconds
    #[arg(long = "tick-rate", value_name = "MS", default_value_t = 250)]
    tick_rate: u64,

    /// Hide section headings to fit more fields on small terminals
    #[arg(long = "compact")]
    compact: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    App::new(&cli).run()
}

struct Entry {
    heading: Option<(&'static str, Color)>,
    field: MaterialTextField,
}

struct App {
    entries: Vec<Entry>,
    focused: usize,
    scroll: usize,
    email_valid: Binding<bool>,
    password_valid: Binding<bool>,
    full_name_valid: Binding<bool>,
    dirty: Rc<Cell<bool>>,
    tick_rate: Duration,
    compact: bool,
    should_quit: bool,
}

impl App {
    fn new(cli: &Cli) -> Self {
        let dirty = Rc::new(Cell::new(true));

        let name = Binding::new(String::new());
        let email = Binding::new(String::new());
        let password = Binding::new(String::new());
        let full_name = Binding::new(String::new());
        let icons = Binding::new(String::new());
        let disabled = Binding::new(String::new());
        let helper = Binding::new(String::new());
        let counter = Binding::new(String::new());

        let email_valid = Binding::new(false);
        let password_valid = Binding::new(false);
        let full_name_valid = Binding::new(false);

        let mut entries = vec![
            Entry {
                heading: Some(("Basic", Color::Magenta)),
                // Shares its binding with the field below, like two views of
                // the same model value.
                field: MaterialTextField::new(name.clone(), "First Name"),
            },
            Entry {
                heading: None,
                field: MaterialTextField::new(name, "Last Name").style(FieldStyle::Outlined),
            },
            Entry {
                heading: Some(("Validation", Color::Red)),
                field: MaterialTextField::new(email, "Email address")
                    .bind_validity(email_valid.clone())
                    .content_kind(ContentKind::Email)
                    .accent_color(Color::Magenta)
                    .add_validators(vec![
                        Box::new(RequiredValidator::with_message("Please enter your email")),
                        Box::new(EmailValidator::new()),
                    ]),
            },
            Entry {
                heading: None,
                field: MaterialTextField::new(password, "Enter password")
                    .bind_validity(password_valid.clone())
                    .accent_color(Color::Magenta)
                    .is_secure(true)
                    .add_validators(vec![Box::new(RequiredValidator::with_message(
                        "Please enter your password",
                    ))])
                    .right_decoration(Span::styled("◉", Style::default().fg(Color::Gray))),
            },
            Entry {
                heading: None,
                field: MaterialTextField::new(full_name, "Fullname")
                    .style(FieldStyle::Outlined)
                    .bind_validity(full_name_valid.clone())
                    .content_kind(ContentKind::Name)
                    .accent_color(Color::Magenta)
                    .add_validators(vec![Box::new(RequiredValidator::with_message(
                        "Please enter your full name",
                    ))]),
            },
            Entry {
                heading: Some(("Icons", Color::Blue)),
                field: MaterialTextField::new(icons.clone(), "Date Picker")
                    .accent_color(Color::Red)
                    .left_decoration(Span::styled("◆", Style::default().fg(Color::Red)))
                    .right_decoration(Span::styled("✕", Style::default().fg(Color::Yellow))),
            },
            Entry {
                heading: None,
                field: MaterialTextField::new(icons, "Clear text")
                    .style(FieldStyle::Outlined)
                    .accent_color(Color::Yellow)
                    .right_decoration(Span::styled("✕", Style::default().fg(Color::Gray))),
            },
            Entry {
                heading: Some(("Disabled", Color::Gray)),
                field: MaterialTextField::new(disabled.clone(), "Disabled").is_disabled(true),
            },
            Entry {
                heading: None,
                field: MaterialTextField::new(disabled, "Disabled")
                    .style(FieldStyle::Outlined)
                    .is_disabled(true),
            },
            Entry {
                heading: Some(("Helper Text", Color::Yellow)),
                field: MaterialTextField::new(helper, "Helper Text")
                    .helper_text("This is to give more information"),
            },
            Entry {
                heading: Some(("Text counter", Color::Cyan)),
                field: MaterialTextField::new(counter, "Text Counter")
                    .max_character_count(20)
                    .show_character_counter(true),
            },
        ];

        for entry in &mut entries {
            let flag = Rc::clone(&dirty);
            entry.field.subscribe(move || flag.set(true));
        }

        let focused = entries
            .iter()
            .position(|entry| !entry.field.config().is_disabled)
            .unwrap_or(0);
        let mut app = Self {
            entries,
            focused,
            scroll: 0,
            email_valid,
            password_valid,
            full_name_valid,
            dirty,
            tick_rate: Duration::from_millis(cli.tick_rate),
            compact: cli.compact,
            should_quit: false,
        };
        app.entries[app.focused].field.set_focused(true);
        app
    }

    fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            if self.dirty.replace(false) {
                terminal.draw(|frame| self.draw(frame))?;
            }
            if event::poll(self.tick_rate).wrap_err("failed to poll terminal events")? {
                match event::read().wrap_err("failed to read terminal event")? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => self.dirty.set(true),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());
        self.draw_fields(frame, chunks[0]);
        self.draw_status(frame, chunks[1]);
    }

    fn draw_fields(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let compact = self.compact;
        let heights: Vec<u16> = self
            .entries
            .iter()
            .map(|entry| entry_height(entry, compact))
            .collect();
        adjust_scroll(&mut self.scroll, &heights, self.focused, area.height);

        let mut y = area.y;
        for (index, entry) in self.entries.iter_mut().enumerate().skip(self.scroll) {
            let height = heights[index];
            if y + height > area.bottom() {
                break;
            }
            let mut field_area = Rect::new(area.x, y, area.width, height);
            if let Some((title, color)) = entry.heading
                && !compact
            {
                let heading_area = Rect::new(area.x, y, area.width, 1);
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        title,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ))),
                    heading_area,
                );
                field_area = Rect::new(area.x, y + 2, area.width, height - 2);
            }
            entry.field.render(frame, field_area);
            y += height;
        }
    }

    fn draw_status(&self, frame: &mut Frame<'_>, area: Rect) {
        let all_valid =
            self.email_valid.get() && self.password_valid.get() && self.full_name_valid.get();
        let (verdict, color) = if all_valid {
            ("Input is Valid", Color::Green)
        } else {
            ("Input is Invalid", Color::Red)
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" {verdict}"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {HELP_TEXT}"),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('c')
                | KeyCode::Char('C') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('l') | KeyCode::Char('L') => {
                    self.entries[self.focused].field.clear();
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(1),
            KeyCode::BackTab | KeyCode::Up => self.focus_next(-1),
            _ => {
                self.entries[self.focused].field.handle_key(&key);
            }
        }
    }

    fn focus_next(&mut self, delta: isize) {
        let disabled: Vec<bool> = self
            .entries
            .iter()
            .map(|entry| entry.field.config().is_disabled)
            .collect();
        if let Some(next) = next_enabled(&disabled, self.focused, delta) {
            self.entries[self.focused].field.set_focused(false);
            self.focused = next;
            self.entries[self.focused].field.set_focused(true);
        }
    }
}

fn entry_height(entry: &Entry, compact: bool) -> u16 {
    let heading = if entry.heading.is_some() && !compact {
        2
    } else {
        0
    };
    heading + entry.field.height()
}

fn next_enabled(disabled: &[bool], current: usize, delta: isize) -> Option<usize> {
    if disabled.is_empty() {
        return None;
    }
    let len = disabled.len() as isize;
    let mut index = current as isize;
    for _ in 0..len {
        index = (index + delta).rem_euclid(len);
        if !disabled[index as usize] {
            return Some(index as usize);
        }
    }
    None
}

fn adjust_scroll(scroll: &mut usize, heights: &[u16], focused: usize, viewport: u16) {
    if *scroll > focused {
        *scroll = focused;
    }
    loop {
        let used: u16 = heights[*scroll..=focused].iter().sum();
        if used <= viewport || *scroll == focused {
            break;
        }
        *scroll += 1;
    }
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().wrap_err("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).wrap_err("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).wrap_err("failed to initialize terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}
