use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveTime};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use log::info;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use waterclock_config::Config;
use waterclock_core::{Edit, EditAction, HEIGHT};
use waterclock_engine::Engine;

mod cli;
mod clock;
mod render;

use cli::Cli;
use clock::{AcceleratedClock, ClockSource, SystemClock};
use render::{FieldView, WALL_COLOR, drag_direction};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging()?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    config.validate()?;

    let terminal = ratatui::init();
    with_cleanup(
        || {
            execute!(stdout(), EnableMouseCapture)?;
            App::new(&config).run(terminal)
        },
        || {
            let released = execute!(stdout(), DisableMouseCapture);
            ratatui::restore();
            released
        },
    )
}

/// Run `body`, then `cleanup` whatever happened. The first error is returned.
fn with_cleanup<T>(
    body: impl FnOnce() -> color_eyre::Result<T>,
    cleanup: impl FnOnce() -> io::Result<()>,
) -> color_eyre::Result<T> {
    let result = body();
    let cleaned = cleanup();
    let value = result?;
    cleaned?;
    Ok(value)
}

/// Send log output to a file so it never lands on the clock face.
fn init_logging() -> color_eyre::Result<()> {
    let Some(path) = Config::log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// The liquid automaton.
    engine: Engine,
    /// Where the time comes from.
    clock: Box<dyn ClockSource>,
    /// Time of the last frame.
    now: NaiveTime,
    /// Time between frames.
    frame_interval: Duration,
    /// Show recently vacated cells in the liquid's colour.
    trail: bool,
    /// Edit waiting for the next frame.
    pending_edit: Option<Edit>,
    /// Placement of the field on screen, for mouse input.
    view: FieldView,
    /// Last cell under a middle-button drag.
    drag_from: Option<(isize, isize)>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        let mut clock: Box<dyn ClockSource> = if config.acceleration > 1 {
            Box::new(AcceleratedClock::new(
                Local::now().naive_local(),
                config.acceleration,
            ))
        } else {
            Box::new(SystemClock)
        };
        let seed = config.seed.unwrap_or_else(rand::random);
        let now = clock.now();
        info!(
            "starting at {now}, seed {seed}, acceleration {}",
            config.acceleration
        );

        let fps = f64::from(config.fps) * f64::from(config.acceleration);
        Self {
            running: false,
            engine: Engine::new(now, &config.engine, seed),
            clock,
            now,
            frame_interval: Duration::from_secs_f64(1.0 / fps),
            trail: config.trail,
            pending_edit: None,
            view: FieldView::default(),
            drag_from: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let mut last_frame = Instant::now();
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            let timeout = self.frame_interval.saturating_sub(last_frame.elapsed());
            self.handle_crossterm_events(timeout)?;
            if last_frame.elapsed() >= self.frame_interval {
                last_frame = Instant::now();
                self.tick();
            }
        }
        Ok(())
    }

    /// Advance the clock by one frame.
    fn tick(&mut self) {
        self.now = self.clock.now();
        self.engine.update(self.now, self.pending_edit.take());
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Fill(1),               // Top padding
            Constraint::Length(HEIGHT as u16), // Field
            Constraint::Length(1),             // Spacing
            Constraint::Length(1),             // Time
            Constraint::Fill(1),               // Bottom padding
            Constraint::Length(1),             // Help text
        ])
        .split(area);

        let field_area = chunks[1];
        self.view = FieldView::centered(field_area.x, field_area.y, field_area.width);
        let lines = self.view.lines(&self.engine, self.trail);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), field_area);

        let time = Paragraph::new(self.now.format("%H:%M:%S").to_string())
            .style(Style::new().fg(WALL_COLOR))
            .alignment(Alignment::Center);
        frame.render_widget(time, chunks[3]);

        let help = Line::from(vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "t".bold(),
            " toggle trail  ".dark_gray(),
            "mouse".bold(),
            " left wall, right erase, middle drag".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[5]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so frames keep their pace.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.trail = !self.trail,
            _ => {}
        }
    }

    /// Turn mouse input into a field edit for the next frame.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let (x, y) = self.view.cell_at(mouse.column, mouse.row);
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                Some(EditAction::SetWall)
            }
            MouseEventKind::Down(MouseButton::Right)
            | MouseEventKind::Drag(MouseButton::Right) => Some(EditAction::SetBackground),
            MouseEventKind::Down(MouseButton::Middle) => {
                self.drag_from = Some((x, y));
                None
            }
            MouseEventKind::Drag(MouseButton::Middle) => {
                let Some(from) = self.drag_from.replace((x, y)) else {
                    return;
                };
                if let Some(direction) = drag_direction(from, (x, y)) {
                    let (fx, fy) = from;
                    self.pending_edit = Some(Edit::new(fx, fy, EditAction::Drag(direction)));
                }
                None
            }
            MouseEventKind::Up(_) => {
                self.drag_from = None;
                None
            }
            _ => None,
        };
        if let Some(action) = action {
            self.pending_edit = Some(Edit::new(x, y, action));
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
