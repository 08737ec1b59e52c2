// ============================================
// src/main.rs
// Terminal host for the practice drills
// ============================================

use std::io::{Result, stdout};
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use practica::cli::Cli;
use practica::drills::{Activity, Drill, Guess, Library};
use practica::{logging, rng};

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

// --------------------------------------------------
// State
// --------------------------------------------------

/// Everything the screen shows. Owned by the event loop.
struct AppState {
    library: Library,
    rng: StdRng, // parent generator; each drill gets its own child
    max_attempts: u32,

    activity: Activity,
    drill: Option<Drill>,
    show_answer: bool,

    /// Typed state name or id (states drill only)
    guess: String,
    feedback: Option<Guess>,

    /// Last sequencer error, shown until the next successful draw
    status: Option<String>,
}

impl AppState {
    fn new(cli: &Cli) -> Self {
        let library = Library::load(&cli.content_paths());
        let rng = match cli.seed {
            Some(seed) => rng::seeded(seed),
            None => rng::entropy(),
        };
        let mut state = Self {
            library,
            rng,
            max_attempts: cli.max_attempts,
            activity: cli.activity,
            drill: None,
            show_answer: false,
            guess: String::new(),
            feedback: None,
            status: None,
        };
        state.restart();
        state
    }

    /// Fresh run of the current activity.
    fn restart(&mut self) {
        self.clear_item();
        let child = StdRng::from_rng(&mut self.rng);
        match Drill::start(self.activity, &self.library, child, self.max_attempts) {
            Ok(drill) => {
                self.drill = Some(drill);
                self.status = None;
            }
            Err(err) => {
                tracing::error!(activity = ?self.activity, error = %err, "could not start drill");
                self.drill = None;
                self.status = Some(err.to_string());
            }
        }
    }

    fn switch_activity(&mut self) {
        self.activity = self.activity.cycle();
        self.restart();
    }

    fn next_item(&mut self) {
        match self.drill.as_ref().map(Drill::finished) {
            None => return self.restart(),
            Some(true) => return, // wait for a restart
            Some(false) => self.clear_item(),
        }
        if let Some(drill) = self.drill.as_mut() {
            match drill.advance() {
                Ok(()) => self.status = None,
                Err(err) => {
                    tracing::warn!(error = %err, "draw failed");
                    self.status = Some(err.to_string());
                }
            }
        }
    }

    fn clear_item(&mut self) {
        self.show_answer = false;
        self.guess.clear();
        self.feedback = None;
    }

    fn takes_guesses(&self) -> bool {
        self.activity == Activity::States && self.drill.is_some()
    }

    fn submit_guess(&mut self) {
        let Some(drill) = self.drill.as_ref() else {
            return;
        };
        if self.guess.trim().is_empty() {
            return;
        }
        self.feedback = drill.guess_state(&self.guess);
        self.guess.clear();
    }
}

// --------------------------------------------------
// Main function (logging, terminal setup, event loop)
// --------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(&cli.log_dir())?;

    let mut terminal = setup_terminal()?;
    let outcome = run_app(&mut terminal, &cli);
    restore_terminal(&mut terminal)?;
    outcome
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(Hide)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal(_terminal: &mut Terminal<impl Backend>) -> Result<()> {
    stdout().execute(Show)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, cli: &Cli) -> Result<()> {
    let mut app_state = AppState::new(cli);

    loop {
        terminal.draw(|f| ui(f, &app_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press && app_state.takes_guesses() {
                    match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Enter => app_state.submit_guess(),
                        KeyCode::Backspace => {
                            app_state.guess.pop();
                        }
                        KeyCode::Char(c) => app_state.guess.push(c),
                        KeyCode::Right => app_state.next_item(),
                        KeyCode::F(5) => app_state.restart(),
                        KeyCode::Tab => app_state.switch_activity(),
                        _ => {}
                    }
                } else if key.kind == event::KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => break,
                        KeyCode::Enter | KeyCode::Char(' ') => app_state.show_answer = true,
                        KeyCode::Char('n') => app_state.next_item(),
                        KeyCode::Char('r') => app_state.restart(),
                        KeyCode::Tab => app_state.switch_activity(),
                        _ => {}
                    }
                }
            }
        }
    }

    tracing::info!("session ended");
    Ok(())
}

// --------------------------------------------------
// Drawing
// --------------------------------------------------

fn ui(f: &mut Frame, app_state: &AppState) {
    let size = f.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("¡Practica! · {}", app_state.activity.title()));
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] progress
            Constraint::Length(1), // [1] blank
            Constraint::Min(3),    // [2] prompt
            Constraint::Min(3),    // [3] answer
            Constraint::Length(1), // [4] status
            Constraint::Length(1), // [5] key help
        ])
        .split(inner_area);

    let drill = app_state.drill.as_ref();

    // 0. progress through a run-through activity
    if let Some((asked, total)) = drill.and_then(Drill::progress) {
        let ratio = if total > 0 { asked as f64 / total as f64 } else { 0.0 };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio(ratio.min(1.0))
            .label(format!("{asked} / {total}"));
        f.render_widget(gauge, chunks[0]);
    }

    let card = drill.and_then(Drill::card);
    let finished = drill.is_some_and(Drill::finished);

    // 2. prompt
    let prompt = card.as_ref().map(|c| c.prompt.as_str()).unwrap_or("");
    f.render_widget(
        Paragraph::new(prompt)
            .style(Style::default().fg(Color::White).bold())
            .wrap(Wrap { trim: true })
            .centered(),
        chunks[2],
    );

    // 3. answer, or a placeholder until asked for; the states drill shows
    // the guess being typed and the verdict on the last one
    let answer: Vec<Line> = if app_state.takes_guesses() {
        let mut lines = vec![Line::from(format!("> {}_", app_state.guess))];
        match app_state.feedback {
            Some(g @ Guess::Correct { .. }) => {
                lines.push(Line::from(g.feedback()).fg(Color::Green))
            }
            Some(g) => lines.push(Line::from(g.feedback()).fg(Color::Red)),
            None => {}
        }
        lines
    } else {
        match (&card, app_state.show_answer) {
            (Some(c), true) => c.answer.lines().map(Line::from).collect(),
            (Some(_), false) => {
                vec![Line::from("Enter: mostrar la respuesta").fg(Color::DarkGray)]
            }
            (None, _) => Vec::new(),
        }
    };
    f.render_widget(
        Paragraph::new(answer)
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
            .centered(),
        chunks[3],
    );

    // 4. errors are always surfaced
    let status = match (&app_state.status, finished) {
        (Some(err), _) => Line::from(format!("Error: {err}")).fg(Color::Red),
        (None, true) => {
            Line::from("¡Felicidades! Terminaste todos. F5: otra vez").fg(Color::Green)
        }
        (None, false) => Line::from(""),
    };
    f.render_widget(Paragraph::new(status).centered(), chunks[4]);

    let help = if app_state.takes_guesses() {
        "Escribe el estado · Enter comprobar · → siguiente · F5 reiniciar · Tab · Esc salir"
    } else {
        "Enter respuesta · n siguiente · r reiniciar · Tab actividad · Esc salir"
    };
    f.render_widget(
        Paragraph::new(help)
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[5],
    );
}
