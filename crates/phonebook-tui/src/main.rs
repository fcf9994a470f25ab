mod actions;
mod app;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, warn};

use crate::actions::execute_action;
use crate::app::App;
use phonebook_core::add_contact;
use phonebook_core::domain::ContactDraft;
use phonebook_core::schema::ContactSchema;
use phonebook_core::store::{ContactBook, IdGenerator, UuidGenerator};

#[derive(Debug, Parser)]
#[command(name = "phonebook", version, about = "phonebook TUI")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.verbose)?;

    let config = phonebook_config::load(args.config).with_context(|| "load config")?;
    debug!(
        seeds = config.contacts.len(),
        validate_on_change = config.form.validate_on_change,
        validate_on_blur = config.form.validate_on_blur,
        "config loaded"
    );

    let mut ids = UuidGenerator;
    let mut book = seed_book(&config.contacts, &mut ids);
    let mut app = App::new(config.form);

    let mut terminal = TerminalGuard::new()?;
    run_app(&mut terminal, &mut book, &mut ids, &mut app)
}

fn seed_book<G: IdGenerator>(seeds: &[ContactDraft], ids: &mut G) -> ContactBook {
    let schema = ContactSchema::standard();
    let mut book = ContactBook::new();
    for draft in seeds {
        if let Err(err) = add_contact(&schema, &mut book, ids, draft) {
            warn!(error = %err, "skipping seed contact");
        }
    }
    book
}

fn run_app(
    terminal: &mut TerminalGuard,
    book: &mut ContactBook,
    ids: &mut UuidGenerator,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        while let Some(action) = app.next_action() {
            if let Err(err) = execute_action(app, book, ids, action) {
                app.set_error(err.to_string());
            }
        }

        terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn init_logging(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::seed_book;
    use phonebook_core::domain::ContactDraft;
    use phonebook_core::store::{ContactStore, UuidGenerator};

    #[test]
    fn seed_book_keeps_order_and_skips_rejected_drafts() {
        let seeds = vec![
            ContactDraft::new("Rosie Simpson", "459-12-56"),
            ContactDraft::new("Hermione Kline", "443-89-12"),
            ContactDraft::new("rosie simpson", "000-00-00"),
            ContactDraft::new("R2D2", "443-89-12"),
        ];
        let book = seed_book(&seeds, &mut UuidGenerator);
        let names: Vec<&str> = book.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Rosie Simpson", "Hermione Kline"]);
    }
}
