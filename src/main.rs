pub mod app_dirs;
pub mod command;
pub mod config;
pub mod corpus;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod transcript;
pub mod ui;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    corpus::Corpus,
    runtime::{
        CrosstermEventSource, FixedTicker, Runner, ShutdownTimer, TermEvent, TermEventSource,
        Ticker,
    },
    session::{Session, SubmitOutcome},
    stats::RunLog,
    transcript::Transcript,
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// typing speed test dressed up as a command shell
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed test that looks and feels like a tiny command shell: type commands at the prompt, transcribe the text it prints back, and watch your words per minute."
)]
pub struct Cli {
    /// corpus to pull reference texts from
    #[clap(short = 'c', long, value_enum)]
    corpus: Option<SupportedCorpus>,

    /// custom reference text to type instead of corpus samples
    #[clap(short = 't', long)]
    text: Option<String>,

    /// prompt label shown at the input line
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// milliseconds the goodbye message stays on screen before closing
    #[clap(long)]
    exit_delay_ms: Option<u64>,

    /// persist corpus, prompt and exit delay as the new defaults
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum SupportedCorpus {
    Classic,
    Prose,
}

impl SupportedCorpus {
    fn as_corpus(&self) -> Corpus {
        Corpus::new(self.to_string().to_lowercase())
    }

    /// Lenient parse for names read from a config file.
    fn from_config_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "prose" => SupportedCorpus::Prose,
            _ => SupportedCorpus::Classic,
        }
    }
}

/// Effective options after merging CLI flags over the saved config.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub corpus: SupportedCorpus,
    pub custom_text: Option<String>,
    pub prompt: String,
    pub exit_delay_ms: u64,
}

impl RuntimeSettings {
    fn from_cli_and_config(cli: &Cli, config: &Config) -> Self {
        Self {
            corpus: cli
                .corpus
                .unwrap_or_else(|| SupportedCorpus::from_config_name(&config.corpus)),
            custom_text: cli.text.clone(),
            prompt: cli.prompt.clone().unwrap_or_else(|| config.prompt.clone()),
            exit_delay_ms: cli.exit_delay_ms.unwrap_or(config.exit_delay_ms),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub shutdown: ShutdownTimer,
    pub settings: RuntimeSettings,
}

impl App {
    pub fn new(settings: RuntimeSettings) -> Self {
        let banner = format!(
            "Welcome to tysh v{}\nType 'help' to see available commands",
            env!("CARGO_PKG_VERSION")
        );
        let transcript = Transcript::new(banner, settings.prompt.clone());
        let mut session = Session::new(
            settings.corpus.as_corpus(),
            settings.custom_text.clone(),
            transcript,
        );
        if let Some(log) = RunLog::new() {
            session = session.with_run_log(log);
        }

        Self {
            session,
            shutdown: ShutdownTimer::new(),
            settings,
        }
    }

    /// Feed one key into the session. Returns true when the loop should
    /// leave immediately (escape hatch), bypassing the goodbye delay.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // once exit is under way the shell stops listening
        if self.shutdown.is_armed() {
            return false;
        }
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Enter => {
                if self.session.submit_line() == SubmitOutcome::ExitRequested {
                    self.shutdown
                        .schedule(Duration::from_millis(self.settings.exit_delay_ms));
                }
            }
            KeyCode::Backspace => self.session.backspace(),
            KeyCode::Char(c) => self.session.push_char(c),
            _ => {}
        }
        false
    }

    pub fn should_quit(&self) -> bool {
        self.shutdown.is_due()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let settings = RuntimeSettings::from_cli_and_config(&cli, &store.load());
    if cli.save_config {
        store.save(&Config::from(&settings))?;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    start_tui(&mut terminal, &mut app, &runner)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

fn start_tui<B: Backend, E: TermEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            TermEvent::Tick => {
                if app.should_quit() {
                    break;
                }
            }
            TermEvent::Resize => {}
            TermEvent::Key(key) => {
                if app.handle_key(key) {
                    break;
                }
                // a zero exit delay is due right away
                if app.should_quit() {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
