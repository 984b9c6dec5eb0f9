use std::time::SystemTime;

use crate::command::{help_text, Command};
use crate::corpus::Corpus;
use crate::scoring::{score, time_diff_ms, RunResult};
use crate::stats::{AggregateStats, RunLog};
use crate::transcript::Transcript;

/// How the next submitted line will be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Lines are commands.
    Command,
    /// Lines are transcriptions of the reference text.
    Typing,
    /// Lines answer the "try another test?" question.
    AwaitingRestart,
}

/// What the caller should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Handled,
    /// `exit` was accepted; arm the deferred shutdown.
    ExitRequested,
}

/// The interactive session: one line of pending input, a mode deciding how
/// that line is read, and the running statistics. Every mutation funnels
/// through `push_char`, `backspace` and `submit_line`, one event at a time.
#[derive(Debug)]
pub struct Session {
    pub mode: Mode,
    pub input: String,
    pub transcript: Transcript,
    pub stats: AggregateStats,
    pub last_result: Option<RunResult>,
    /// When the current run was issued; present exactly while a run is
    /// active. Scoring measures from `first_key_at`, not from here.
    pub started_at: Option<SystemTime>,
    corpus: Corpus,
    custom_text: Option<String>,
    reference: Option<String>,
    first_key_at: Option<SystemTime>,
    run_log: Option<RunLog>,
}

impl Session {
    pub fn new(corpus: Corpus, custom_text: Option<String>, transcript: Transcript) -> Self {
        Self {
            mode: Mode::Command,
            input: String::new(),
            transcript,
            stats: AggregateStats::default(),
            last_result: None,
            started_at: None,
            corpus,
            custom_text,
            reference: None,
            first_key_at: None,
            run_log: None,
        }
    }

    /// Attach a run log; finished runs are appended to it best-effort.
    pub fn with_run_log(mut self, run_log: RunLog) -> Self {
        self.run_log = Some(run_log);
        self
    }

    pub fn push_char(&mut self, c: char) {
        // the timing clock starts at the first keystroke, not at `start`
        if self.mode == Mode::Typing && self.first_key_at.is_none() {
            self.first_key_at = Some(SystemTime::now());
        }
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Handle enter: echo the pending line, then interpret it according to
    /// the current mode.
    pub fn submit_line(&mut self) -> SubmitOutcome {
        let line = std::mem::take(&mut self.input);
        self.transcript.echo(&line);

        match self.mode {
            Mode::Command => self.handle_command(&line),
            Mode::Typing => {
                self.complete_run(&line);
                SubmitOutcome::Handled
            }
            Mode::AwaitingRestart => {
                self.handle_restart_answer(&line);
                SubmitOutcome::Handled
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> SubmitOutcome {
        if line.trim().is_empty() {
            return SubmitOutcome::Handled;
        }
        match Command::parse(line) {
            Some(cmd) => self.execute(cmd),
            None => {
                self.transcript.error(format!(
                    "Command not found: {line}. Type 'help' for available commands."
                ));
                SubmitOutcome::Handled
            }
        }
    }

    /// Run one command. Guards on `mode` keep `start` and `exit` inert
    /// while a test is active, matching what the transcript promises.
    pub fn execute(&mut self, cmd: Command) -> SubmitOutcome {
        match cmd {
            Command::Help => {
                self.transcript.info(help_text());
            }
            Command::Start => {
                if self.mode != Mode::Command {
                    self.transcript.error("A test is already in progress!");
                } else {
                    self.begin_test();
                }
            }
            Command::Stats => {
                if self.stats.tests_completed == 0 {
                    self.transcript.info("No tests completed yet!");
                } else {
                    let summary = self.stats.summary();
                    self.transcript.info(summary);
                }
            }
            Command::Clear => {
                self.transcript.reset_to_banner();
            }
            Command::Reset => {
                self.stats.reset();
                self.transcript.success("Statistics have been reset!");
            }
            Command::Exit => {
                if self.mode != Mode::Command {
                    self.transcript.error("Cannot exit while a test is in progress!");
                } else {
                    self.transcript.info("Goodbye!");
                    return SubmitOutcome::ExitRequested;
                }
            }
        }
        SubmitOutcome::Handled
    }

    fn begin_test(&mut self) {
        let text = match &self.custom_text {
            Some(text) => text.clone(),
            None => self.corpus.pick(),
        };
        self.transcript.info("Type the following text:");
        self.transcript.typing_text(text.clone());
        self.reference = Some(text);
        self.started_at = Some(SystemTime::now());
        self.first_key_at = None;
        self.mode = Mode::Typing;
    }

    fn complete_run(&mut self, line: &str) {
        let now = SystemTime::now();
        // submitting without typing anything means zero elapsed
        let started = self.first_key_at.unwrap_or(now);
        let elapsed_ms = time_diff_ms(started, now);
        let reference = self.reference.take().unwrap_or_default();

        let result = score(&reference, line, elapsed_ms);
        self.transcript.success(result.report());
        self.stats.record(&result);
        if let Some(log) = &self.run_log {
            let _ = log.append(&result);
        }
        self.last_result = Some(result);
        self.started_at = None;
        self.first_key_at = None;
        self.mode = Mode::AwaitingRestart;
        self.transcript
            .info("Would you like to try another test? (y/n)");
    }

    fn handle_restart_answer(&mut self, line: &str) {
        match line.trim().to_lowercase().as_str() {
            "y" => {
                self.mode = Mode::Command;
                self.begin_test();
            }
            "n" => {
                self.mode = Mode::Command;
                self.transcript.info("Test session ended.");
            }
            _ => {
                self.transcript.error("Please type 'y' or 'n' only.");
            }
        }
    }
}
