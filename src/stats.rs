use crate::app_dirs::AppDirs;
use crate::scoring::RunResult;
use chrono::Local;
use serde::Serialize;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Running statistics over every completed run this process has seen.
/// Lives only in memory; `reset` and process exit both discard it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AggregateStats {
    pub tests_completed: u32,
    pub average_wpm: f64,
    pub average_accuracy: f64,
    pub best_wpm: f64,
}

impl AggregateStats {
    /// Fold one finished run into the running averages.
    pub fn record(&mut self, result: &RunResult) {
        self.tests_completed += 1;
        let n = self.tests_completed as f64;
        self.average_wpm = (self.average_wpm * (n - 1.0) + result.wpm) / n;
        self.average_accuracy = (self.average_accuracy * (n - 1.0) + result.accuracy) / n;
        self.best_wpm = self.best_wpm.max(result.wpm);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The block printed by the `stats` command. Callers check
    /// `tests_completed` first; a zeroed summary is still well formed.
    pub fn summary(&self) -> String {
        format!(
            "Statistics:\n  Tests Completed: {}\n  Average WPM: {:.1}\n  Average Accuracy: {:.1}%\n  Best WPM: {}",
            self.tests_completed, self.average_wpm, self.average_accuracy, self.best_wpm,
        )
    }
}

#[derive(Debug, Serialize)]
struct RunRecord {
    date: String,
    wpm: f64,
    raw_wpm: f64,
    cpm: f64,
    accuracy: f64,
    elapsed_secs: f64,
    words_typed: usize,
    correct_words: usize,
}

/// Append-only CSV log of finished runs, one row per run. Nothing in the
/// application reads it back; it exists so users can chart their history
/// with external tools.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new() -> Option<Self> {
        AppDirs::log_path().map(|path| Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Write one row, creating the file (and a header line) on first use.
    pub fn append(&self, result: &RunResult) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let needs_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(RunRecord {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            wpm: result.wpm,
            raw_wpm: result.raw_wpm,
            cpm: result.cpm,
            accuracy: result.accuracy,
            elapsed_secs: result.elapsed_secs,
            words_typed: result.words_typed,
            correct_words: result.correct_words,
        })?;
        writer.flush()?;
        Ok(())
    }
}
