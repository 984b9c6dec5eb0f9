use itertools::{EitherOrBoth, Itertools};
use std::time::SystemTime;

/// Everything measured about one completed run. Derived once on submit,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// All submitted words per minute, correct or not.
    pub raw_wpm: f64,
    /// Correctly matched words per minute (the headline number).
    pub wpm: f64,
    /// Correctly matched characters per minute.
    pub cpm: f64,
    /// Percent of submitted words that matched, rounded.
    pub accuracy: f64,
    pub elapsed_secs: f64,
    pub words_typed: usize,
    pub correct_words: usize,
    pub incorrect_words: usize,
    pub total_chars: usize,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
}

/// Score a submitted transcription against its reference text.
///
/// Word comparison is positional, Monkeytype-style: submitted word `i` is
/// correct only when the reference has an exactly equal word at `i`. An
/// inserted or dropped word therefore desynchronizes every comparison after
/// it. The character pass is positional too; submitted characters past the
/// end of the reference count as incorrect, reference characters past the
/// end of the submission are not scored.
pub fn score(reference: &str, submitted: &str, elapsed_ms: u64) -> RunResult {
    let reference_words: Vec<&str> = reference.split_whitespace().collect();
    let submitted_words: Vec<&str> = submitted.split_whitespace().collect();

    let correct_words = submitted_words
        .iter()
        .zip(reference_words.iter())
        .filter(|(submitted, reference)| submitted == reference)
        .count();
    let incorrect_words = submitted_words.len() - correct_words;

    let mut correct_chars = 0;
    let mut incorrect_chars = 0;
    for pair in submitted.chars().zip_longest(reference.chars()) {
        match pair {
            EitherOrBoth::Both(s, r) if s == r => correct_chars += 1,
            // mismatch, or a submitted character with no reference
            // counterpart
            EitherOrBoth::Both(_, _) | EitherOrBoth::Left(_) => incorrect_chars += 1,
            // reference ran longer than the submission; not scored
            EitherOrBoth::Right(_) => {}
        }
    }

    let elapsed_minutes = elapsed_ms as f64 / 60_000.0;
    let (raw_wpm, wpm, cpm) = if elapsed_minutes > 0.0 {
        (
            (submitted_words.len() as f64 / elapsed_minutes).round(),
            (correct_words as f64 / elapsed_minutes).round(),
            (correct_chars as f64 / elapsed_minutes).round(),
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    let accuracy = if submitted_words.is_empty() {
        0.0
    } else {
        (correct_words as f64 / submitted_words.len() as f64 * 100.0).round()
    };

    RunResult {
        raw_wpm,
        wpm,
        cpm,
        accuracy,
        elapsed_secs: elapsed_ms as f64 / 1000.0,
        words_typed: submitted_words.len(),
        correct_words,
        incorrect_words,
        total_chars: submitted.chars().count(),
        correct_chars,
        incorrect_chars,
    }
}

impl RunResult {
    /// The block printed to the transcript when a run completes.
    pub fn report(&self) -> String {
        format!(
            "Test completed!\n  Raw WPM: {}\n  WPM (after accuracy): {}\n  CPM: {}\n  Accuracy: {}%\n  Time: {:.2} seconds\n  Words Typed: {}\n  Correct Words: {}\n  Incorrect Words: {}\n  Total Characters: {}\n  Correct Characters: {}\n  Incorrect Characters: {}",
            self.raw_wpm,
            self.wpm,
            self.cpm,
            self.accuracy,
            self.elapsed_secs,
            self.words_typed,
            self.correct_words,
            self.incorrect_words,
            self.total_chars,
            self.correct_chars,
            self.incorrect_chars,
        )
    }
}

/// Milliseconds between two timestamps, zero if the clock went backwards.
pub fn time_diff_ms(start: SystemTime, end: SystemTime) -> u64 {
    end.duration_since(start).unwrap_or_default().as_millis() as u64
}
