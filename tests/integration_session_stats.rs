use tysh::corpus::Corpus;
use tysh::scoring::score;
use tysh::session::Session;
use tysh::stats::{AggregateStats, RunLog};
use tysh::transcript::Transcript;

// Lib-level integration: completed runs rolling up into the in-memory
// aggregates and the CSV run log, with no terminal attached.

fn session_with_log(text: &str, log: RunLog) -> Session {
    let corpus = Corpus::new("classic".to_string());
    let transcript = Transcript::new("welcome".to_string(), "user@test:~$".to_string());
    Session::new(corpus, Some(text.to_string()), transcript).with_run_log(log)
}

fn submit(session: &mut Session, line: &str) {
    for c in line.chars() {
        session.push_char(c);
    }
    session.submit_line();
}

#[test]
fn scored_runs_roll_up_into_aggregates() {
    let mut stats = AggregateStats::default();
    stats.record(&score("the cat sat", "the cat sat", 30_000));
    stats.record(&score("the cat sat", "the cat sad", 30_000));
    stats.record(&score("the cat sat", "", 30_000));

    assert_eq!(stats.tests_completed, 3);
    // wpm per run: 6, 4, 0
    assert!((stats.average_wpm - 10.0 / 3.0).abs() < 1e-9);
    // accuracy per run: 100, 67, 0
    assert!((stats.average_accuracy - 167.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.best_wpm, 6.0);

    let summary = stats.summary();
    assert!(summary.contains("Tests Completed: 3"));
    assert!(summary.contains("Average WPM: 3.3"));
    assert!(summary.contains("Average Accuracy: 55.7%"));
    assert!(summary.contains("Best WPM: 6"));
}

#[test]
fn completed_runs_land_in_log_and_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.csv");
    let mut session = session_with_log("abc", RunLog::with_path(path.clone()));

    submit(&mut session, "start");
    submit(&mut session, "abc");
    submit(&mut session, "y");
    submit(&mut session, "abx");
    submit(&mut session, "n");

    assert_eq!(session.stats.tests_completed, 2);
    assert_eq!(session.stats.average_accuracy, 50.0);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3, "expected header plus one row per run");
    assert!(lines[0].starts_with("date,wpm,raw_wpm,cpm,accuracy"));
    // first run transcribed perfectly, second got its one word wrong
    assert!(lines[1].ends_with(",1,1"));
    assert!(lines[1].contains(",100.0,"));
    assert!(lines[2].ends_with(",1,0"));
}

#[test]
fn reset_clears_aggregates_but_the_log_keeps_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.csv");
    let mut session = session_with_log("abc", RunLog::with_path(path.clone()));

    submit(&mut session, "start");
    submit(&mut session, "abc");
    submit(&mut session, "n");
    submit(&mut session, "reset");
    submit(&mut session, "start");
    submit(&mut session, "abc");
    submit(&mut session, "n");

    // only the post-reset run counts in memory
    assert_eq!(session.stats.tests_completed, 1);
    assert_eq!(session.stats.average_accuracy, 100.0);

    // the log is append-only and keeps both
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
}
