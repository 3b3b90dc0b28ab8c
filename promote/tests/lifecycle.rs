//! End-to-end promotion scenarios through the public API.
//!
//! Each test drives a build session the way a build engine would (begin,
//! register, finish) and then promotes from the ledger in a separate step,
//! mirroring a later `promote apply` invocation.

use promote::apply::{apply_last_run, pending};
use promote::core::candidate::Candidate;
use promote::core::paths::{BuildPath, SourcePath};
use promote::engine::Selection;
use promote::io::config::PromotionMode;
use promote::session::{BuildSession, FinishOutcome};
use promote::test_support::{RecordingReporter, TestWorkspace};

/// A single direct candidate is copied byte-for-byte and left owner-writable.
#[test]
fn direct_candidate_is_promoted() {
    let ws = TestWorkspace::new("build").expect("workspace");
    let produced = ws.write_build("gen/x.ml", "let x = 42\n").expect("write");

    let mut session = BuildSession::new(ws.paths().clone(), None);
    session.begin();
    session.register_direct(SourcePath::new("src/x.ml"), produced);
    let mut reporter = RecordingReporter::default();
    assert_eq!(
        session.finish(&mut reporter).expect("finish"),
        FinishOutcome::Persisted { pending: 1 }
    );

    let outcome = apply_last_run(ws.paths(), Selection::All, &mut reporter).expect("apply");

    assert_eq!(ws.read_source("src/x.ml").expect("read"), "let x = 42\n");
    #[cfg(unix)]
    assert_eq!(ws.source_mode("src/x.ml").expect("mode") & 0o200, 0o200);
    assert!(outcome.residual.is_empty());
    assert_eq!(
        reporter.lines(),
        vec!["Promoting build/gen/x.ml to src/x.ml.".to_string()]
    );
}

/// Two candidates for one target: the first by produced path wins.
#[test]
fn duplicate_targets_promote_first_by_path() {
    let ws = TestWorkspace::new("build").expect("workspace");
    let b = ws.write_build("b/y.txt", "from b").expect("write b");
    let a = ws.write_build("a/y.txt", "from a").expect("write a");

    let mut session = BuildSession::new(ws.paths().clone(), Some(PromotionMode::Automatic));
    session.begin();
    session.register_direct(SourcePath::new("src/y.txt"), b);
    session.register_direct(SourcePath::new("src/y.txt"), a);

    let mut reporter = RecordingReporter::default();
    let outcome = session.finish(&mut reporter).expect("finish");

    assert_eq!(
        outcome,
        FinishOutcome::Promoted(vec![SourcePath::new("src/y.txt")])
    );
    assert_eq!(ws.read_source("src/y.txt").expect("read"), "from a");
    let lines = reporter.lines();
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("Promoting")).count(),
        1
    );
    assert_eq!(lines.iter().filter(|l| l.contains("ignored")).count(), 1);
}

/// Sandboxed outputs are staged at registration and promoted from staging
/// after the sandbox is gone.
#[test]
fn staged_candidate_survives_sandbox_cleanup() {
    let ws = TestWorkspace::new("_build").expect("workspace");
    let sandbox = BuildPath::new(".sandbox/7f3a");
    let produced = ws
        .write_build(".sandbox/7f3a/default/gen/z.ml", "z")
        .expect("write");

    let mut session = BuildSession::new(ws.paths().clone(), None);
    session.begin();
    session
        .register_via_staging(SourcePath::new("src/z.ml"), produced, Some(&sandbox))
        .expect("register");
    std::fs::remove_dir_all(ws.paths().build_file(&sandbox)).expect("clean sandbox");
    let mut reporter = RecordingReporter::default();
    session.finish(&mut reporter).expect("finish");

    assert_eq!(
        pending(ws.paths()).expect("pending"),
        vec![Candidate::staged(
            SourcePath::new("src/z.ml"),
            BuildPath::new("default/gen/z.ml"),
            BuildPath::new(".promotion-staging/src/z.ml"),
        )]
    );

    apply_last_run(ws.paths(), Selection::All, &mut reporter).expect("apply");
    assert_eq!(ws.read_source("src/z.ml").expect("read"), "z");
    assert_eq!(
        reporter.lines(),
        vec!["Promoting _build/default/gen/z.ml to src/z.ml.".to_string()]
    );
}

/// Selecting one target leaves the others pending and untouched on disk.
#[test]
fn partial_apply_then_apply_rest() {
    let ws = TestWorkspace::new("_build").expect("workspace");
    let mut session = BuildSession::new(ws.paths().clone(), Some(PromotionMode::Never));
    session.begin();
    for name in ["a", "b", "c"] {
        let produced = ws
            .write_build(&format!("gen/{name}"), name)
            .expect("write");
        session.register_direct(SourcePath::new(format!("src/{name}")), produced);
    }
    ws.write_source("src/b", "hand-written").expect("write source");
    let mut reporter = RecordingReporter::default();
    session.finish(&mut reporter).expect("finish");

    let mut missing = Vec::new();
    let mut on_missing = |target: &SourcePath| missing.push(target.clone());
    let outcome = apply_last_run(
        ws.paths(),
        Selection::Only {
            targets: vec![SourcePath::new("src/a"), SourcePath::new("src/nope")],
            on_missing: &mut on_missing,
        },
        &mut reporter,
    )
    .expect("apply selected");

    assert_eq!(missing, vec![SourcePath::new("src/nope")]);
    assert_eq!(outcome.promoted, vec![SourcePath::new("src/a")]);
    let remaining: Vec<SourcePath> = pending(ws.paths())
        .expect("pending")
        .into_iter()
        .map(|c| c.target_path)
        .collect();
    assert_eq!(
        remaining,
        vec![SourcePath::new("src/b"), SourcePath::new("src/c")]
    );
    assert_eq!(ws.read_source("src/b").expect("read b"), "hand-written");
    assert!(!ws.source_exists("src/c"));

    apply_last_run(ws.paths(), Selection::All, &mut reporter).expect("apply rest");
    assert_eq!(ws.read_source("src/b").expect("read b"), "b");
    assert_eq!(ws.read_source("src/c").expect("read c"), "c");
    assert!(!ws.paths().ledger_path.exists());
}

/// A correction file deleted between build and apply is skipped, dropped from
/// the ledger, and does not stop other targets.
#[test]
fn vanished_output_is_skipped_not_fatal() {
    let ws = TestWorkspace::new("_build").expect("workspace");
    let mut session = BuildSession::new(ws.paths().clone(), None);
    session.begin();
    for name in ["gone", "kept"] {
        let produced = ws
            .write_build(&format!("gen/{name}"), name)
            .expect("write");
        session.register_direct(SourcePath::new(format!("src/{name}")), produced);
    }
    let mut reporter = RecordingReporter::default();
    session.finish(&mut reporter).expect("finish");
    ws.remove_build("gen/gone").expect("remove");

    let outcome = apply_last_run(ws.paths(), Selection::All, &mut reporter).expect("apply");

    assert_eq!(outcome.promoted, vec![SourcePath::new("src/kept")]);
    assert!(outcome.residual.is_empty());
    assert!(!ws.source_exists("src/gone"));
    assert_eq!(ws.read_source("src/kept").expect("read"), "kept");
    assert_eq!(
        reporter.lines()[0],
        "Skipping promotion of _build/gen/gone to src/gone as the file is missing."
    );
}

/// A new build replaces the previous build's ledger instead of appending.
#[test]
fn next_build_overwrites_ledger() {
    let ws = TestWorkspace::new("_build").expect("workspace");
    let mut session = BuildSession::new(ws.paths().clone(), None);
    let mut reporter = RecordingReporter::default();

    session.begin();
    let first = ws.write_build("gen/first", "1").expect("write");
    session.register_direct(SourcePath::new("src/first"), first);
    session.finish(&mut reporter).expect("finish first");

    session.begin();
    let second = ws.write_build("gen/second", "2").expect("write");
    session.register_direct(SourcePath::new("src/second"), second.clone());
    session.finish(&mut reporter).expect("finish second");

    assert_eq!(
        pending(ws.paths()).expect("pending"),
        vec![Candidate::direct(SourcePath::new("src/second"), second)]
    );
}
