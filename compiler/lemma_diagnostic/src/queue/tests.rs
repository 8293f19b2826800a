use lemma_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::Severity;

fn at(start: u32, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E4002)
        .with_message(message)
        .with_label(Span::new(start, start + 1), "here")
}

fn messages(diags: &[Diagnostic]) -> Vec<&str> {
    diags.iter().map(|d| d.message.as_str()).collect()
}

#[test]
fn flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(at(40, "third")));
    assert!(queue.add(at(2, "first")));
    assert!(queue.add(at(17, "second")));

    let flushed = queue.flush();
    assert_eq!(messages(&flushed), vec!["first", "second", "third"]);
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
}

#[test]
fn unlabeled_diagnostics_come_first_and_ties_keep_order() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.extend([
        at(5, "a"),
        Diagnostic::error(ErrorCode::E2001).with_message("unplaced"),
        at(5, "b"),
    ]);

    assert_eq!(messages(&queue.flush()), vec!["unplaced", "a", "b"]);
}

#[test]
fn duplicates_are_dropped() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(at(1, "same")));
    assert!(!queue.add(at(1, "same")));
    assert!(queue.add(at(2, "same")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn unlimited_keeps_duplicates() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    assert!(queue.add(at(1, "same")));
    assert!(queue.add(at(1, "same")));
    assert_eq!(queue.flush().len(), 2);
}

#[test]
fn error_limit_stops_collection_and_says_so() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: false,
    });
    assert!(queue.add(at(3, "one")));
    assert!(queue.add(at(1, "two")));
    assert!(queue.limit_reached());
    assert!(!queue.add(at(0, "three")));
    assert!(!queue.add(at(0, "four")));

    let flushed = queue.flush();
    assert_eq!(
        messages(&flushed),
        vec!["two", "one", "stopped after 2 errors; 2 more not shown"]
    );
    assert_eq!(flushed[2].severity, Severity::Note);
    assert_eq!(flushed[2].code, ErrorCode::E9002);
}

#[test]
fn warnings_do_not_count_toward_the_limit() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 1,
        deduplicate: true,
    });
    assert!(queue.add(at(0, "error")));
    assert!(queue.add(Diagnostic::warning(ErrorCode::E2001).with_message("warning")));
    assert_eq!(queue.error_count(), 1);
}
