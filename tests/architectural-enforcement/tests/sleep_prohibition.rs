//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT sleep to wait for things. Requests
//! are awaited, and results are polled once per frame.
//! **Exceptions**: the frame tick in the terminal client's event loop.

use std::path::Path;

use architectural_enforcement::{assert_clean, context_mentions, scan};

fn is_sleep(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(")
}

fn is_frame_tick(path: &Path, lines: &[&str], idx: usize) -> bool {
    path.ends_with("tui/src/app.rs")
        && lines[idx].contains("tokio::time::sleep")
        && context_mentions(lines, idx, 10, &["frame"])
}

#[test]
fn test_no_sleep_in_core() {
    let violations = scan("client/core/src", is_sleep, |_, _, _| false);
    assert_clean("Sleep calls found in the chat core", &violations);
}

#[test]
fn test_only_frame_tick_sleeps_in_tui() {
    let violations = scan("tui/src", is_sleep, is_frame_tick);
    assert_clean("Sleep calls found in the terminal client", &violations);
}

#[test]
fn test_no_blocking_thread_sleep_anywhere() {
    let mut violations = scan(
        "client/core/src",
        |code| code.contains("thread::sleep"),
        |_, _, _| false,
    );
    violations.extend(scan(
        "tui/src",
        |code| code.contains("thread::sleep"),
        |_, _, _| false,
    ));
    assert_clean("std::thread::sleep blocks the async runtime", &violations);
}
