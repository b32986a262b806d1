//! Integration Test: Panic-Free Core
//!
//! **Policy**: Production code in `ragchat-core` returns errors with `?`.
//! `unwrap()` and `expect()` belong in tests only.

use architectural_enforcement::{assert_clean, scan};

#[test]
fn test_no_unwrap_or_expect_in_core() {
    let violations = scan(
        "client/core/src",
        |code| code.contains(".unwrap()") || code.contains(".expect("),
        |_, _, _| false,
    );
    assert_clean("unwrap()/expect() in core production code", &violations);
}
