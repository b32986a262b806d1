//! Integration Test: Layering
//!
//! **Policy**: `ragchat-core` is headless. It owns the wire protocol, the
//! conversation and the session controller, and knows nothing about
//! terminals. The terminal client renders and forwards input; it never
//! speaks HTTP itself.

use architectural_enforcement::{assert_clean, manifest, scan};

const TERMINAL_CRATES: [&str; 2] = ["ratatui", "crossterm"];

fn declares_dependency(manifest: &str, krate: &str) -> bool {
    manifest
        .lines()
        .map(str::trim)
        .any(|line| line.starts_with(&format!("{krate} ")) || line.starts_with(&format!("{krate}=")))
}

#[test]
fn test_core_manifest_has_no_terminal_crates() {
    let core = manifest("client/core/Cargo.toml");
    assert!(!core.is_empty(), "core manifest not found");
    for krate in TERMINAL_CRATES {
        assert!(
            !declares_dependency(&core, krate),
            "ragchat-core must not depend on {krate}"
        );
    }
}

#[test]
fn test_core_sources_never_touch_the_terminal() {
    let violations = scan(
        "client/core/src",
        |code| TERMINAL_CRATES.iter().any(|k| code.contains(&format!("{k}::"))),
        |_, _, _| false,
    );
    assert_clean("Terminal code in the headless core", &violations);
}

#[test]
fn test_tui_reaches_the_service_through_core() {
    let tui = manifest("tui/Cargo.toml");
    assert!(!tui.is_empty(), "tui manifest not found");
    assert!(
        !declares_dependency(&tui, "reqwest"),
        "the terminal client must use ragchat-core's backend"
    );

    let violations = scan("tui/src", |code| code.contains("reqwest::"), |_, _, _| false);
    assert_clean("Direct HTTP in the terminal client", &violations);
}
