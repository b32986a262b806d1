//! Theme and Colors
//!
//! The client's colour palette. Conversation roles get one colour each, and
//! every section of a concept panel has its own accent so the eye can jump
//! straight to syntax or relations.

use ratatui::style::{Color, Modifier, Style};

use ragchat_core::PasswordStrength;

// ============================================================================
// Conversation Colors
// ============================================================================

/// Assistant accent (headers, prefixes)
pub const ASSISTANT_MAGENTA: Color = Color::Magenta;

/// User input green
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Answer body text
pub const ANSWER_TEXT: Color = Color::Rgb(220, 220, 220);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Scroll fade, outermost line
pub const FADE_DARK: Color = Color::Rgb(80, 80, 80);

/// Scroll fade, second line
pub const FADE_LIGHT: Color = Color::Rgb(120, 120, 120);

// ============================================================================
// Concept Panel Colors
// ============================================================================

/// Concept name
pub const CONCEPT_BLUE: Color = Color::Rgb(100, 180, 255);

/// Syntax snippets
pub const SYNTAX_GREEN: Color = Color::Rgb(150, 230, 150);

/// Example code
pub const EXAMPLE_TEAL: Color = Color::Rgb(120, 210, 200);

/// Explicit relations
pub const RELATED_PURPLE: Color = Color::Rgb(190, 150, 255);

/// Inferred relations
pub const INFERRED_AMBER: Color = Color::Rgb(255, 200, 120);

// ============================================================================
// Status Colors
// ============================================================================

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Warning yellow
pub const WARNING_YELLOW: Color = Color::Rgb(255, 223, 128);

/// Focused field / selection highlight
pub const FOCUS_CYAN: Color = Color::Cyan;

/// Style for a section heading inside a concept panel
#[must_use]
pub fn heading(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Colour for a strength meter reading
#[must_use]
pub fn strength_color(strength: &PasswordStrength) -> Color {
    match strength {
        PasswordStrength::Strong => SUCCESS_GREEN,
        PasswordStrength::Weak { .. } => WARNING_YELLOW,
        PasswordStrength::VeryWeak { .. } => ERROR_RED,
    }
}
