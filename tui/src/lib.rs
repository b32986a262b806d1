//! Ragchat TUI - Terminal interface for the knowledge-base chat client
//!
//! This crate is a thin terminal surface over `ragchat-core`. All chat and
//! account logic lives in the core; the TUI only turns key presses into
//! core calls and draws what the core reports.
//!
//! # Architecture
//!
//! - **App**: Screens (login, signup, chat), event loop, route guard
//! - **Forms**: Focus and editing state for the account screens
//! - **Display**: Turns a conversation view into styled, wrapped lines
//! - **Widgets**: Borderless scrollable conversation block
//! - **Theme**: Colour palette

pub mod app;
pub mod display;
pub mod forms;
pub mod theme;
pub mod widgets;

pub use app::{App, Screen};
