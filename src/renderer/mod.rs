//! Presentation of a puzzle session
//!
//! Text only. Everything here reads session state and never mutates it.

pub mod text;

pub use text::{BoardView, SessionView, describe_event, legend};
