//! UI module - text front end for the proficiency screens

pub mod terminal;

pub use terminal::TerminalWindow;
