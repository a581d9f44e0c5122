//! Subcommand handlers

pub mod config;
pub mod inspect;
pub mod play;
pub mod seek;
