//! Integration tests

mod helpers;

mod cli_test;
mod config_test;
mod playback_test;
mod timeline_test;
