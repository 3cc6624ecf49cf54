//! # nudge-agent — display-nudge background agent
//!
//! Polls the attached display devices every few seconds and, when the
//! OS reports none attached, makes the first display adapter reapply
//! its current mode. Registers itself to start at login and refuses to
//! work while another instance holds the single-instance lock.
//!
//! Takes no command-line arguments. An optional `display-nudge.toml`
//! beside the executable overrides the defaults.

pub mod config;
pub mod logging;
