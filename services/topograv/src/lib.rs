//! GRACE gravimetry, ETOPO geoid and satellite orbit plots.
//!
//! The binary in `main.rs` is a thin clap front end over [`commands`].

pub mod commands;
pub mod config;
pub mod explorer;
pub mod plots;

pub use config::TopogravConfig;
