//! # webac-cli
//!
//! Command-line tools for WebAC:
//! - `webac check`: decide whether an agent holds modes on a resource
//! - `webac modes`: show an agent's effective modes on a resource
//! - `webac config`: locate, create and inspect the configuration file
//!
//! Resource trees are read from dataset files (see [`webac_storage::Dataset`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use config::WebacConfig;
pub use error::{Error, Result};
