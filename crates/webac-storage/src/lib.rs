//! # webac-storage
//!
//! Reference [`ResourceAccessor`](webac_core::ResourceAccessor)
//! implementations for WebAC authorization.
//!
//! This crate provides:
//! - [`MemoryStore`]: an in-memory resource tree that announces changes
//! - [`TimeoutAccessor`]: bounds every lookup of a wrapped accessor
//! - [`Dataset`]: TOML/JSON descriptions of a resource tree, loadable into a store

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod dataset;
pub mod error;
pub mod memory;
pub mod timeout;

pub use dataset::{Dataset, ResourceEntry, Statement};
pub use error::{Error, Result};
pub use memory::{MemoryStore, DEFAULT_CHANGE_CAPACITY};
pub use timeout::TimeoutAccessor;
