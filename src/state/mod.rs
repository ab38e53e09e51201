//! State management module
//!
//! Remembers the newest result ID between runs so a later search picks up
//! where the previous one stopped.
//!
//! # Overview
//!
//! The state module provides:
//! - `NewestIdStore` - File-based persistence of the newest ID, with atomic writes

mod store;

pub use store::{NewestIdStore, DEFAULT_NEWEST_ID_FILE};
