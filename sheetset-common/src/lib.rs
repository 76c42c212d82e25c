//! # Sheetset Common Library
//!
//! Shared code for the sheetset tools including:
//! - Instrument catalog (identities and their alias spellings)
//! - Roster tables (required copy counts per ensemble)
//! - Configuration loading
//! - Common error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod roster;

pub use catalog::{Catalog, Clef, InstrumentIdentity, Tuning};
pub use error::{Error, Result};
pub use roster::Roster;
