//! # Sheetset Print
//!
//! Locates, classifies and prints sheet-music PDFs from a
//! folder-per-song library:
//! - Library scanning (song folders, PDF part files)
//! - Filename-to-instrument classification over the alias catalog
//! - Print planning from roster headcounts
//! - Print dispatch via Ghostscript
//! - A session command interface tying the steps together

pub mod classify;
pub mod dispatch;
pub mod library;
pub mod plan;
pub mod session;

pub use classify::{classify, Classification};
pub use dispatch::{DispatchReport, GhostscriptDispatcher, PrintDispatcher};
pub use library::{Library, MusicFile, Song};
pub use plan::{NotFoundAlert, PlanOutcome, PrintPlan};
pub use session::{PrintReport, Session};
