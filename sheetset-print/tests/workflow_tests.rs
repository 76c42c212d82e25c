//! End-to-end workflow tests
//!
//! Builds a real library on disk, drives a full session (select song,
//! plan, print) and checks the dispatched copies against the roster,
//! with a recording dispatcher standing in for Ghostscript.

use sheetset_common::config::CopyMode;
use sheetset_common::{Catalog, Result, Roster};
use sheetset_print::{Library, PrintDispatcher, Session};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

struct RecordingDispatcher {
    calls: RefCell<Vec<(PathBuf, u32)>>,
}

impl RecordingDispatcher {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
        }
    }

    fn copies_for(&self, filename: &str) -> u32 {
        self.calls
            .borrow()
            .iter()
            .filter(|(path, _)| path.to_string_lossy().contains(filename))
            .map(|(_, copies)| copies)
            .sum()
    }
}

impl PrintDispatcher for RecordingDispatcher {
    fn dispatch(&self, file: &Path, copies: u32) -> Result<()> {
        self.calls.borrow_mut().push((file.to_path_buf(), copies));
        Ok(())
    }
}

/// A small but realistic library: one marching tune with numbered
/// trumpet parts, Norwegian filenames, a score, and a stray note sheet.
fn build_library(root: &Path) {
    let song = root.join("Bandology");
    fs::create_dir_all(&song).unwrap();
    for file in [
        "Bandology Partitur.pdf",
        "Bandology Fløyte.pdf",
        "Bandology Trompet 1.pdf",
        "Bandology Trompet 2.pdf",
        "Bandology Trombone.pdf",
        "Bandology Bass Trombone.pdf",
        "Dirigentnotat.pdf",
    ] {
        fs::write(song.join(file), b"%PDF-1.4").unwrap();
    }

    let other = root.join("Valdres");
    fs::create_dir_all(&other).unwrap();
    fs::write(other.join("Valdres Kornett 1.pdf"), b"%PDF-1.4").unwrap();
}

fn open_session(root: &Path, copy_mode: CopyMode) -> Session {
    Session::new(
        Library::open(root).unwrap(),
        Catalog::builtin(),
        Roster::builtin("fhm").unwrap(),
        copy_mode,
    )
}

#[test]
fn full_print_run_covers_the_roster() {
    let dir = tempfile::tempdir().unwrap();
    build_library(dir.path());

    let mut session = open_session(dir.path(), CopyMode::Native);
    session.select_song("Bandology").unwrap();

    let dispatcher = RecordingDispatcher::new();
    let report = session.print_all(&dispatcher).unwrap();

    // fhm: Flute 3, Trumpet 6 over two files, Trombone 2, Bass Trombone 1
    assert_eq!(dispatcher.copies_for("Fløyte"), 3);
    assert_eq!(dispatcher.copies_for("Trompet 1"), 3);
    assert_eq!(dispatcher.copies_for("Trompet 2"), 3);
    assert_eq!(dispatcher.copies_for("Bandology Trombone"), 2);
    assert_eq!(dispatcher.copies_for("Bass Trombone"), 1);
    assert_eq!(report.dispatch.copies_sent, 12);
    assert!(report.dispatch.all_ok());

    // Score matched a file but has no roster headcount: never printed
    assert_eq!(dispatcher.copies_for("Partitur"), 0);

    // The stray sheet is reported, not silently dropped
    let unclassified: Vec<&str> = report
        .unclassified
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(unclassified, vec!["Dirigentnotat.pdf"]);

    // Everything the roster wants that the folder lacks is alerted
    let missing: Vec<&str> = report
        .outcome
        .missing
        .iter()
        .map(|a| a.identity.as_str())
        .collect();
    assert!(missing.contains(&"Piccolo"));
    assert!(missing.contains(&"Clarinet"));
    assert!(missing.contains(&"Tuba"));
    // zero-headcount instruments are not alerted
    assert!(!missing.contains(&"Percussion"));
    assert!(!missing.contains(&"Baritone Sax"));
}

#[test]
fn per_copy_mode_dispatches_every_copy_separately() {
    let dir = tempfile::tempdir().unwrap();
    build_library(dir.path());

    let mut session = open_session(dir.path(), CopyMode::PerCopy);
    session.select_song("Bandology").unwrap();

    let dispatcher = RecordingDispatcher::new();
    let report = session.print_all(&dispatcher).unwrap();

    assert_eq!(report.dispatch.copies_sent, 12);
    let calls = dispatcher.calls.borrow();
    assert_eq!(calls.len(), 12);
    assert!(calls.iter().all(|(_, copies)| *copies == 1));
}

#[test]
fn switching_songs_rebuilds_the_classification() {
    let dir = tempfile::tempdir().unwrap();
    build_library(dir.path());

    let mut session = open_session(dir.path(), CopyMode::Native);

    session.select_song("Bandology").unwrap();
    let (_, classification) = session.current().unwrap();
    assert_eq!(classification.files_for("Trumpet").len(), 2);

    session.select_song("Valdres").unwrap();
    let (song, classification) = session.current().unwrap();
    assert_eq!(song.name, "Valdres");
    // "Kornett" is a trumpet alias
    assert_eq!(classification.files_for("Trumpet").len(), 1);
    assert!(classification.files_for("Trombone").is_empty());
}

#[test]
fn library_listing_matches_folders_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    build_library(dir.path());

    let library = Library::open(dir.path()).unwrap();
    let names: Vec<String> = library.songs().unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Bandology".to_string(), "Valdres".to_string()]);
}
