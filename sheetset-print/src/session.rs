//! Session command interface
//!
//! One `Session` owns the open library, the catalog, and the active
//! roster, and exposes the user actions as plain method calls: select a
//! song, print the whole set, print one part. A front end renders the
//! returned structs; nothing here reaches into presentation state.
//!
//! Selecting a song always re-reads the folder and recomputes the
//! classification. Nothing is cached between selections, so results
//! reflect the folder contents at call time.

use crate::classify::{classify, Classification};
use crate::dispatch::{run_plans, run_single, DispatchReport, PrintDispatcher};
use crate::library::{Library, MusicFile, Song};
use crate::plan::{plan, PlanOutcome};
use sheetset_common::config::CopyMode;
use sheetset_common::{Catalog, Error, Result, Roster};

/// Everything a front end needs to show after a print-all run
#[derive(Debug)]
pub struct PrintReport {
    pub song: String,
    /// The plans that were attempted and the instruments with no files
    pub outcome: PlanOutcome,
    /// Per-copy dispatch results
    pub dispatch: DispatchReport,
    /// Files that matched no instrument (informational)
    pub unclassified: Vec<MusicFile>,
}

/// A single user's working state: library, configuration, current song
pub struct Session {
    library: Library,
    catalog: Catalog,
    roster: Roster,
    copy_mode: CopyMode,
    current: Option<(Song, Classification)>,
}

impl Session {
    pub fn new(library: Library, catalog: Catalog, roster: Roster, copy_mode: CopyMode) -> Self {
        Self {
            library,
            catalog,
            roster,
            copy_mode,
            current: None,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The selected song and its classification, if any
    pub fn current(&self) -> Option<(&Song, &Classification)> {
        self.current.as_ref().map(|(song, c)| (song, c))
    }

    /// Select a song: re-scan its folder and classify the files found.
    /// Replaces any previous selection.
    pub fn select_song(&mut self, name: &str) -> Result<&Classification> {
        let song = self.library.song(name)?;
        let files = self.library.music_files(&song)?;
        let classification = classify(&files, &self.catalog);

        tracing::info!(
            "Selected {}: {} files, {} matched groups, {} unclassified",
            song.name,
            files.len(),
            classification.matched().count(),
            classification.unclassified().len()
        );

        let (_, classification) = self.current.insert((song, classification));
        Ok(classification)
    }

    /// Compute the print plan for the current song without dispatching
    pub fn plan_current(&self) -> Result<PlanOutcome> {
        let (_, classification) = self.selected()?;
        Ok(plan(classification, &self.roster))
    }

    /// Print the whole set for the current song per the active roster
    pub fn print_all(&self, dispatcher: &dyn PrintDispatcher) -> Result<PrintReport> {
        let (song, classification) = self.selected()?;
        let outcome = plan(classification, &self.roster);
        let dispatch = run_plans(dispatcher, &outcome.plans, self.copy_mode);
        Ok(PrintReport {
            song: song.name.clone(),
            outcome,
            dispatch,
            unclassified: classification.unclassified().to_vec(),
        })
    }

    /// Print one copy of every file matched to a single instrument,
    /// ignoring the roster
    pub fn print_part(
        &self,
        instrument: &str,
        dispatcher: &dyn PrintDispatcher,
    ) -> Result<DispatchReport> {
        if self.catalog.lookup(instrument).is_none() {
            return Err(Error::UnknownInstrument(instrument.to_string()));
        }
        let (_, classification) = self.selected()?;
        Ok(run_single(dispatcher, classification.files_for(instrument)))
    }

    fn selected(&self) -> Result<(&Song, &Classification)> {
        self.current
            .as_ref()
            .map(|(song, c)| (song, c))
            .ok_or(Error::NoSongSelected)
    }
}
