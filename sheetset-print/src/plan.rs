//! Print planning from roster headcounts
//!
//! For every instrument the roster wants copies of, the planner spreads
//! the headcount evenly over the files found for that part: when
//! "Trumpet 1" and "Trumpet 2" split eight players, each file gets four
//! copies. Uneven divisions round up, so the printed total is never
//! below the headcount.

use crate::classify::Classification;
use crate::library::MusicFile;
use sheetset_common::Roster;

/// Copies to print of one part file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintPlan {
    /// Canonical identity name the file was classified as
    pub identity: String,
    pub file: MusicFile,
    pub copies: u32,
}

/// A roster instrument with headcount > 0 but no matching file.
/// User-visible; never silently skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundAlert {
    pub identity: String,
}

/// Plans plus the instruments that could not be covered
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    pub plans: Vec<PrintPlan>,
    pub missing: Vec<NotFoundAlert>,
}

impl PlanOutcome {
    /// Total physical copies across all plans
    pub fn total_copies(&self) -> u32 {
        self.plans.iter().map(|p| p.copies).sum()
    }
}

/// Compute per-file copy counts for one classified song.
///
/// Identities absent from the roster, or present with headcount zero,
/// produce neither plans nor alerts no matter how many files matched
/// them; those stay available for the manual single-part print path.
pub fn plan(classification: &Classification, roster: &Roster) -> PlanOutcome {
    let mut outcome = PlanOutcome::default();

    for group in classification.groups() {
        let headcount = roster.headcount(&group.identity);
        if headcount == 0 {
            continue;
        }

        let file_count = group.files.len() as u32;
        if file_count == 0 {
            outcome.missing.push(NotFoundAlert {
                identity: group.identity.clone(),
            });
            continue;
        }

        // Uniform per-file count, rounded up: a few extra copies beat an
        // uneven hand-out at the printer tray.
        let copies = headcount.div_ceil(file_count);
        for file in &group.files {
            outcome.plans.push(PrintPlan {
                identity: group.identity.clone(),
                file: file.clone(),
                copies,
            });
        }
    }

    outcome
}
