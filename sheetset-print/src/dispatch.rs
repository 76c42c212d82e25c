//! Print dispatch
//!
//! The planner decides what to print and how many times; this module
//! hands the result to a print backend. `PrintDispatcher` is the seam:
//! the shipped implementation drives Ghostscript, tests substitute a
//! recording mock.
//!
//! Dispatch runs are sequential and best-effort: a failed copy is logged
//! and collected into the report, and the run continues with the next
//! copy or file.

use crate::library::MusicFile;
use crate::plan::PrintPlan;
use sheetset_common::config::{CopyMode, PrinterConfig};
use sheetset_common::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A print backend able to produce copies of one PDF
pub trait PrintDispatcher {
    /// Send `copies` copies of one file to the printer
    fn dispatch(&self, file: &Path, copies: u32) -> Result<()>;
}

/// Outcome of one dispatch run
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Physical copies successfully handed to the backend
    pub copies_sent: u32,
    /// Per-attempt failures (file, reason)
    pub failures: Vec<(PathBuf, String)>,
}

impl DispatchReport {
    pub fn all_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, file: &Path, copies: u32, result: Result<()>) {
        match result {
            Ok(()) => self.copies_sent += copies,
            Err(e) => {
                tracing::error!("Print dispatch failed for {}: {}", file.display(), e);
                self.failures.push((file.to_path_buf(), e.to_string()));
            }
        }
    }
}

/// Execute a set of print plans.
///
/// `CopyMode::Native` passes each plan's copy count through to the
/// backend in one invocation; `CopyMode::PerCopy` expands a plan into
/// that many single-copy invocations for backends without a usable
/// copies flag.
pub fn run_plans(
    dispatcher: &dyn PrintDispatcher,
    plans: &[PrintPlan],
    mode: CopyMode,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for plan in plans {
        match mode {
            CopyMode::Native => {
                let result = dispatcher.dispatch(&plan.file.path, plan.copies);
                report.record(&plan.file.path, plan.copies, result);
            }
            CopyMode::PerCopy => {
                for _ in 0..plan.copies {
                    let result = dispatcher.dispatch(&plan.file.path, 1);
                    report.record(&plan.file.path, 1, result);
                }
            }
        }
    }

    report
}

/// The manual single-part path: one copy of every file in a matched
/// group, bypassing the roster entirely.
pub fn run_single(dispatcher: &dyn PrintDispatcher, files: &[MusicFile]) -> DispatchReport {
    let mut report = DispatchReport::default();
    for file in files {
        let result = dispatcher.dispatch(&file.path, 1);
        report.record(&file.path, 1, result);
    }
    report
}

/// Ghostscript-backed dispatcher.
///
/// Argument vector mirrors a plain `gs` print invocation:
/// `-dPrinted -dBATCH -dNOPAUSE -dNOPROMPT -q -dNumCopies=N
/// -sDEVICE=<device> [-sPAPERSIZE=<size>] [-sOutputFile=%printer%<name>]
/// <file>`. Without a configured printer name the backend's default
/// output is used.
pub struct GhostscriptDispatcher {
    config: PrinterConfig,
}

impl GhostscriptDispatcher {
    pub fn new(config: PrinterConfig) -> Self {
        Self { config }
    }

    fn executable() -> &'static str {
        if cfg!(target_os = "windows") {
            "gswin64c"
        } else {
            "gs"
        }
    }

    fn arguments(&self, file: &Path, copies: u32) -> Vec<String> {
        let mut args: Vec<String> = ["-dPrinted", "-dBATCH", "-dNOPAUSE", "-dNOPROMPT", "-q"]
            .iter()
            .map(|a| a.to_string())
            .collect();
        args.push(format!("-dNumCopies={}", copies));
        args.push(format!("-sDEVICE={}", self.config.device));
        if let Some(paper) = &self.config.paper_size {
            args.push(format!("-sPAPERSIZE={}", paper));
        }
        if let Some(printer) = &self.config.name {
            args.push(format!("-sOutputFile=%printer%{}", printer));
        }
        args.push(file.display().to_string());
        args
    }
}

impl PrintDispatcher for GhostscriptDispatcher {
    fn dispatch(&self, file: &Path, copies: u32) -> Result<()> {
        let args = self.arguments(file, copies);
        tracing::debug!("{} {}", Self::executable(), args.join(" "));

        let output = Command::new(Self::executable())
            .args(&args)
            .output()
            .map_err(|e| Error::Dispatch(format!("failed to run {}: {}", Self::executable(), e)))?;

        if !output.status.success() {
            return Err(Error::Dispatch(format!(
                "ghostscript exited with {} for {}",
                output.status,
                file.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every dispatch; fails on files whose name contains "jam"
    struct MockDispatcher {
        calls: RefCell<Vec<(PathBuf, u32)>>,
    }

    impl MockDispatcher {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PrintDispatcher for MockDispatcher {
        fn dispatch(&self, file: &Path, copies: u32) -> Result<()> {
            self.calls.borrow_mut().push((file.to_path_buf(), copies));
            if file.to_string_lossy().contains("jam") {
                return Err(Error::Dispatch("paper jam".to_string()));
            }
            Ok(())
        }
    }

    fn plan_for(name: &str, copies: u32) -> PrintPlan {
        PrintPlan {
            identity: "Trumpet".to_string(),
            file: MusicFile {
                name: name.to_string(),
                path: PathBuf::from("/library/Song").join(name),
            },
            copies,
        }
    }

    #[test]
    fn native_mode_passes_copy_count_through() {
        let mock = MockDispatcher::new();
        let report = run_plans(&mock, &[plan_for("Trumpet 1.pdf", 4)], CopyMode::Native);

        let calls = mock.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 4);
        assert_eq!(report.copies_sent, 4);
        assert!(report.all_ok());
    }

    #[test]
    fn per_copy_mode_expands_to_single_copy_calls() {
        let mock = MockDispatcher::new();
        let report = run_plans(&mock, &[plan_for("Trumpet 1.pdf", 3)], CopyMode::PerCopy);

        let calls = mock.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, copies)| *copies == 1));
        assert_eq!(report.copies_sent, 3);
    }

    #[test]
    fn failures_are_collected_and_do_not_stop_the_run() {
        let mock = MockDispatcher::new();
        let plans = vec![
            plan_for("jam Trumpet 1.pdf", 2),
            plan_for("Trumpet 2.pdf", 2),
        ];
        let report = run_plans(&mock, &plans, CopyMode::Native);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.copies_sent, 2);
        // the second plan was still dispatched
        assert_eq!(mock.calls.borrow().len(), 2);
    }

    #[test]
    fn per_copy_failures_keep_trying_remaining_copies() {
        let mock = MockDispatcher::new();
        let report = run_plans(&mock, &[plan_for("jam.pdf", 3)], CopyMode::PerCopy);

        assert_eq!(mock.calls.borrow().len(), 3);
        assert_eq!(report.failures.len(), 3);
        assert_eq!(report.copies_sent, 0);
    }

    #[test]
    fn run_single_prints_one_copy_per_file() {
        let mock = MockDispatcher::new();
        let files = vec![
            MusicFile {
                name: "Trumpet 1.pdf".to_string(),
                path: PathBuf::from("/library/Song/Trumpet 1.pdf"),
            },
            MusicFile {
                name: "Trumpet 2.pdf".to_string(),
                path: PathBuf::from("/library/Song/Trumpet 2.pdf"),
            },
        ];
        let report = run_single(&mock, &files);

        let calls = mock.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|(_, copies)| *copies == 1));
        assert_eq!(report.copies_sent, 2);
    }

    #[test]
    fn ghostscript_arguments_include_copies_device_and_printer() {
        let dispatcher = GhostscriptDispatcher::new(PrinterConfig {
            name: Some("Kontor".to_string()),
            device: "mswinpr2".to_string(),
            paper_size: Some("a4".to_string()),
            copy_mode: CopyMode::Native,
        });
        let args = dispatcher.arguments(Path::new("/library/Song/Trumpet 1.pdf"), 3);

        assert!(args.contains(&"-dNumCopies=3".to_string()));
        assert!(args.contains(&"-sDEVICE=mswinpr2".to_string()));
        assert!(args.contains(&"-sPAPERSIZE=a4".to_string()));
        assert!(args.contains(&"-sOutputFile=%printer%Kontor".to_string()));
        assert_eq!(args.last().unwrap(), "/library/Song/Trumpet 1.pdf");
    }

    #[test]
    fn ghostscript_omits_output_file_without_printer_name() {
        let dispatcher = GhostscriptDispatcher::new(PrinterConfig::default());
        let args = dispatcher.arguments(Path::new("part.pdf"), 1);
        assert!(!args.iter().any(|a| a.starts_with("-sOutputFile")));
    }
}
