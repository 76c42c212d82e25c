//! Sheet music library scanner
//!
//! A library is a folder with one subfolder per song; each song folder
//! holds one PDF per instrument part. Results are re-read on every
//! selection, never cached, so they always reflect the folder contents
//! at call time.

use sheetset_common::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// System files and folders never treated as library content
const IGNORE_PATTERNS: &[&str] = &[".DS_Store", "Thumbs.db", ".git", ".svn"];

/// One song folder in the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub name: String,
    pub path: PathBuf,
}

/// One PDF part file inside a song folder. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicFile {
    pub name: String,
    pub path: PathBuf,
}

/// Sheet music library rooted at a single folder
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Open a library, validating that the root exists and is a folder
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(Error::LibraryNotFound(root));
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Song entries: the immediate subfolders of the root, sorted by name
    pub fn songs(&self) -> Result<Vec<Song>> {
        let mut songs = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(should_process_entry);

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        songs.push(Song {
                            name: entry.file_name().to_string_lossy().into_owned(),
                            path: entry.path().to_path_buf(),
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing library entry: {}", e);
                    // Continue scanning, don't abort
                }
            }
        }

        songs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(songs)
    }

    /// Look up a song folder by name
    pub fn song(&self, name: &str) -> Result<Song> {
        let path = self.root.join(name);
        if !path.is_dir() {
            return Err(Error::SongNotFound(name.to_string()));
        }
        Ok(Song {
            name: name.to_string(),
            path,
        })
    }

    /// PDF part files directly inside a song folder, sorted by name.
    ///
    /// The extension match is case-insensitive so libraries copied from
    /// case-insensitive filesystems keep working. An empty folder is not
    /// an error.
    pub fn music_files(&self, song: &Song) -> Result<Vec<MusicFile>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&song.path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(should_process_entry);

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && is_pdf(entry.path()) {
                        files.push(MusicFile {
                            name: entry.file_name().to_string_lossy().into_owned(),
                            path: entry.path().to_path_buf(),
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing file in {}: {}", song.name, e);
                }
            }
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!("{}: {} part files", song.name, files.len());
        Ok(files)
    }
}

/// Check if entry should be processed
fn should_process_entry(entry: &DirEntry) -> bool {
    let file_name = entry.file_name().to_string_lossy();
    !IGNORE_PATTERNS.iter().any(|p| file_name == *p)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
