//! Filename-to-instrument classification
//!
//! Matching is case-insensitive substring search of every alias of every
//! catalog identity against the filename, with longest-alias-wins
//! disambiguation: an alias is defeated by any strictly longer alias
//! (from any identity) that also matches the same filename. This is what
//! keeps "Bass Trombone 1.pdf" out of both the Trombone and the Bass
//! groups.
//!
//! `classify` is a pure function of its inputs: no side effects, no
//! caching, identical results on repeated calls.

use crate::library::MusicFile;
use sheetset_common::Catalog;

/// Files for one identity, in the order they were presented
#[derive(Debug, Clone)]
pub struct Group {
    /// Canonical identity name
    pub identity: String,
    pub files: Vec<MusicFile>,
}

/// Result of classifying one song's files against a catalog.
///
/// Holds one group per catalog identity, in catalog order, plus the
/// residual files that matched no alias or matched ambiguously. Every
/// file appears in at most one group.
#[derive(Debug, Clone)]
pub struct Classification {
    groups: Vec<Group>,
    unclassified: Vec<MusicFile>,
}

impl Classification {
    /// All groups in catalog display order, including empty ones
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Groups that matched at least one file
    pub fn matched(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| !g.files.is_empty())
    }

    /// Files for an identity by canonical name, case-insensitively
    pub fn files_for(&self, identity: &str) -> &[MusicFile] {
        self.groups
            .iter()
            .find(|g| g.identity.eq_ignore_ascii_case(identity))
            .map(|g| g.files.as_slice())
            .unwrap_or(&[])
    }

    /// Files that matched no alias, or matched ambiguously
    pub fn unclassified(&self) -> &[MusicFile] {
        &self.unclassified
    }
}

/// Assign each file to at most one catalog identity.
///
/// A file is assigned to the identity holding an undefeated match: an
/// alias not out-lengthed by any other matching alias. When undefeated
/// aliases of equal maximal length belong to more than one identity the
/// file is unresolvable and lands in the unclassified list instead of
/// being duplicated across groups.
pub fn classify(files: &[MusicFile], catalog: &Catalog) -> Classification {
    let mut groups: Vec<Group> = catalog
        .identities()
        .iter()
        .map(|id| Group {
            identity: id.name.clone(),
            files: Vec::new(),
        })
        .collect();
    let mut unclassified = Vec::new();

    for file in files {
        let filename = file.name.to_lowercase();

        // Every (identity, alias length) pair whose alias occurs in the
        // filename. Alias length is counted in characters, not bytes, so
        // "Fløyte" compares correctly against ASCII aliases.
        let mut matches: Vec<(usize, usize)> = Vec::new();
        for (index, identity) in catalog.identities().iter().enumerate() {
            for key in identity.match_keys() {
                if filename.contains(&key.to_lowercase()) {
                    matches.push((index, key.chars().count()));
                }
            }
        }

        let Some(max_len) = matches.iter().map(|&(_, len)| len).max() else {
            tracing::debug!("{}: no alias match", file.name);
            unclassified.push(file.clone());
            continue;
        };

        // Identities holding an undefeated (maximal length) alias.
        // matches is in ascending identity order, so adjacent dedup is
        // enough to collapse several same-length aliases of one identity.
        let mut winners: Vec<usize> = matches
            .iter()
            .filter(|&&(_, len)| len == max_len)
            .map(|&(index, _)| index)
            .collect();
        winners.dedup();

        if let [index] = winners[..] {
            groups[index].files.push(file.clone());
        } else {
            let names: Vec<&str> = winners
                .iter()
                .map(|&i| catalog.identities()[i].name.as_str())
                .collect();
            tracing::info!(
                "{}: ambiguous between {}, leaving unclassified",
                file.name,
                names.join(", ")
            );
            unclassified.push(file.clone());
        }
    }

    Classification {
        groups,
        unclassified,
    }
}
