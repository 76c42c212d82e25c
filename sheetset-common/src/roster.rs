//! Roster tables
//!
//! A roster maps canonical instrument names to the number of players in
//! one ensemble configuration, which is the number of copies the print
//! planner aims to produce for that part. A headcount of zero (or a name
//! absent from the table) means "do not print".

use crate::catalog::Catalog;
use std::collections::HashMap;

/// Required copy counts per instrument for one ensemble
#[derive(Debug, Clone)]
pub struct Roster {
    pub name: String,
    entries: HashMap<String, u32>,
}

impl Roster {
    pub fn new(name: impl Into<String>, entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self {
            name: name.into(),
            entries: entries.into_iter().collect(),
        }
    }

    /// Required headcount for an instrument, case-insensitively.
    /// Absent names count as zero.
    pub fn headcount(&self, instrument: &str) -> u32 {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(instrument))
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Roster keys with no matching catalog identity. These entries can
    /// never be satisfied, which almost always means a typo in a
    /// configured roster table.
    pub fn unknown_names(&self, catalog: &Catalog) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .entries
            .keys()
            .filter(|name| catalog.lookup(name).is_none())
            .cloned()
            .collect();
        unknown.sort();
        unknown
    }

    /// Names of the predefined ensemble tables
    pub fn builtin_names() -> &'static [&'static str] {
        &["ohm", "fhm", "fhm-uten-overlapp"]
    }

    /// Look up a predefined ensemble table by name, case-insensitively
    pub fn builtin(name: &str) -> Option<Self> {
        fn table(name: &str, entries: &[(&str, u32)]) -> Roster {
            Roster::new(
                name,
                entries.iter().map(|(n, c)| (n.to_string(), *c)),
            )
        }

        match name.to_ascii_lowercase().as_str() {
            "ohm" => Some(table(
                "ohm",
                &[
                    ("Piccolo", 1),
                    ("Flute", 3),
                    ("Clarinet", 6),
                    ("Bass Clarinet", 1),
                    ("Bassoon", 1),
                    ("Alto Sax", 3),
                    ("Tenor Sax", 1),
                    ("Baritone Sax", 1),
                    ("Horn", 4),
                    ("Trumpet", 8),
                    ("Trombone", 8),
                    ("Bass Trombone", 1),
                    ("Euphonium", 4),
                    ("Baritone", 4),
                    ("Tuba", 3),
                    ("Bass", 1),
                    ("Timpani", 0),
                    ("Percussion", 1),
                ],
            )),
            "fhm" => Some(table(
                "fhm",
                &[
                    ("Piccolo", 1),
                    ("Flute", 3),
                    ("Clarinet", 4),
                    ("Bass Clarinet", 1),
                    ("Alto Sax", 2),
                    ("Tenor Sax", 1),
                    ("Baritone Sax", 0),
                    ("Horn", 3),
                    ("Trumpet", 6),
                    ("Trombone", 2),
                    ("Bass Trombone", 1),
                    ("Euphonium", 2),
                    ("Tuba", 1),
                    ("Bass", 1),
                    ("Timpani", 0),
                    ("Percussion", 0),
                ],
            )),
            "fhm-uten-overlapp" => Some(table(
                "fhm-uten-overlapp",
                &[
                    ("Piccolo", 1),
                    ("Flute", 2),
                    ("Clarinet", 3),
                    ("Bass Clarinet", 0),
                    ("Alto Sax", 1),
                    ("Tenor Sax", 1),
                    ("Baritone Sax", 0),
                    ("Horn", 2),
                    ("Trumpet", 4),
                    ("Trombone", 2),
                    ("Bass Trombone", 1),
                    ("Euphonium", 1),
                    ("Baritone", 1),
                    ("Tuba", 1),
                    ("Bass", 1),
                    ("Timpani", 0),
                    ("Percussion", 1),
                ],
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_resolve_by_name() {
        for name in Roster::builtin_names() {
            assert!(Roster::builtin(name).is_some(), "missing table {name}");
        }
        assert!(Roster::builtin("OHM").is_some());
        assert!(Roster::builtin("unknown-band").is_none());
    }

    #[test]
    fn headcount_lookup_is_case_insensitive_and_defaults_to_zero() {
        let roster = Roster::builtin("ohm").unwrap();
        assert_eq!(roster.headcount("Trumpet"), 8);
        assert_eq!(roster.headcount("trumpet"), 8);
        assert_eq!(roster.headcount("Timpani"), 0);
        assert_eq!(roster.headcount("Harp"), 0);
    }

    #[test]
    fn builtin_names_all_exist_in_builtin_catalog() {
        let catalog = Catalog::builtin();
        for name in Roster::builtin_names() {
            let roster = Roster::builtin(name).unwrap();
            assert_eq!(roster.unknown_names(&catalog), Vec::<String>::new());
        }
    }

    #[test]
    fn unknown_names_reports_typos() {
        let catalog = Catalog::builtin();
        let roster = Roster::new("custom", [("Trumpet".to_string(), 2), ("Trumpett".to_string(), 1)]);
        assert_eq!(roster.unknown_names(&catalog), vec!["Trumpett".to_string()]);
    }
}
