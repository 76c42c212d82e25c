//! Instrument catalog
//!
//! A catalog is an ordered table of instrument identities. Each identity
//! carries the canonical part name, the alternate spellings (Norwegian
//! names and common abbreviations) used for filename matching, and the
//! default tuning/clef for the part.
//!
//! Catalog order is a stable display order only; matching never depends
//! on it. Adding or editing identities must not require changes to the
//! classifier or the print planner.

use serde::{Deserialize, Serialize};

/// Default transposition of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tuning {
    Bb,
    Eb,
    F,
    C,
}

/// Default clef of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    Bass,
    Percussion,
}

fn default_clef() -> Clef {
    Clef::Treble
}

/// A canonical instrument part with its alias spellings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentIdentity {
    /// Canonical part name, also a match key
    pub name: String,

    /// Additional match keys (foreign-language names, abbreviations)
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Default transposition, when the part has one
    #[serde(default)]
    pub tuning: Option<Tuning>,

    /// Default clef
    #[serde(default = "default_clef")]
    pub clef: Clef,
}

impl InstrumentIdentity {
    /// All strings that identify this part in a filename: the canonical
    /// name followed by the aliases.
    pub fn match_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Ordered table of instrument identities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    identities: Vec<InstrumentIdentity>,
}

impl Catalog {
    pub fn new(identities: Vec<InstrumentIdentity>) -> Self {
        Self { identities }
    }

    /// Identities in stable display order
    pub fn identities(&self) -> &[InstrumentIdentity] {
        &self.identities
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Find an identity by canonical name, case-insensitively
    pub fn lookup(&self, name: &str) -> Option<&InstrumentIdentity> {
        self.index_of(name).map(|i| &self.identities[i])
    }

    /// Position of an identity in display order, case-insensitively
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.identities
            .iter()
            .position(|id| id.name.eq_ignore_ascii_case(name))
    }

    /// The curated concert-band table.
    ///
    /// Alias spellings deliberately overlap across identities ("Baritone"
    /// is a substring of "Baritone Sax", "Bass" of "Bass Trombone");
    /// cross-identity collisions are resolved by the classifier's
    /// longest-alias-wins rule.
    pub fn builtin() -> Self {
        fn id(
            name: &str,
            aliases: &[&str],
            tuning: Option<Tuning>,
            clef: Clef,
        ) -> InstrumentIdentity {
            InstrumentIdentity {
                name: name.to_string(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
                tuning,
                clef,
            }
        }

        use Clef::{Bass as BassClef, Percussion as PercClef, Treble};
        use Tuning::{Bb, Eb, C, F};

        Self::new(vec![
            id("Score", &["Partitur"], None, Treble),
            id("Piccolo", &[], Some(C), Treble),
            id("Flute", &["Fløyte"], Some(C), Treble),
            id("Alto flute", &[], None, Treble),
            id("Oboe", &[], Some(C), Treble),
            id("Bassoon", &[], Some(C), BassClef),
            id("Clarinet", &["Klarinett"], Some(Bb), Treble),
            id(
                "Alto Clarinet",
                &["Alt Klarinett", "Klarinett Alt"],
                Some(Eb),
                Treble,
            ),
            id(
                "Bass Clarinet",
                &["Bass Klarinett", "Klarinett Bass"],
                Some(Bb),
                Treble,
            ),
            id(
                "Alto Sax",
                &[
                    "Alto Saxophone",
                    "Alt Saxofon",
                    "Saxofon Alt",
                    "Alt Sax",
                    "Sax Alt",
                    "Altsaxofon",
                    "Altsax",
                    "Altsaksofon",
                ],
                Some(Eb),
                Treble,
            ),
            id(
                "Tenor Sax",
                &[
                    "Tenor Saxophone",
                    "Tenor Saxofon",
                    "Saxofon Tenor",
                    "Sax Tenor",
                    "Tenorsax",
                    "Tenorsaxofon",
                    "Tenorsaksofon",
                ],
                Some(Bb),
                Treble,
            ),
            id(
                "Baritone Sax",
                &[
                    "Baritone Saxophone",
                    "Baryton Saxofon",
                    "Saxofon Baryton",
                    "Baryton Sax",
                    "Sax Baryton",
                    "Baritonsax",
                    "Barytonsax",
                    "Baritonsaxofon",
                    "Barytonsaxofon",
                    "Barytonsaksofon",
                ],
                Some(Eb),
                Treble,
            ),
            id("Contrabassoon", &[], Some(C), BassClef),
            id("Horn", &[], Some(F), Treble),
            id("Trumpet", &["Trompet", "Kornett", "Cornet"], Some(Bb), Treble),
            id("Trombone", &[], Some(C), BassClef),
            id("Bass Trombone", &[], Some(C), BassClef),
            id("Euphonium", &[], Some(Bb), BassClef),
            id("Baritone", &["Baryton"], Some(Bb), Treble),
            id("Tuba", &[], Some(C), BassClef),
            id("Bass", &[], Some(C), BassClef),
            id("Timpani", &[], Some(C), BassClef),
            id("Percussion", &["Perkusjon", "Drums"], None, PercClef),
            id("Harp", &[], Some(C), Treble),
            id("Piano", &["Keyboard"], Some(C), Treble),
            id("Choir", &[], None, Treble),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert!(catalog.lookup("Trumpet").is_some());
        assert!(catalog.lookup("trumpet").is_some());
        assert!(catalog.lookup("TRUMPET").is_some());
        assert!(catalog.lookup("Theremin").is_none());
    }

    #[test]
    fn match_keys_include_canonical_name_and_aliases() {
        let catalog = Catalog::builtin();
        let trumpet = catalog.lookup("Trumpet").unwrap();
        let keys: Vec<&str> = trumpet.match_keys().collect();
        assert_eq!(keys, vec!["Trumpet", "Trompet", "Kornett", "Cornet"]);
    }

    #[test]
    fn builtin_keeps_display_order_stable() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.identities()[0].name, "Score");
        assert!(catalog.index_of("Trombone").unwrap() < catalog.index_of("Bass Trombone").unwrap());
    }

    #[test]
    fn identity_without_aliases_still_matches_on_name() {
        let catalog = Catalog::builtin();
        let tuba = catalog.lookup("Tuba").unwrap();
        assert_eq!(tuba.match_keys().collect::<Vec<_>>(), vec!["Tuba"]);
    }

    #[test]
    fn catalog_deserializes_from_toml() {
        let toml_src = r#"
            [[identities]]
            name = "Trumpet"
            aliases = ["Trompet"]
            tuning = "Bb"

            [[identities]]
            name = "Tuba"
            clef = "bass"
        "#;
        let catalog: Catalog = toml::from_str(toml_src).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("Tuba").unwrap().clef, Clef::Bass);
        assert_eq!(catalog.lookup("Trumpet").unwrap().tuning, Some(Tuning::Bb));
    }
}
