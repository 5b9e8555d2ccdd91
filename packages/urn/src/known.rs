//! Shortcuts for well-known norms.
//!
//! The major Italian codes are cited by name rather than by their enacting
//! decree; this table maps those names to canonical URN payloads so a
//! search for "codice civile" lands on `regio.decreto:1942-03-16;262`.
//! The table is configuration data taken from the upstream list.

use crate::error::Result;
use crate::norma::NormaVisitata;
use crate::urn::{parse_urn, NORMATTIVA_N2LS_URL, URN_PREFIX};

/// Well-known norm names and their canonical URN payloads.
pub const WELL_KNOWN_NORMS: &[(&str, &str)] = &[
    ("costituzione", "costituzione"),
    ("codice civile", "regio.decreto:1942-03-16;262"),
    ("codice penale", "regio.decreto:1930-10-19;1398"),
    ("codice di procedura civile", "regio.decreto:1940-10-28;1443"),
    (
        "codice di procedura penale",
        "decreto.del.presidente.della.repubblica:1988-09-22;447",
    ),
    ("codice della navigazione", "regio.decreto:1942-03-30;327"),
];

/// Resolve a well-known norm name to its view.
///
/// Lookup is case-insensitive and trimmed. `None` means the name is not
/// in the table; the inner `Result` surfaces decoding failures, which for
/// the static table only occur if an entry is edited into an invalid
/// payload.
#[must_use]
pub fn resolve(name: &str) -> Option<Result<NormaVisitata>> {
    let needle = name.trim().to_lowercase();
    WELL_KNOWN_NORMS
        .iter()
        .find(|(known, _)| *known == needle)
        .map(|(_, payload)| parse_urn(&format!("{NORMATTIVA_N2LS_URL}{URN_PREFIX}{payload}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ActType;

    #[test]
    fn test_every_entry_decodes() {
        for (name, _) in WELL_KNOWN_NORMS {
            let view = resolve(name).unwrap_or_else(|| panic!("missing entry for {name}"));
            assert!(view.is_ok(), "entry '{name}' failed to decode");
        }
    }

    #[test]
    fn test_resolve_codice_civile() {
        let view = resolve("codice civile").unwrap().unwrap();
        assert_eq!(view.norma().act_type(), ActType::RegioDecreto);
        assert_eq!(view.norma().number(), Some("262"));
        assert_eq!(view.urn(), "urn:nir:stato:regio.decreto:1942-03-16;262");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let a = resolve("Codice Penale").unwrap().unwrap();
        let b = resolve("codice penale").unwrap().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_unknown_name() {
        assert!(resolve("codice della strada").is_none());
    }
}
