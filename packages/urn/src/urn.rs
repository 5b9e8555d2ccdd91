//! URN:NIR encoding and decoding for Italian legal norms.
//!
//! The canonical identifier grammar, bit-exact for upstream compatibility:
//!
//! ```text
//! urn:nir:stato:<token>[:<date>;<number>][:allegato<n>][:art<n>][:originale|vigente][:version_date<date>]
//! ```
//!
//! Field order is fixed. Optional segments leave no placeholder when
//! absent; each is self-describing through its literal prefix, except the
//! bare version token which is one of exactly two literals. The decoder
//! accepts the full N2Ls resolver URL the upstream database wraps the URN
//! in, and only that.
//!
//! # Examples
//!
//! ```
//! use normalex_urn::norma::NormaVisitata;
//! use normalex_urn::urn::parse_urn;
//!
//! let view = NormaVisitata::from_input(
//!     "regio decreto",
//!     Some("1930-10-19"),
//!     Some("1398"),
//!     None,
//!     Some("1"),
//!     None,
//!     None,
//! )
//! .unwrap();
//! assert_eq!(view.urn(), "urn:nir:stato:regio.decreto:1930-10-19;1398:art1");
//!
//! let decoded = parse_urn(&view.url()).unwrap();
//! assert_eq!(decoded, view);
//! ```

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{NormaError, Result};
use crate::norma::{Norma, NormaVisitata, Version};
use crate::registry::ActType;

/// Resolver endpoint the upstream database wraps URNs in.
pub const NORMATTIVA_N2LS_URL: &str = "https://www.normattiva.it/uri-res/N2Ls?";

/// Scheme prefix of every national identifier.
pub const URN_PREFIX: &str = "urn:nir:stato:";

/// Date format used throughout the grammar.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date shape: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`NormaError::InvalidDate`] for any other shape or an
/// impossible calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    if !DATE_PATTERN.is_match(raw) {
        return Err(NormaError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| NormaError::InvalidDate(raw.to_string()))
}

/// Encode a view as its canonical URN string.
///
/// Pure and deterministic: identical views always produce byte-identical
/// strings, which cache keys and history deduplication rely on. The act
/// type is re-validated here because the encoder is also reachable from
/// decoded, less-trusted input.
///
/// # Errors
/// Returns [`NormaError::InvalidReference`] if the act type has no URN
/// token (EUR-Lex sourced) or a version date is present without the
/// in-force version.
pub fn generate_urn(view: &NormaVisitata) -> Result<String> {
    let norma = view.norma();
    let token = norma.act_type().urn_token().ok_or_else(|| {
        NormaError::InvalidReference(format!(
            "'{}' is EUR-Lex sourced and cannot be encoded as URN:NIR",
            norma.act_type().display()
        ))
    })?;
    if view.version_date().is_some() && view.version() != Some(Version::InForce) {
        return Err(NormaError::InvalidReference(
            "version date is only meaningful for the in-force version".to_string(),
        ));
    }

    let mut urn = String::from(URN_PREFIX);
    urn.push_str(token);

    // Joint date;number segment; omitted entirely when both are absent,
    // which is what self-contained act types rely on.
    match (norma.date(), norma.number()) {
        (Some(date), Some(number)) => {
            urn.push(':');
            urn.push_str(&date.format(DATE_FORMAT).to_string());
            urn.push(';');
            urn.push_str(number);
        }
        (Some(date), None) => {
            urn.push(':');
            urn.push_str(&date.format(DATE_FORMAT).to_string());
        }
        (None, Some(number)) => {
            urn.push_str(":;");
            urn.push_str(number);
        }
        (None, None) => {}
    }

    if let Some(annex) = view.annex() {
        urn.push_str(":allegato");
        urn.push_str(annex);
    }
    if let Some(article) = view.article() {
        urn.push_str(":art");
        urn.push_str(article);
    }
    if let Some(version) = view.version() {
        urn.push(':');
        urn.push_str(version.as_str());
    }
    if let Some(version_date) = view.version_date() {
        urn.push_str(":version_date");
        urn.push_str(&version_date.format(DATE_FORMAT).to_string());
    }

    debug!(%urn, "generated URN");
    Ok(urn)
}

/// Decode a full N2Ls URL back into a view.
///
/// Inverse of [`generate_urn`]; strict on the canonical grammar. The view
/// is rebuilt through validated construction, so its URN is re-derived
/// rather than echoed from the input.
///
/// # Errors
/// - [`NormaError::MalformedIdentifier`] if the URL prefix or any segment
///   does not match the grammar.
/// - [`NormaError::UnknownActType`] if the leading token is not in the
///   registry.
/// - [`NormaError::InvalidDate`] for malformed date fields.
/// - [`NormaError::InvalidReference`] for inconsistent fields, e.g. a
///   version date with the original version.
pub fn parse_urn(url: &str) -> Result<NormaVisitata> {
    let payload = url
        .strip_prefix(NORMATTIVA_N2LS_URL)
        .and_then(|rest| rest.strip_prefix(URN_PREFIX))
        .ok_or_else(|| {
            NormaError::MalformedIdentifier(format!(
                "expected '{NORMATTIVA_N2LS_URL}{URN_PREFIX}' prefix"
            ))
        })?;
    if payload.is_empty() {
        return Err(NormaError::MalformedIdentifier(
            "empty identifier payload".to_string(),
        ));
    }

    let segments: Vec<&str> = payload.split(':').collect();
    let act_type = ActType::from_urn_token(segments[0])?;

    // The date;number segment sits right after the token when present;
    // for self-contained acts the optional tail starts immediately.
    let mut date = None;
    let mut number = None;
    let mut tail_start = 1;
    if let Some(segment) = segments.get(1) {
        if !is_tail_segment(segment) {
            (date, number) = split_date_number(segment)?;
            tail_start = 2;
        }
    }

    let mut annex = None;
    let mut article = None;
    let mut version = None;
    let mut version_date = None;
    for segment in &segments[tail_start..] {
        // Literal-prefix classification, longest prefix first. The
        // version_date check must precede the bare version literals.
        if let Some(rest) = segment.strip_prefix("allegato") {
            annex = Some(non_empty_value(rest, "allegato")?.to_string());
        } else if let Some(rest) = segment.strip_prefix("version_date") {
            version_date = Some(parse_date(non_empty_value(rest, "version_date")?)?);
        } else if let Some(rest) = segment.strip_prefix("art") {
            article = Some(non_empty_value(rest, "art")?.to_string());
        } else if *segment == "originale" {
            version = Some(Version::Original);
        } else if *segment == "vigente" {
            version = Some(Version::InForce);
        } else {
            return Err(NormaError::MalformedIdentifier(format!(
                "unrecognized segment '{segment}'"
            )));
        }
    }

    let norma = Norma::new(act_type, date, number);
    let view = NormaVisitata::new(norma, annex, article, version, version_date)?;
    debug!(urn = view.urn(), "parsed URN");
    Ok(view)
}

/// Whether a segment belongs to the optional tail rather than being the
/// date;number segment.
fn is_tail_segment(segment: &str) -> bool {
    segment.starts_with("allegato")
        || segment.starts_with("art")
        || segment.starts_with("version_date")
        || segment == "originale"
        || segment == "vigente"
}

/// Split the joint `<date>;<number>` segment; either half may be absent
/// but not both.
fn split_date_number(segment: &str) -> Result<(Option<NaiveDate>, Option<String>)> {
    let (date_part, number_part) = match segment.split_once(';') {
        Some((date, number)) => (date, Some(number)),
        None => (segment, None),
    };

    let date = if date_part.is_empty() {
        None
    } else {
        Some(parse_date(date_part)?)
    };
    let number = match number_part {
        Some("") => {
            return Err(NormaError::MalformedIdentifier(
                "empty act number after ';'".to_string(),
            ))
        }
        Some(number) => Some(number.to_string()),
        None => None,
    };

    if date.is_none() && number.is_none() {
        return Err(NormaError::MalformedIdentifier(
            "empty date;number segment".to_string(),
        ));
    }
    Ok((date, number))
}

/// Reject a prefixed segment whose value part is empty.
fn non_empty_value<'a>(value: &'a str, prefix: &str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(NormaError::MalformedIdentifier(format!(
            "'{prefix}' segment has no value"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ActType;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn n2ls(payload: &str) -> String {
        format!("{NORMATTIVA_N2LS_URL}{URN_PREFIX}{payload}")
    }

    // -------------------------------------------------------------------------
    // Encoding
    // -------------------------------------------------------------------------

    mod encoding {
        use super::*;

        #[test]
        fn test_encode_reference_example() {
            let view = NormaVisitata::from_input(
                "regio decreto",
                Some("1930-10-19"),
                Some("1398"),
                None,
                Some("1"),
                None,
                None,
            )
            .unwrap();
            assert_eq!(view.urn(), "urn:nir:stato:regio.decreto:1930-10-19;1398:art1");
        }

        #[test]
        fn test_encode_self_contained_omits_empty_segment() {
            let view =
                NormaVisitata::from_input("costituzione", None, None, None, None, None, None)
                    .unwrap();
            assert_eq!(view.urn(), "urn:nir:stato:costituzione");
        }

        #[test]
        fn test_encode_date_without_number() {
            let view = NormaVisitata::from_input(
                "legge",
                Some("1990-08-07"),
                None,
                None,
                None,
                None,
                None,
            )
            .unwrap();
            assert_eq!(view.urn(), "urn:nir:stato:legge:1990-08-07");
        }

        #[test]
        fn test_encode_number_without_date() {
            let view =
                NormaVisitata::from_input("legge", None, Some("241"), None, None, None, None)
                    .unwrap();
            assert_eq!(view.urn(), "urn:nir:stato:legge:;241");
        }

        #[test]
        fn test_encode_full_tail_order() {
            let view = NormaVisitata::from_input(
                "decreto legislativo",
                Some("2003-06-30"),
                Some("196"),
                Some("A"),
                Some("7-bis"),
                Some("vigente"),
                Some("2024-06-01"),
            )
            .unwrap();
            assert_eq!(
                view.urn(),
                "urn:nir:stato:decreto.legislativo:2003-06-30;196:allegatoA:art7-bis:vigente:version_date2024-06-01"
            );
        }

        #[test]
        fn test_encode_version_without_date_selector() {
            let view = NormaVisitata::from_input(
                "legge",
                Some("1990-08-07"),
                Some("241"),
                None,
                None,
                Some("originale"),
                None,
            )
            .unwrap();
            assert_eq!(view.urn(), "urn:nir:stato:legge:1990-08-07;241:originale");
        }

        #[test]
        fn test_encode_is_deterministic() {
            let build = || {
                NormaVisitata::from_input(
                    "d.p.r.",
                    Some("1988-09-22"),
                    Some("447"),
                    None,
                    Some("1"),
                    Some("vigente"),
                    Some("2024-01-01"),
                )
                .unwrap()
            };
            assert_eq!(build().urn(), build().urn());
        }

        #[test]
        fn test_encode_rejects_eu_act_type() {
            let norma = Norma::new(ActType::RegolamentoUe, Some(date("2016-04-27")), None);
            let err = NormaVisitata::new(norma, None, None, None, None).unwrap_err();
            assert!(matches!(err, NormaError::InvalidReference(_)));
        }
    }

    // -------------------------------------------------------------------------
    // Decoding
    // -------------------------------------------------------------------------

    mod decoding {
        use super::*;

        #[test]
        fn test_parse_basic() {
            let view = parse_urn(&n2ls("regio.decreto:1930-10-19;1398:art1")).unwrap();
            assert_eq!(view.norma().act_type(), ActType::RegioDecreto);
            assert_eq!(view.norma().date(), Some(date("1930-10-19")));
            assert_eq!(view.norma().number(), Some("1398"));
            assert_eq!(view.article(), Some("1"));
            assert_eq!(view.annex(), None);
            assert_eq!(view.version(), None);
        }

        #[test]
        fn test_parse_self_contained() {
            let view = parse_urn(&n2ls("costituzione")).unwrap();
            assert_eq!(view.norma().act_type(), ActType::Costituzione);
            assert_eq!(view.norma().date(), None);
            assert_eq!(view.norma().number(), None);
        }

        #[test]
        fn test_parse_self_contained_with_article() {
            // No date;number segment, tail starts immediately
            let view = parse_urn(&n2ls("costituzione:art21")).unwrap();
            assert_eq!(view.norma().act_type(), ActType::Costituzione);
            assert_eq!(view.article(), Some("21"));
        }

        #[test]
        fn test_parse_full_tail() {
            let view = parse_urn(&n2ls(
                "decreto.legislativo:2003-06-30;196:allegatoA:art7-bis:vigente:version_date2024-06-01",
            ))
            .unwrap();
            assert_eq!(view.annex(), Some("A"));
            assert_eq!(view.article(), Some("7-bis"));
            assert_eq!(view.version(), Some(Version::InForce));
            assert_eq!(view.version_date(), Some(date("2024-06-01")));
        }

        #[test]
        fn test_parse_version_date_not_misread_as_version() {
            // The version_date prefix must win over any bare-version check
            let view = parse_urn(&n2ls(
                "legge:1990-08-07;241:vigente:version_date2024-01-01",
            ))
            .unwrap();
            assert_eq!(view.version(), Some(Version::InForce));
            assert_eq!(view.version_date(), Some(date("2024-01-01")));
        }

        #[test]
        fn test_parse_number_without_date() {
            let view = parse_urn(&n2ls("legge:;241")).unwrap();
            assert_eq!(view.norma().date(), None);
            assert_eq!(view.norma().number(), Some("241"));
        }

        #[test]
        fn test_parse_rejects_wrong_prefix() {
            let err = parse_urn("https://example.com/uri-res/N2Ls?urn:nir:stato:legge")
                .unwrap_err();
            assert!(matches!(err, NormaError::MalformedIdentifier(_)));
        }

        #[test]
        fn test_parse_rejects_bare_urn() {
            // Only the full N2Ls URL is accepted
            let err = parse_urn("urn:nir:stato:costituzione").unwrap_err();
            assert!(matches!(err, NormaError::MalformedIdentifier(_)));
        }

        #[test]
        fn test_parse_rejects_empty_payload() {
            let err = parse_urn(&n2ls("")).unwrap_err();
            assert!(matches!(err, NormaError::MalformedIdentifier(_)));
        }

        #[test]
        fn test_parse_rejects_unknown_act_type() {
            let err = parse_urn(&n2ls("decreto.sconosciuto:1990-08-07;241")).unwrap_err();
            assert!(matches!(err, NormaError::UnknownActType(_)));
        }

        #[test]
        fn test_parse_rejects_malformed_date() {
            let err = parse_urn(&n2ls("legge:07-08-1990;241")).unwrap_err();
            assert!(matches!(err, NormaError::InvalidDate(_)));
        }

        #[test]
        fn test_parse_rejects_unrecognized_segment() {
            let err = parse_urn(&n2ls("legge:1990-08-07;241:comma3")).unwrap_err();
            assert!(matches!(err, NormaError::MalformedIdentifier(_)));
        }

        #[test]
        fn test_parse_rejects_empty_prefixed_segment() {
            let err = parse_urn(&n2ls("legge:1990-08-07;241:art")).unwrap_err();
            assert!(matches!(err, NormaError::MalformedIdentifier(_)));
        }

        #[test]
        fn test_parse_rejects_version_date_with_original() {
            let err = parse_urn(&n2ls(
                "legge:1990-08-07;241:originale:version_date2024-01-01",
            ))
            .unwrap_err();
            assert!(matches!(err, NormaError::InvalidReference(_)));
        }

        #[test]
        fn test_parse_rejects_empty_date_number_segment() {
            let err = parse_urn(&n2ls("legge:;")).unwrap_err();
            assert!(matches!(err, NormaError::MalformedIdentifier(_)));
        }
    }

    // -------------------------------------------------------------------------
    // Round trips
    // -------------------------------------------------------------------------

    mod round_trip {
        use super::*;

        fn assert_round_trip(view: &NormaVisitata) {
            let decoded = parse_urn(&view.url()).unwrap();
            assert_eq!(&decoded, view);
            assert_eq!(decoded.urn(), view.urn());
            assert_eq!(decoded.norma(), view.norma());
            assert_eq!(decoded.annex(), view.annex());
            assert_eq!(decoded.article(), view.article());
            assert_eq!(decoded.version(), view.version());
            assert_eq!(decoded.version_date(), view.version_date());
        }

        #[test]
        fn test_round_trip_minimal() {
            let view =
                NormaVisitata::from_input("costituzione", None, None, None, None, None, None)
                    .unwrap();
            assert_round_trip(&view);
        }

        #[test]
        fn test_round_trip_every_tail_combination() {
            let annexes = [None, Some("2")];
            let articles = [None, Some("16-septies")];
            let versions: [(Option<&str>, Option<&str>); 4] = [
                (None, None),
                (Some("originale"), None),
                (Some("vigente"), None),
                (Some("vigente"), Some("2025-02-01")),
            ];
            for annex in annexes {
                for article in articles {
                    for (version, version_date) in versions {
                        let view = NormaVisitata::from_input(
                            "decreto legge",
                            Some("2020-03-17"),
                            Some("18"),
                            annex,
                            article,
                            version,
                            version_date,
                        )
                        .unwrap();
                        assert_round_trip(&view);
                    }
                }
            }
        }

        #[test]
        fn test_round_trip_partial_date_number() {
            for (date, number) in [
                (Some("1990-08-07"), Some("241")),
                (Some("1990-08-07"), None),
                (None, Some("241")),
            ] {
                let view =
                    NormaVisitata::from_input("legge", date, number, None, None, None, None)
                        .unwrap();
                assert_round_trip(&view);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Date parsing
    // -------------------------------------------------------------------------

    mod dates {
        use super::*;

        #[test]
        fn test_parse_date_valid() {
            assert_eq!(parse_date("1942-03-16").unwrap(), date("1942-03-16"));
        }

        #[test]
        fn test_parse_date_wrong_shape() {
            assert!(parse_date("16/03/1942").is_err());
            assert!(parse_date("1942-3-16").is_err());
            assert!(parse_date("").is_err());
        }

        #[test]
        fn test_parse_date_impossible_calendar_date() {
            assert!(parse_date("2021-02-30").is_err());
            assert!(parse_date("2021-13-01").is_err());
        }
    }
}
