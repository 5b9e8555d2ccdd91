//! Value objects for legal norms and views into them.
//!
//! [`Norma`] identifies an act (type, enactment date, number). A
//! [`NormaVisitata`] narrows a `Norma` to a specific annex, article and
//! version. Both are immutable after construction; every edit produces a
//! new value. The canonical URN is computed at construction through
//! [`crate::urn::generate_urn`], so equality and hashing of views are
//! defined by the encoded string, never by structural field comparison.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{NormaError, Result};
use crate::eurlex;
use crate::registry::{ActSource, ActType};
use crate::urn;

/// Version of an act a view refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    /// The act as originally enacted.
    #[serde(rename = "originale")]
    Original,
    /// The act as amended and in force, optionally as of a given date.
    #[serde(rename = "vigente")]
    InForce,
}

impl Version {
    /// Literal token used in the URN grammar.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "originale",
            Self::InForce => "vigente",
        }
    }

    /// Parse a version token. Exactly two literals are recognized,
    /// case-insensitively.
    #[must_use]
    pub fn from_token(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "originale" => Some(Self::Original),
            "vigente" => Some(Self::InForce),
            _ => None,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference to an act: type, optional enactment date, optional number.
///
/// Absence is explicit: a missing date or number is `None`, never an empty
/// string. Self-contained act types (constitution-class) carry neither; a
/// date or number supplied for them is dropped with a warning rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "NormaFields")]
pub struct Norma {
    act_type: ActType,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<String>,
}

/// Deserialization shape for [`Norma`]; routed through [`Norma::new`] so
/// the self-contained invariant holds for decoded data too.
#[derive(Deserialize)]
struct NormaFields {
    act_type: ActType,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    number: Option<String>,
}

impl From<NormaFields> for Norma {
    fn from(fields: NormaFields) -> Self {
        Self::new(fields.act_type, fields.date, fields.number)
    }
}

impl Norma {
    /// Create a norm reference from already-validated parts.
    ///
    /// A date or number supplied for a self-contained act type is ignored
    /// with a warning; lenient on over-specification, strict on malformed
    /// individual fields.
    #[must_use]
    pub fn new(act_type: ActType, date: Option<NaiveDate>, number: Option<String>) -> Self {
        let number = non_blank(number);
        if act_type.is_self_contained() && (date.is_some() || number.is_some()) {
            warn!(
                act_type = act_type.display(),
                "self-contained act type carries no date or number; ignoring both"
            );
            return Self {
                act_type,
                date: None,
                number: None,
            };
        }
        Self {
            act_type,
            date,
            number,
        }
    }

    /// Create a norm reference from raw user input.
    ///
    /// Blank fields count as absent; the act type is resolved against the
    /// registry synonyms and the date is parsed as `YYYY-MM-DD`.
    ///
    /// # Errors
    /// [`NormaError::UnknownActType`] or [`NormaError::InvalidDate`].
    pub fn from_input(act_type: &str, date: Option<&str>, number: Option<&str>) -> Result<Self> {
        let act_type = ActType::from_input(act_type)?;
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(urn::parse_date(raw)?),
            None => None,
        };
        let number = non_blank(number.map(str::to_string));
        Ok(Self::new(act_type, date, number))
    }

    /// The act type.
    #[must_use]
    pub fn act_type(&self) -> ActType {
        self.act_type
    }

    /// Enactment date, if provided.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Act number, if provided.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Canonical act-overview URL.
    ///
    /// Nationally sourced acts go through the URN encoder as a degenerate
    /// view (no annex, article or version), so the overview URL and the
    /// view URN can never drift apart. EUR-Lex sourced acts dispatch to
    /// the ELI builder instead.
    ///
    /// # Errors
    /// [`NormaError::InvalidReference`] if an EUR-Lex act lacks the year
    /// or number its path requires.
    pub fn overview_url(&self) -> Result<String> {
        match self.act_type.source() {
            ActSource::Normattiva => {
                let view = NormaVisitata::new(self.clone(), None, None, None, None)?;
                Ok(view.url())
            }
            ActSource::EurLex => {
                let year = self.date.map(|d| d.year()).ok_or_else(|| {
                    NormaError::InvalidReference(
                        "EUR-Lex reference requires an enactment date for the year".to_string(),
                    )
                })?;
                let number = self.number.as_deref().ok_or_else(|| {
                    NormaError::InvalidReference(
                        "EUR-Lex reference requires an act number".to_string(),
                    )
                })?;
                eurlex::eur_uri(self.act_type, year, number, None)
            }
        }
    }
}

/// A view into an act: a [`Norma`] narrowed to an optional annex, article
/// and version.
///
/// The canonical URN is computed once at construction; two views that
/// encode to the same URN are the same entry for history deduplication,
/// regardless of how they were built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NormaVisitataFields")]
pub struct NormaVisitata {
    norma: Norma,
    #[serde(skip_serializing_if = "Option::is_none")]
    annex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    article: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_date: Option<NaiveDate>,
    urn: String,
}

/// Deserialization shape for [`NormaVisitata`]; routed through
/// [`NormaVisitata::new`] so the URN is re-derived and validated rather
/// than trusted from stored data.
#[derive(Deserialize)]
struct NormaVisitataFields {
    norma: Norma,
    #[serde(default)]
    annex: Option<String>,
    #[serde(default)]
    article: Option<String>,
    #[serde(default)]
    version: Option<Version>,
    #[serde(default)]
    version_date: Option<NaiveDate>,
}

impl TryFrom<NormaVisitataFields> for NormaVisitata {
    type Error = NormaError;

    fn try_from(fields: NormaVisitataFields) -> Result<Self> {
        Self::new(
            fields.norma,
            fields.annex,
            fields.article,
            fields.version,
            fields.version_date,
        )
    }
}

impl NormaVisitata {
    /// Create a view and compute its canonical URN.
    ///
    /// Blank annex or article strings count as absent.
    ///
    /// # Errors
    /// [`NormaError::InvalidReference`] if the fields are structurally
    /// inconsistent (version date without the in-force version, or an
    /// EUR-Lex act type reaching the NIR encoder).
    pub fn new(
        norma: Norma,
        annex: Option<String>,
        article: Option<String>,
        version: Option<Version>,
        version_date: Option<NaiveDate>,
    ) -> Result<Self> {
        let mut view = Self {
            norma,
            annex: non_blank(annex),
            article: non_blank(article),
            version,
            version_date,
            urn: String::new(),
        };
        view.urn = urn::generate_urn(&view)?;
        Ok(view)
    }

    /// Create a view from raw user input, as handed over by a search form.
    ///
    /// # Errors
    /// [`NormaError::UnknownActType`], [`NormaError::InvalidDate`], or
    /// [`NormaError::InvalidReference`] for an unrecognized version token
    /// or inconsistent fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_input(
        act_type: &str,
        date: Option<&str>,
        number: Option<&str>,
        annex: Option<&str>,
        article: Option<&str>,
        version: Option<&str>,
        version_date: Option<&str>,
    ) -> Result<Self> {
        let norma = Norma::from_input(act_type, date, number)?;
        let version = match version.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(Version::from_token(raw).ok_or_else(|| {
                NormaError::InvalidReference(format!(
                    "unknown version '{raw}', expected 'originale' or 'vigente'"
                ))
            })?),
            None => None,
        };
        let version_date = match version_date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(urn::parse_date(raw)?),
            None => None,
        };
        Self::new(
            norma,
            annex.map(str::to_string),
            article.map(str::to_string),
            version,
            version_date,
        )
    }

    /// The underlying norm reference.
    #[must_use]
    pub fn norma(&self) -> &Norma {
        &self.norma
    }

    /// Annex identifier, if the view is narrowed to one.
    #[must_use]
    pub fn annex(&self) -> Option<&str> {
        self.annex.as_deref()
    }

    /// Article identifier, if the view is narrowed to one.
    #[must_use]
    pub fn article(&self) -> Option<&str> {
        self.article.as_deref()
    }

    /// Version selector, if the view specifies one.
    #[must_use]
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    /// As-of date for the in-force version.
    #[must_use]
    pub fn version_date(&self) -> Option<NaiveDate> {
        self.version_date
    }

    /// The canonical URN string, e.g.
    /// `urn:nir:stato:regio.decreto:1930-10-19;1398:art1`.
    #[must_use]
    pub fn urn(&self) -> &str {
        &self.urn
    }

    /// Full N2Ls resolver URL wrapping the URN, as consumed by the fetch
    /// layer.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", urn::NORMATTIVA_N2LS_URL, self.urn)
    }
}

// Identity for history deduplication is the encoded URN string.
impl PartialEq for NormaVisitata {
    fn eq(&self, other: &Self) -> bool {
        self.urn == other.urn
    }
}

impl Eq for NormaVisitata {}

impl std::hash::Hash for NormaVisitata {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.urn.hash(state);
    }
}

impl std::fmt::Display for NormaVisitata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.urn)
    }
}

/// Trim a field and treat blank as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
