//! Act-type registry for Italian and EU legislation.
//!
//! Maps free-form act-type input (as typed or selected by a user, e.g.
//! "d.p.r." or "Decreto Legislativo") to two canonical forms: a display
//! name for search UIs and result labels, and the dotted identifier token
//! embedded in URN:NIR strings. The two forms are never interchangeable;
//! the token round trip `token -> ActType -> token` is the identity.
//!
//! EU-sourced act types (regulation, directive) carry no URN:NIR token.
//! They are tagged [`ActSource::EurLex`] so encoding dispatches to the
//! ELI builder in [`crate::eurlex`] instead of the NIR encoder.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{EnumIter, IntoEnumIterator};

use crate::error::{NormaError, Result};

/// Upstream database an act type is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActSource {
    /// National database (normattiva.it), addressed by URN:NIR.
    Normattiva,
    /// EUR-Lex, addressed by ELI path.
    EurLex,
}

/// Types of legislative acts known to the registry.
///
/// The synonym table is configuration data taken from the upstream source
/// list; variants without a national URN token are EUR-Lex sourced and
/// expose an ELI token instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ActType {
    /// Costituzione della Repubblica Italiana.
    Costituzione,
    /// Legge ordinaria.
    Legge,
    /// Decreto-legge.
    DecretoLegge,
    /// Decreto legislativo.
    DecretoLegislativo,
    /// Decreto del Presidente della Repubblica.
    DecretoPresidenteRepubblica,
    /// Decreto del Presidente del Consiglio dei Ministri.
    DecretoPresidenteConsiglio,
    /// Decreto ministeriale.
    DecretoMinisteriale,
    /// Regio decreto.
    RegioDecreto,
    /// EU regulation (EUR-Lex).
    RegolamentoUe,
    /// EU directive (EUR-Lex).
    DirettivaUe,
}

/// Whitespace runs collapse to a single space before synonym lookup.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

impl ActType {
    /// Human-readable name used in search UIs and result labels.
    #[must_use]
    pub fn display(&self) -> &'static str {
        match self {
            Self::Costituzione => "Costituzione",
            Self::Legge => "Legge",
            Self::DecretoLegge => "Decreto Legge",
            Self::DecretoLegislativo => "Decreto Legislativo",
            Self::DecretoPresidenteRepubblica => "D.P.R.",
            Self::DecretoPresidenteConsiglio => "D.P.C.M.",
            Self::DecretoMinisteriale => "Decreto Ministeriale",
            Self::RegioDecreto => "Regio Decreto",
            Self::RegolamentoUe => "Regolamento UE",
            Self::DirettivaUe => "Direttiva UE",
        }
    }

    /// Dotted identifier token embedded in URN:NIR strings.
    ///
    /// `None` for EUR-Lex sourced types, which have no national token.
    #[must_use]
    pub fn urn_token(&self) -> Option<&'static str> {
        match self {
            Self::Costituzione => Some("costituzione"),
            Self::Legge => Some("legge"),
            Self::DecretoLegge => Some("decreto.legge"),
            Self::DecretoLegislativo => Some("decreto.legislativo"),
            Self::DecretoPresidenteRepubblica => {
                Some("decreto.del.presidente.della.repubblica")
            }
            Self::DecretoPresidenteConsiglio => {
                Some("decreto.del.presidente.del.consiglio.dei.ministri")
            }
            Self::DecretoMinisteriale => Some("decreto.ministeriale"),
            Self::RegioDecreto => Some("regio.decreto"),
            Self::RegolamentoUe | Self::DirettivaUe => None,
        }
    }

    /// ELI path token used by the EUR-Lex builder.
    ///
    /// `None` for nationally sourced types.
    #[must_use]
    pub fn eli_token(&self) -> Option<&'static str> {
        match self {
            Self::RegolamentoUe => Some("reg"),
            Self::DirettivaUe => Some("dir"),
            _ => None,
        }
    }

    /// Which upstream database serves this act type.
    #[must_use]
    pub fn source(&self) -> ActSource {
        match self {
            Self::RegolamentoUe | Self::DirettivaUe => ActSource::EurLex,
            _ => ActSource::Normattiva,
        }
    }

    /// Whether the act is identified by its type alone, with no enactment
    /// date or number (constitution-class acts).
    #[must_use]
    pub fn is_self_contained(&self) -> bool {
        matches!(self, Self::Costituzione)
    }

    /// Lowercase synonyms a user might type or select for this act type.
    #[must_use]
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Self::Costituzione => &["costituzione", "cost.", "cost"],
            Self::Legge => &["legge", "l.", "l"],
            Self::DecretoLegge => &["decreto legge", "decreto-legge", "d.l.", "dl"],
            Self::DecretoLegislativo => {
                &["decreto legislativo", "d.lgs.", "d.lgs", "dlgs"]
            }
            Self::DecretoPresidenteRepubblica => {
                &["decreto del presidente della repubblica", "d.p.r.", "dpr"]
            }
            Self::DecretoPresidenteConsiglio => &[
                "decreto del presidente del consiglio dei ministri",
                "d.p.c.m.",
                "dpcm",
            ],
            Self::DecretoMinisteriale => &["decreto ministeriale", "d.m.", "dm"],
            Self::RegioDecreto => &["regio decreto", "r.d.", "rd"],
            Self::RegolamentoUe => &[
                "regolamento ue",
                "regolamento (ue)",
                "reg. ue",
                "reg ue",
                "regolamento europeo",
            ],
            Self::DirettivaUe => &["direttiva ue", "dir. ue", "dir ue", "direttiva europea"],
        }
    }

    /// Resolve a free-form act-type string against all known synonyms.
    ///
    /// Lookup is case-insensitive and whitespace-normalized.
    ///
    /// # Errors
    /// Returns [`NormaError::UnknownActType`] if no entry matches.
    pub fn from_input(raw: &str) -> Result<Self> {
        let needle = normalize_input(raw);
        Self::iter()
            .find(|t| t.synonyms().contains(&needle.as_str()))
            .ok_or_else(|| NormaError::UnknownActType(raw.trim().to_string()))
    }

    /// Resolve a dotted URN token back to its registry entry.
    ///
    /// Exact match only; this is the decoder's inverse map.
    ///
    /// # Errors
    /// Returns [`NormaError::UnknownActType`] if the token is not in the
    /// registry.
    pub fn from_urn_token(token: &str) -> Result<Self> {
        Self::iter()
            .find(|t| t.urn_token() == Some(token))
            .ok_or_else(|| NormaError::UnknownActType(token.to_string()))
    }
}

impl std::fmt::Display for ActType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl TryFrom<String> for ActType {
    type Error = NormaError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_input(&value)
    }
}

impl From<ActType> for String {
    fn from(value: ActType) -> Self {
        value.display().to_string()
    }
}

/// Resolve a free-form act-type string to its display name.
///
/// # Errors
/// Returns [`NormaError::UnknownActType`] if no synonym matches.
///
/// # Examples
/// ```
/// use normalex_urn::registry::resolve_for_display;
///
/// assert_eq!(resolve_for_display("d.p.r.").unwrap(), "D.P.R.");
/// assert_eq!(resolve_for_display("LEGGE").unwrap(), "Legge");
/// ```
pub fn resolve_for_display(raw: &str) -> Result<&'static str> {
    ActType::from_input(raw).map(|t| t.display())
}

/// Resolve a free-form act-type string to its dotted URN token.
///
/// # Errors
/// Returns [`NormaError::UnknownActType`] if no synonym matches, or
/// [`NormaError::InvalidReference`] for EUR-Lex sourced types, which have
/// no national token.
///
/// # Examples
/// ```
/// use normalex_urn::registry::resolve_for_identifier;
///
/// assert_eq!(
///     resolve_for_identifier("d.p.r.").unwrap(),
///     "decreto.del.presidente.della.repubblica"
/// );
/// ```
pub fn resolve_for_identifier(raw: &str) -> Result<&'static str> {
    let act_type = ActType::from_input(raw)?;
    act_type.urn_token().ok_or_else(|| {
        NormaError::InvalidReference(format!(
            "'{}' is EUR-Lex sourced and has no URN:NIR token",
            act_type.display()
        ))
    })
}

/// Normalize raw act-type input for synonym lookup.
fn normalize_input(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, " ").into_owned()
}
