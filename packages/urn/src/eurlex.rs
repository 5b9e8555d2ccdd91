//! ELI path builder for EUR-Lex sourced acts.
//!
//! EU regulations and directives are addressed by the European Legislation
//! Identifier path scheme, a grammar with no structure in common with
//! URN:NIR: no colon-delimited segments and no optional tail. It is kept
//! as its own builder so neither grammar has to branch on the other.

use tracing::debug;

use crate::error::{NormaError, Result};
use crate::registry::ActType;

/// Base of every ELI path.
pub const EURLEX_BASE_URL: &str = "https://eur-lex.europa.eu/eli";

/// Language edition requested by default.
pub const DEFAULT_LANGUAGE: &str = "ita";

/// Build the ELI URI for an EU act:
/// `https://eur-lex.europa.eu/eli/<type>/<year>/<num>/oj/<lang>`.
///
/// # Errors
/// Returns [`NormaError::InvalidReference`] if the act type is not
/// EUR-Lex sourced or the act number is blank.
///
/// # Examples
/// ```
/// use normalex_urn::eurlex::eur_uri;
/// use normalex_urn::registry::ActType;
///
/// let uri = eur_uri(ActType::RegolamentoUe, 2016, "679", None).unwrap();
/// assert_eq!(uri, "https://eur-lex.europa.eu/eli/reg/2016/679/oj/ita");
/// ```
pub fn eur_uri(act_type: ActType, year: i32, number: &str, language: Option<&str>) -> Result<String> {
    let token = act_type.eli_token().ok_or_else(|| {
        NormaError::InvalidReference(format!(
            "'{}' is not an EUR-Lex act type",
            act_type.display()
        ))
    })?;
    let number = number.trim();
    if number.is_empty() {
        return Err(NormaError::InvalidReference(
            "EUR-Lex reference requires an act number".to_string(),
        ));
    }
    let language = language.unwrap_or(DEFAULT_LANGUAGE);

    let uri = format!("{EURLEX_BASE_URL}/{token}/{year}/{number}/oj/{language}");
    debug!(%uri, "built ELI URI");
    Ok(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eur_uri_regulation() {
        assert_eq!(
            eur_uri(ActType::RegolamentoUe, 2016, "679", None).unwrap(),
            "https://eur-lex.europa.eu/eli/reg/2016/679/oj/ita"
        );
    }

    #[test]
    fn test_eur_uri_directive_with_language() {
        assert_eq!(
            eur_uri(ActType::DirettivaUe, 2019, "790", Some("eng")).unwrap(),
            "https://eur-lex.europa.eu/eli/dir/2019/790/oj/eng"
        );
    }

    #[test]
    fn test_eur_uri_rejects_national_act_type() {
        let err = eur_uri(ActType::Legge, 1990, "241", None).unwrap_err();
        assert!(matches!(err, NormaError::InvalidReference(_)));
    }

    #[test]
    fn test_eur_uri_rejects_blank_number() {
        let err = eur_uri(ActType::RegolamentoUe, 2016, "  ", None).unwrap_err();
        assert!(matches!(err, NormaError::InvalidReference(_)));
    }

    #[test]
    fn test_eur_uri_never_produces_nir_grammar() {
        let uri = eur_uri(ActType::DirettivaUe, 2019, "790", None).unwrap();
        assert!(!uri.contains("urn:nir"));
        assert!(!uri.contains(';'));
    }
}
