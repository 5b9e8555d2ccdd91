//! Normalex URN codec.
//!
//! Canonical URN:NIR identifiers for Italian legal norms, with an ELI
//! path builder for EU acts. A [`Norma`] identifies an act; a
//! [`NormaVisitata`] narrows it to an annex, article and version and
//! carries the canonical identifier string consumers use as a cache and
//! history key. Encoding and decoding are pure, stateless functions; the
//! crate does no I/O.
//!
//! # Example
//!
//! ```
//! use normalex_urn::{parse_urn, NormaVisitata};
//!
//! let view = NormaVisitata::from_input(
//!     "regio decreto",
//!     Some("1930-10-19"),
//!     Some("1398"),
//!     None,
//!     Some("1"),
//!     None,
//!     None,
//! )?;
//! assert_eq!(view.urn(), "urn:nir:stato:regio.decreto:1930-10-19;1398:art1");
//!
//! let replayed = parse_urn(&view.url())?;
//! assert_eq!(replayed, view);
//! # Ok::<(), normalex_urn::NormaError>(())
//! ```
//!
//! # Architecture
//!
//! - [`registry`]: act-type synonym table and token resolution
//! - [`norma`]: the `Norma` and `NormaVisitata` value objects
//! - [`urn`]: URN:NIR encoder and decoder
//! - [`eurlex`]: ELI path builder for EUR-Lex sourced acts
//! - [`known`]: shortcuts for well-known norms (codes)
//! - [`error`]: error types and Result alias
//! - [`cli`]: command-line interface

pub mod cli;
pub mod error;
pub mod eurlex;
pub mod known;
pub mod norma;
pub mod registry;
pub mod urn;

// Re-export commonly used items
pub use error::{NormaError, Result};
pub use eurlex::eur_uri;
pub use norma::{Norma, NormaVisitata, Version};
pub use registry::{resolve_for_display, resolve_for_identifier, ActSource, ActType};
pub use urn::{generate_urn, parse_date, parse_urn, NORMATTIVA_N2LS_URL, URN_PREFIX};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_reexports() {
        let _act_type = ActType::Legge;
        let _version = Version::InForce;
        let _err = NormaError::UnknownActType("x".to_string());
    }
}
