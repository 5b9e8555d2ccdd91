//! Command-line interface for the URN codec.

use clap::{Parser, Subcommand};
use console::style;
use strum::IntoEnumIterator;

use crate::error::{NormaError, Result};
use crate::known;
use crate::norma::{Norma, NormaVisitata};
use crate::registry::{ActSource, ActType};
use crate::urn::parse_urn;

/// Normalex - Canonical URN:NIR identifiers for Italian and EU legislation.
#[derive(Parser)]
#[command(name = "normalex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the canonical identifier for a norm.
    Urn {
        /// Act type or well-known norm name (e.g. "legge", "codice civile")
        act_type: String,

        /// Enactment date in YYYY-MM-DD format
        #[arg(short, long)]
        date: Option<String>,

        /// Act number
        #[arg(short, long)]
        number: Option<String>,

        /// Annex identifier
        #[arg(long)]
        annex: Option<String>,

        /// Article identifier
        #[arg(short, long)]
        article: Option<String>,

        /// Version: "originale" or "vigente"
        #[arg(long)]
        version: Option<String>,

        /// As-of date for the in-force version, YYYY-MM-DD
        #[arg(long)]
        version_date: Option<String>,
    },

    /// Parse a Normattiva N2Ls URL back into its components.
    Parse {
        /// Full URL, e.g. "https://www.normattiva.it/uri-res/N2Ls?urn:nir:stato:..."
        url: String,
    },

    /// List known act types with their synonyms and tokens.
    Types,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Urn {
            act_type,
            date,
            number,
            annex,
            article,
            version,
            version_date,
        } => urn_command(
            &act_type,
            date.as_deref(),
            number.as_deref(),
            annex.as_deref(),
            article.as_deref(),
            version.as_deref(),
            version_date.as_deref(),
        ),
        Commands::Parse { url } => parse_command(&url),
        Commands::Types => {
            types_command();
            Ok(())
        }
    }
}

/// Execute the urn command.
#[allow(clippy::too_many_arguments)]
fn urn_command(
    act_type: &str,
    date: Option<&str>,
    number: Option<&str>,
    annex: Option<&str>,
    article: Option<&str>,
    version: Option<&str>,
    version_date: Option<&str>,
) -> Result<()> {
    // A bare name may be a well-known norm shortcut ("codice civile")
    let no_fields = [date, number, annex, article, version, version_date]
        .iter()
        .all(Option::is_none);
    if no_fields {
        if let Some(view) = known::resolve(act_type) {
            return print_view(&view?);
        }
    }

    // EUR-Lex sourced acts take the ELI path, never the NIR grammar
    if ActType::from_input(act_type)?.source() == ActSource::EurLex {
        if annex.is_some() || article.is_some() || version.is_some() || version_date.is_some() {
            return Err(NormaError::InvalidReference(
                "EUR-Lex references cannot be narrowed to an annex, article or version"
                    .to_string(),
            ));
        }
        let norma = Norma::from_input(act_type, date, number)?;
        println!(
            "{} {}",
            style("ELI:").bold(),
            style(norma.overview_url()?).cyan()
        );
        return Ok(());
    }

    let view =
        NormaVisitata::from_input(act_type, date, number, annex, article, version, version_date)?;
    print_view(&view)
}

/// Execute the parse command.
fn parse_command(url: &str) -> Result<()> {
    let view = parse_urn(url)?;
    let norma = view.norma();

    println!(
        "{} {}",
        style("Act type:").bold(),
        style(norma.act_type().display()).green()
    );
    if let Some(date) = norma.date() {
        println!("{} {}", style("Date:").bold(), date.format("%Y-%m-%d"));
    }
    if let Some(number) = norma.number() {
        println!("{} {}", style("Number:").bold(), number);
    }
    if let Some(annex) = view.annex() {
        println!("{} {}", style("Annex:").bold(), annex);
    }
    if let Some(article) = view.article() {
        println!("{} {}", style("Article:").bold(), article);
    }
    if let Some(version) = view.version() {
        println!("{} {}", style("Version:").bold(), version);
    }
    if let Some(version_date) = view.version_date() {
        println!(
            "{} {}",
            style("Version date:").bold(),
            version_date.format("%Y-%m-%d")
        );
    }
    println!("{} {}", style("URN:").bold(), style(view.urn()).cyan());
    Ok(())
}

/// Execute the types command.
fn types_command() {
    for act_type in ActType::iter() {
        let token = match act_type.source() {
            ActSource::Normattiva => act_type.urn_token().unwrap_or_default(),
            ActSource::EurLex => act_type.eli_token().unwrap_or_default(),
        };
        println!(
            "{:<22} {:<50} {}",
            style(act_type.display()).green(),
            token,
            act_type.synonyms().join(", ")
        );
    }
}

/// Print an encoded view.
fn print_view(view: &NormaVisitata) -> Result<()> {
    println!("{} {}", style("URN:").bold(), style(view.urn()).cyan());
    println!("{} {}", style("URL:").bold(), view.url());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_urn() {
        let cli = Cli::parse_from([
            "normalex",
            "urn",
            "legge",
            "--date",
            "1990-08-07",
            "--number",
            "241",
        ]);

        let Commands::Urn {
            act_type,
            date,
            number,
            article,
            ..
        } = cli.command
        else {
            panic!("expected urn command");
        };
        assert_eq!(act_type, "legge");
        assert_eq!(date, Some("1990-08-07".to_string()));
        assert_eq!(number, Some("241".to_string()));
        assert!(article.is_none());
    }

    #[test]
    fn test_cli_parse_parse() {
        let cli = Cli::parse_from([
            "normalex",
            "parse",
            "https://www.normattiva.it/uri-res/N2Ls?urn:nir:stato:costituzione",
        ]);

        let Commands::Parse { url } = cli.command else {
            panic!("expected parse command");
        };
        assert!(url.ends_with("costituzione"));
    }

    #[test]
    fn test_urn_command_rejects_narrowed_eu_reference() {
        let err = urn_command(
            "Regolamento UE",
            Some("2016-04-27"),
            Some("679"),
            None,
            Some("17"),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, NormaError::InvalidReference(_)));
    }

    #[test]
    fn test_urn_command_eu_reference() {
        assert!(urn_command(
            "Regolamento UE",
            Some("2016-04-27"),
            Some("679"),
            None,
            None,
            None,
            None,
        )
        .is_ok());
    }

    #[test]
    fn test_urn_command_well_known_shortcut() {
        assert!(urn_command("codice civile", None, None, None, None, None, None).is_ok());
    }
}
