// Incremint quote CLI - turn a quote workbook into a DOCX term quote.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use incremint_core::QuoteConfig;
use incremint_core::logging;

#[derive(Parser)]
#[command(name = "incremint")]
#[command(about = "Generate term insurance quote documents from spreadsheets")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.incremint/config.json)
    #[arg(long, global = true, env = "INCREMINT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for the generated document (overrides the config file)
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a quote from one workbook with "Client Details" / "Premiums" /
    /// "Final Notes" sheets
    #[command(after_help = "\
Examples:
  incremint generate Sharma.xlsx
  incremint generate Sharma.xlsx --out-dir ./quotes")]
    Generate {
        /// Workbook to read (xlsx, xls, xlsb, ods)
        workbook: PathBuf,
    },

    /// Build a quote from separate client and premium workbooks
    Combine {
        /// Workbook whose first sheet holds the client details
        client: PathBuf,

        /// Workbook whose first sheet holds the premiums
        premiums: PathBuf,

        /// Also write the merged input workbook to this path
        #[arg(long)]
        save_combined: Option<PathBuf>,
    },

    /// Build a quote from a Google Sheets spreadsheet via the Sheets API
    Sheet {
        /// Spreadsheet id (the part after /d/ in the sheet URL)
        spreadsheet_id: String,

        /// OAuth access token (default: GOOGLE_ACCESS_TOKEN)
        #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Build a quote from a spreadsheet shared by link
    Url {
        /// Share URL, e.g. https://docs.google.com/spreadsheets/d/<id>/edit
        sheet_url: String,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<QuoteConfig> {
    let mut config = match &cli.config {
        Some(path) => QuoteConfig::load_from_path(path)?,
        None => QuoteConfig::load()?,
    };
    if let Some(dir) = &cli.out_dir {
        config.output_dir = Some(dir.clone());
    }
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = match logging::init_logging(&config.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e:#}");
            None
        }
    };

    let result = match cli.command {
        Commands::Generate { workbook } => commands::generate(&config, &workbook),
        Commands::Combine {
            client,
            premiums,
            save_combined,
        } => commands::combine(&config, &client, &premiums, save_combined.as_deref()),
        Commands::Sheet {
            spreadsheet_id,
            token,
        } => commands::sheet(&config, &spreadsheet_id, token),
        Commands::Url { sheet_url } => commands::url(&config, &sheet_url),
    };

    match result {
        Ok(path) => {
            info!("Quote ready at {}", path.display());
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error generating quote: {e:#}");
            eprintln!("Error generating quote: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from(["incremint", "generate", "Sharma.xlsx", "--out-dir", "/tmp/q"])
            .unwrap();
        assert_eq!(cli.out_dir, Some(PathBuf::from("/tmp/q")));
        assert!(matches!(cli.command, Commands::Generate { workbook } if workbook == PathBuf::from("Sharma.xlsx")));
    }

    #[test]
    fn test_parse_combine() {
        let cli = Cli::try_parse_from([
            "incremint",
            "combine",
            "client.xlsx",
            "premium.xlsx",
            "--save-combined",
            "combined_input.xlsx",
        ])
        .unwrap();
        match cli.command {
            Commands::Combine {
                client,
                premiums,
                save_combined,
            } => {
                assert_eq!(client, PathBuf::from("client.xlsx"));
                assert_eq!(premiums, PathBuf::from("premium.xlsx"));
                assert_eq!(save_combined, Some(PathBuf::from("combined_input.xlsx")));
            }
            _ => panic!("expected combine"),
        }
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["incremint"]).is_err());
        assert!(Cli::try_parse_from(["incremint", "sheet"]).is_err());
    }

    #[test]
    fn test_load_config_out_dir_override() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.json");
        let cli = Cli::try_parse_from([
            "incremint",
            "--config",
            config_path.to_str().unwrap(),
            "--out-dir",
            "/srv/quotes",
            "url",
            "https://docs.google.com/spreadsheets/d/abc/edit",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("/srv/quotes")));
        assert!(config_path.exists());
    }
}
