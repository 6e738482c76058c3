//! Command-line view of scanner configuration
//!
//! Prints, as JSON, the configuration calls a decoder would receive for a
//! given set of barcode types (`export`), or the calls needed to move a
//! decoder from one set to another (`diff`).

use clap::{Args, Parser, Subcommand};
use std::process;
use zbar_web::{BarcodeType, ScannerOptions, SymbolOption, SymbolType};

#[derive(Parser)]
#[command(name = "zbarcfg")]
#[command(version)]
#[command(about = "Show the zbar configuration calls for a scanner setup", long_about = None)]
struct Cli {
    /// Log every reconciliation step
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print compact JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full configuration for a fresh decoder
    Export {
        /// Barcode types to scan for (e.g. QRCODE, ZBAR_EAN13); all if omitted
        types: Vec<String>,

        #[command(flatten)]
        settings: Settings,
    },

    /// Changes needed to go from one set of barcode types to another
    Diff {
        /// Barcode types the decoder currently scans for, comma separated
        #[arg(long, value_delimiter = ',')]
        from: Vec<String>,

        /// Barcode types to scan for next, comma separated
        #[arg(long, value_delimiter = ',')]
        to: Vec<String>,

        #[command(flatten)]
        settings: Settings,
    },
}

#[derive(Args)]
struct Settings {
    /// Minimum value length
    #[arg(long, default_value_t = 0)]
    min_length: i32,

    /// Maximum value length (0 for no limit)
    #[arg(long, default_value_t = 0)]
    max_length: i32,

    /// Number of agreeing passes required
    #[arg(long, default_value_t = 0)]
    uncertainty: i32,

    /// Restrict to the basic character set
    #[arg(long)]
    no_full_ascii: bool,

    /// Skip check digit validation
    #[arg(long)]
    no_honor_check: bool,

    /// Strip the check digit from values
    #[arg(long)]
    no_include_check: bool,
}

impl Settings {
    fn options(&self, scan_for: BarcodeType) -> ScannerOptions {
        ScannerOptions::new(scan_for, self.min_length, self.max_length)
            .with_uncertainty(self.uncertainty)
            .with_full_character_set(!self.no_full_ascii)
            .with_honor_check_digit(!self.no_honor_check)
            .with_include_check_digit(!self.no_include_check)
    }
}

/// Accepts wire names (`ZBAR_QRCODE`) as well as bare ones (`qrcode`).
fn parse_types(names: &[String]) -> Result<BarcodeType, String> {
    if names.is_empty() {
        return Ok(BarcodeType::ALL);
    }

    let mut types = BarcodeType::empty();
    for name in names {
        let upper = name.trim().to_ascii_uppercase();
        if upper == "ALL" {
            types |= BarcodeType::ALL;
            continue;
        }

        let wire = if upper.starts_with("ZBAR_") {
            upper
        } else {
            format!("ZBAR_{upper}")
        };
        let sym = SymbolType::from_symbol_name(&wire)
            .ok_or_else(|| format!("unknown barcode type '{name}'"))?;
        types |= sym.flag();
    }
    Ok(types)
}

fn print(options: &[SymbolOption], compact: bool) -> serde_json::Result<()> {
    let json = if compact {
        serde_json::to_string(options)?
    } else {
        serde_json::to_string_pretty(options)?
    };
    println!("{json}");
    Ok(())
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = match &cli.command {
        Command::Export { types, settings } => settings.options(parse_types(types)?).export(),
        Command::Diff { from, to, settings } => {
            let mut options = settings.options(parse_types(from)?);
            options.update_scan_for(parse_types(to)?)
        }
    };

    log::info!("{} symbol option(s)", options.len());
    print(&options, cli.compact).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("zbarcfg: {e}");
        process::exit(1);
    }
}
