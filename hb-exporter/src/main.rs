use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hb_client::{HumbleClient, RedeemOutcome, SteamClient};
use hb_exporter::claim::ClaimReport;
use hb_exporter::export::{DEFAULT_SEPARATOR, ExportFormat};
use hb_exporter::utils::clipboard::copy_to_clipboard;
use hb_exporter::utils::date::display_date;
use hb_exporter::{AppError, Config, FileStore, KeyLibrary, OwnershipCache, RowFilter};
use shared::{Category, RedeemMode, Row};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hb-exporter", version, about = "Search, claim and export Humble Bundle keys")]
struct Cli {
    /// Local storage dump (JSON object of key → string)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log level, overrides LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the key table, newest purchase first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Fetch owned apps again instead of using the cache
        #[arg(long)]
        refresh_owned: bool,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the selected rows
    Export {
        #[arg(long, value_enum)]
        format: FormatArg,
        /// Delimited-table separator
        #[arg(long, default_value_t = DEFAULT_SEPARATOR)]
        separator: char,
        /// Claim unrevealed keys before exporting
        #[arg(long, value_enum)]
        claim: Option<ClaimArg>,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        refresh_owned: bool,
    },
    /// Claim every unrevealed key in the selection
    Claim {
        #[arg(long, value_enum, default_value_t = ClaimArg::Key)]
        mode: ClaimArg,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Reveal one key or create one gift link
    Redeem {
        /// Order gamekey
        gamekey: String,
        keyindex: u32,
        #[arg(long)]
        gift: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show one row with its links
    Show { gamekey: String, keyindex: u32 },
    /// Print the owned app count
    Owned {
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Case-insensitive text search
    #[arg(long)]
    search: Option<String>,
    /// Store, Bundle, Choice or Other
    #[arg(long)]
    category: Option<Category>,
    /// Key type tag, e.g. steam
    #[arg(long)]
    key_type: Option<String>,
    /// Only rows that are neither revealed nor gifts
    #[arg(long)]
    unrevealed: bool,
    #[arg(long)]
    hide_expired: bool,
}

impl From<&FilterArgs> for RowFilter {
    fn from(args: &FilterArgs) -> Self {
        RowFilter {
            search: args.search.clone(),
            category: args.category,
            key_type: args.key_type.clone(),
            unrevealed_only: args.unrevealed,
            hide_expired: args.hide_expired,
        }
    }
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Copy to the system clipboard instead of printing
    #[arg(long, conflicts_with = "output")]
    clipboard: bool,
    /// Write to a file instead of printing
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Asf,
    Keys,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClaimArg {
    Key,
    Gift,
}

impl From<ClaimArg> for RedeemMode {
    fn from(arg: ClaimArg) -> Self {
        match arg {
            ClaimArg::Key => RedeemMode::Key,
            ClaimArg::Gift => RedeemMode::Gift,
        }
    }
}

fn emit(text: &str, output: &OutputArgs) -> anyhow::Result<()> {
    if output.clipboard {
        copy_to_clipboard(text)?;
        eprintln!("Exported to clipboard");
    } else if let Some(path) = &output.output {
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Exported to {}", path.display());
    } else {
        println!("{text}");
    }
    Ok(())
}

fn print_claim_report(report: &ClaimReport) {
    eprintln!("Claimed {} key(s), skipped {}", report.claimed, report.skipped);
    for (message, names) in report.failures.iter() {
        eprintln!("{message}:");
        for name in names {
            eprintln!("  - {name}");
        }
    }
}

fn print_table(rows: &[&Row]) {
    println!(
        "{:<10} {:<40} {:<8} {:<30} {:<5} {:<8} {:<5} {:>6} {:<10} {:<10}",
        "Type", "Name", "Category", "Bundle Name", "Gift", "Revealed", "Owned", "Copies", "Purchased", "Exp. Date"
    );
    for row in rows {
        println!(
            "{:<10} {:<40} {:<8} {:<30} {:<5} {:<8} {:<5} {:>6} {:<10} {:<10}",
            truncate(&row.key_type, 10),
            truncate(&row.human_name, 40),
            row.category.as_str(),
            truncate(&row.category_human_name, 30),
            row.kind.as_str(),
            if row.is_revealed() { "Yes" } else { "No" },
            row.owned.as_str(),
            format!("{}/{}", row.unrevealed_copies, row.copies),
            display_date(&row.created),
            display_date(&row.expiry_date),
        );
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    hb_exporter::init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    let client_config = config.client_config();
    let humble = HumbleClient::new(&client_config)?;
    let steam = SteamClient::new(&client_config)?;
    let mut store = FileStore::open(&config.store_path)
        .with_context(|| format!("opening store {}", config.store_path.display()))?;
    let mut cache = OwnershipCache::new();

    match cli.command {
        Command::List {
            filter,
            refresh_owned,
            json,
        } => {
            let library = KeyLibrary::load(&mut store, &mut cache, &steam, refresh_owned).await;
            let rows = library.newest_first(&RowFilter::from(&filter));
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_table(&rows);
            }
        }
        Command::Export {
            format,
            separator,
            claim,
            output,
            filter,
            refresh_owned,
        } => {
            let filter = RowFilter::from(&filter);
            let mut library = KeyLibrary::load(&mut store, &mut cache, &steam, refresh_owned).await;
            let rows = match claim {
                Some(mode) => {
                    let (report, rows) = library.claim_snapshot(&filter, &humble, mode.into()).await;
                    print_claim_report(&report);
                    rows
                }
                None => library.snapshot(&filter),
            };

            let format = match format {
                FormatArg::Asf => ExportFormat::Asf,
                FormatArg::Keys => ExportFormat::Keys,
                FormatArg::Csv => ExportFormat::Csv { separator },
                FormatArg::Json => ExportFormat::Json,
            };
            let text = hb_exporter::export(&rows, format)?;
            emit(&text, &output)?;
        }
        Command::Claim { mode, filter } => {
            let mut library = KeyLibrary::load(&mut store, &mut cache, &steam, false).await;
            let report = library.claim(&RowFilter::from(&filter), &humble, mode.into()).await;
            for key in &report.revealed {
                println!("{}\t{}", key.value, key.human_name);
            }
            print_claim_report(&report);
        }
        Command::Redeem {
            gamekey,
            keyindex,
            gift,
            output,
        } => {
            let mut library = KeyLibrary::load(&mut store, &mut cache, &steam, false).await;
            let mode = if gift { RedeemMode::Gift } else { RedeemMode::Key };
            let outcome = library
                .claim_one(&gamekey, keyindex, &humble, mode)
                .await
                .ok_or_else(|| AppError::NotFound(format!("{gamekey}#{keyindex}")))??;
            match outcome {
                RedeemOutcome::Revealed { key } => emit(&key, &output)?,
                RedeemOutcome::GiftLink { url } => emit(&url, &output)?,
                RedeemOutcome::Rejected { message } => anyhow::bail!("Redemption rejected: {message}"),
            }
        }
        Command::Show { gamekey, keyindex } => {
            let library = KeyLibrary::load(&mut store, &mut cache, &steam, false).await;
            let row = library
                .find(&gamekey, keyindex)
                .ok_or_else(|| AppError::NotFound(format!("{gamekey}#{keyindex}")))?;
            println!("{}", serde_json::to_string_pretty(row)?);
            println!("{}", serde_json::to_string_pretty(&row.links())?);
        }
        Command::Owned { refresh } => {
            let count = cache.load(&mut store, &steam, refresh).await.len();
            println!("{count} owned ids ({:?})", cache.state());
        }
    }

    Ok(())
}
