use analytics::{Report, ReportFilter, Summary, format_money};
use anyhow::{Context, bail};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use configuration::{Config, LoggingSettings, StorageBackend};
use core_types::input::{parse_amount, parse_rate};
use core_types::{AdvisorId, AdvisorUpdate, SaleId};
use engine::CommissionEngine;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use storage::{BlobStore, FileBlobStore, MemoryBlobStore, Repository};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

type Engine = CommissionEngine<Box<dyn BlobStore>>;

/// The main entry point for the commission tracker.
fn main() -> ExitCode {
    // Load COMMISSION__* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match configuration::load_config_from(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_tracing(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initialising logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Tracks sales advisors, their sales, and the commissions they earn.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the configuration file.
    #[arg(long, default_value = configuration::CONFIG_FILE)]
    config: PathBuf,

    /// Overrides the configured storage backend.
    #[arg(long, value_enum)]
    backend: Option<StorageBackend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage advisors.
    #[command(subcommand)]
    Advisor(AdvisorCommand),
    /// Manage sales.
    #[command(subcommand)]
    Sale(SaleCommand),
    /// Show the commission report per advisor with grand totals.
    Report(ReportArgs),
    /// Show store-wide totals, ignoring any filter.
    Summary,
    /// Export the sales of the selected advisors as a CSV document.
    Export(ExportArgs),
}

#[derive(Subcommand)]
enum AdvisorCommand {
    /// Register a new advisor.
    Add {
        #[arg(long)]
        name: String,
        /// Commission percentage between 0 and 100.
        #[arg(long)]
        rate: String,
    },
    /// List every advisor with their sale count and total commission.
    List,
    /// Show one advisor and their sales.
    Show { id: AdvisorId },
    /// Change an advisor's name and/or commission rate.
    Update {
        id: AdvisorId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        rate: Option<String>,
    },
    /// Delete an advisor together with all of their sales.
    Delete {
        id: AdvisorId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SaleCommand {
    /// Record a sale for an advisor.
    Add {
        #[arg(long)]
        advisor: AdvisorId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: String,
        /// Sale date (format: YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List every sale with its advisor and commission.
    List,
    /// Delete a single sale.
    Delete {
        #[arg(long)]
        advisor: AdvisorId,
        #[arg(long)]
        sale: SaleId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Restrict to one advisor. 0 selects all advisors.
    #[arg(long)]
    advisor: Option<AdvisorId>,

    /// First sale date to include (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last sale date to include (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    fn to_filter(&self) -> ReportFilter {
        ReportFilter {
            advisor_id: self.advisor,
            date_from: self.from,
            date_to: self.to,
        }
    }
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Write to this path instead of the dated file in the export directory.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print the document to standard output instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
}

// ==============================================================================
// Setup
// ==============================================================================

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over the
/// configured level. The returned guard must live until the program exits so
/// buffered file logs are flushed.
fn init_tracing(logging: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log filter '{}'", logging.level))?;

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "commission-tracker.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(None)
        }
    }
}

/// Opens the ledger on the configured (or overridden) storage backend.
fn open_engine(config: &Config, backend: Option<StorageBackend>) -> anyhow::Result<Engine> {
    let store: Box<dyn BlobStore> = match backend.unwrap_or(config.storage.backend) {
        StorageBackend::File => Box::new(FileBlobStore::new(&config.storage.directory)),
        StorageBackend::Memory => Box::new(MemoryBlobStore::new()),
    };
    let repository = Repository::with_key(store, config.storage.key.as_str());
    CommissionEngine::open(repository).context("Failed to open the commission ledger")
}

// ==============================================================================
// Command Dispatch
// ==============================================================================

fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let mut engine = open_engine(config, cli.backend)?;

    match cli.command {
        Commands::Advisor(command) => handle_advisor(&mut engine, command),
        Commands::Sale(command) => handle_sale(&mut engine, command),
        Commands::Report(args) => handle_report(&engine, &args),
        Commands::Summary => {
            print_summary(&engine.summary());
            Ok(())
        }
        Commands::Export(args) => handle_export(&engine, &args, config),
    }
}

fn handle_advisor(engine: &mut Engine, command: AdvisorCommand) -> anyhow::Result<()> {
    match command {
        AdvisorCommand::Add { name, rate } => {
            let rate = parse_rate(&rate)?;
            let advisor = engine.add_advisor(&name, rate)?;
            println!("Advisor '{}' registered with id {}.", advisor.name, advisor.id);
        }
        AdvisorCommand::List => {
            let overviews = engine.advisor_overviews();
            if overviews.is_empty() {
                println!("No advisors registered.");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec!["ID", "Name", "Commission", "Sales", "Total Commission"]);
            for o in overviews {
                table.add_row(vec![
                    o.advisor_id.to_string(),
                    o.name,
                    percent(o.commission_rate),
                    o.sale_count.to_string(),
                    money(o.total_commission),
                ]);
            }
            println!("{table}");
        }
        AdvisorCommand::Show { id } => {
            let advisor = engine
                .advisor(id)
                .with_context(|| format!("Advisor {id} not found"))?;
            println!("{} (id {}), commission {}", advisor.name, advisor.id, percent(advisor.commission_rate));

            let mut table = Table::new();
            table.set_header(vec!["Sale ID", "Name", "Date", "Amount", "Commission"]);
            for sale in &advisor.sales {
                table.add_row(vec![
                    sale.id.to_string(),
                    sale.name.clone(),
                    sale.date.to_string(),
                    money(sale.amount),
                    money(analytics::commission_for(sale, advisor.commission_rate)),
                ]);
            }
            println!("{table}");
            println!(
                "Total commission: {}",
                money(analytics::total_commission_for_advisor(advisor))
            );
        }
        AdvisorCommand::Update { id, name, rate } => {
            let mut update = AdvisorUpdate::default();
            if let Some(name) = name {
                update = update.name(name);
            }
            if let Some(rate) = rate {
                update = update.commission_rate(parse_rate(&rate)?);
            }
            if update.is_empty() {
                bail!("Nothing to update: pass --name and/or --rate");
            }
            let advisor = engine.update_advisor(id, update)?;
            println!(
                "Advisor {} is now '{}' at {}.",
                advisor.id,
                advisor.name,
                percent(advisor.commission_rate)
            );
        }
        AdvisorCommand::Delete { id, yes } => {
            let name = engine
                .advisor(id)
                .map(|a| a.name.clone())
                .with_context(|| format!("Advisor {id} not found"))?;
            if !confirm(&format!("Delete advisor '{name}' and all of their sales?"), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let removed = engine.delete_advisor(id)?;
            println!("Deleted advisor '{}' and {} sale(s).", removed.name, removed.sales.len());
        }
    }
    Ok(())
}

fn handle_sale(engine: &mut Engine, command: SaleCommand) -> anyhow::Result<()> {
    match command {
        SaleCommand::Add {
            advisor,
            name,
            amount,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let sale = engine.add_sale(advisor, &name, amount, date)?;
            println!(
                "Sale {} '{}' of {} recorded on {}.",
                sale.id,
                sale.name,
                money(sale.amount),
                sale.date
            );
        }
        SaleCommand::List => {
            let entries = engine.sale_entries();
            if entries.is_empty() {
                println!("No sales registered.");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec!["Advisor", "Sale ID", "Name", "Date", "Amount", "Commission"]);
            for e in entries {
                table.add_row(vec![
                    format!("{} ({})", e.advisor_name, e.advisor_id),
                    e.sale.id.to_string(),
                    e.sale.name,
                    e.sale.date.to_string(),
                    money(e.sale.amount),
                    format!("{} ({})", money(e.commission), percent(e.commission_rate)),
                ]);
            }
            println!("{table}");
        }
        SaleCommand::Delete { advisor, sale, yes } => {
            if !confirm(&format!("Delete sale {sale} of advisor {advisor}?"), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let removed = engine.delete_sale(advisor, sale)?;
            println!("Deleted sale {} '{}'.", removed.id, removed.name);
        }
    }
    Ok(())
}

fn handle_report(engine: &Engine, args: &ReportArgs) -> anyhow::Result<()> {
    let report = engine.report(&args.filter.to_filter());
    let summary = engine.summary();

    if args.json {
        let body = serde_json::json!({ "report": report, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_report(&report);
    print_summary(&summary);
    Ok(())
}

fn handle_export(engine: &Engine, args: &ExportArgs, config: &Config) -> anyhow::Result<()> {
    let document = engine.export_csv(&args.filter.to_filter())?;

    if args.stdout {
        print!("{document}");
        return Ok(());
    }

    let (directory, filename) = match &args.output {
        Some(path) => split_output_path(path)?,
        None => (
            config.export.directory.clone(),
            exporter::suggested_filename(Utc::now().date_naive()),
        ),
    };
    let path = exporter::write_document(&directory, &filename, &document)?;
    println!("Report exported to {}", path.display());
    Ok(())
}

// ==============================================================================
// Rendering Helpers
// ==============================================================================

fn print_report(report: &Report) {
    let mut table = Table::new();
    table.set_header(vec!["Advisor", "% Commission", "Total Sales", "Total Commission", "Sales"]);
    for row in &report.rows {
        table.add_row(vec![
            row.name.clone(),
            percent(row.commission_rate),
            money(row.total_sales),
            money(row.total_commission),
            row.count.to_string(),
        ]);
    }
    table.add_row(vec![
        "Grand Total".to_string(),
        String::new(),
        money(report.totals.total_sales),
        money(report.totals.total_commission),
        report.totals.count.to_string(),
    ]);
    println!("{table}");
}

fn print_summary(summary: &Summary) {
    println!("Advisors: {}", summary.advisor_count);
    println!("Sales: {}", summary.total_sale_count);
    println!("Total commissions: {}", money(summary.total_commission_all_time));
}

fn money(value: Decimal) -> String {
    format!("${}", format_money(value))
}

fn percent(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

fn split_output_path(path: &Path) -> anyhow::Result<(PathBuf, String)> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("'{}' is not a file path", path.display()))?
        .to_string();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, filename))
}

/// Asks a yes/no question on the terminal. `assume_yes` skips the prompt.
fn confirm(question: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
