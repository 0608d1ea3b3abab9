use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use payreport::config::{
    config_dir, load_config, resolve_output_dir, COUNTERPARTIES_TEMPLATE, CONFIG_TEMPLATE,
    EMPLOYEES_TEMPLATE, PAYMENTS_TEMPLATE,
};
use payreport::render::format_amount;
use payreport::{
    Destination, ExportFormat, Ledger, ReportError, ReportPeriod, ReportService, Result,
};

#[derive(Parser)]
#[command(name = "payreport")]
#[command(version, about = "Payment reports with console, CSV, HTML and PDF export", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.payreport or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files and sample data
    Init,

    /// Show configuration and ledger summary
    Status,

    /// List employees
    Employees,

    /// List counterparties (vendors and clients)
    Counterparties,

    /// Report on one calendar month
    Monthly {
        #[arg(short, long)]
        year: i32,

        /// Month number (1-12)
        #[arg(short, long)]
        month: u32,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Report on one calendar quarter
    Quarterly {
        #[arg(short, long)]
        year: i32,

        /// Quarter number (1-4)
        #[arg(short, long)]
        quarter: u32,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Report on an arbitrary inclusive date range
    Range {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        #[command(flatten)]
        export: ExportArgs,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Output format, can be repeated (default: console)
    #[arg(short, long, value_enum)]
    format: Vec<ExportFormat>,

    /// Output file (default: output_dir/REPORT-<period>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open exported HTML/PDF with system default viewer
    #[arg(long)]
    open: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Employees => cmd_employees(&cfg_dir),
        Commands::Counterparties => cmd_counterparties(&cfg_dir),
        Commands::Monthly {
            year,
            month,
            export,
        } => cmd_report(&cfg_dir, ReportService::monthly_period(year, month)?, &export),
        Commands::Quarterly {
            year,
            quarter,
            export,
        } => cmd_report(&cfg_dir, ReportService::quarterly_period(year, quarter)?, &export),
        Commands::Range { from, to, export } => {
            let period = ReportService::custom_period(parse_date(&from)?, parse_date(&to)?)?;
            cmd_report(&cfg_dir, period, &export)
        }
    }
}

fn parse_date(s: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDate(format!("'{s}' is not a YYYY-MM-DD date")))
}

fn ensure_initialized(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("employees.toml"), EMPLOYEES_TEMPLATE)?;
    fs::write(cfg_dir.join("counterparties.toml"), COUNTERPARTIES_TEMPLATE)?;
    fs::write(cfg_dir.join("payments.toml"), PAYMENTS_TEMPLATE)?;

    println!("Initialized payreport config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set your organization:   $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Add employees:           $EDITOR {}/employees.toml",
        cfg_dir.display()
    );
    println!(
        "  3. Add vendors and clients: $EDITOR {}/counterparties.toml",
        cfg_dir.display()
    );
    println!(
        "  4. Record payments:         $EDITOR {}/payments.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then generate a report:");
    println!("  payreport monthly --year 2024 --month 1 --format console --format csv");

    Ok(())
}

/// Show configuration and ledger summary
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let ledger = Ledger::load(cfg_dir)?;

    println!("Payment Report Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Organization:     {}", config.organization.name);
    println!("Employees:        {}", ledger.employees().len());
    println!("Counterparties:   {}", ledger.counterparties().len());
    println!("Payments:         {}", ledger.payments().len());
    if let Some((first, last)) = ledger.date_span() {
        println!("Ledger span:      {} to {}", first, last);
    }
    println!(
        "Output directory: {}",
        resolve_output_dir(&config.report.output_dir, cfg_dir).display()
    );
    println!("PDF converter:    {}", config.pdf.converter);

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DEPARTMENT")]
    department: String,
}

#[derive(Tabled)]
struct CounterpartyRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "TYPE")]
    party_type: String,
    #[tabled(rename = "MOBILE")]
    mobile: String,
}

/// List employees
fn cmd_employees(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let ledger = Ledger::load(cfg_dir)?;

    let employees = ledger.employees();
    if employees.is_empty() {
        println!("No employees configured.");
        println!("Add employees to: {}/employees.toml", cfg_dir.display());
        return Ok(());
    }

    let rows: Vec<EmployeeRow> = employees
        .iter()
        .map(|e| EmployeeRow {
            id: e.id,
            name: e.name.clone(),
            department: e.department.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List counterparties
fn cmd_counterparties(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let ledger = Ledger::load(cfg_dir)?;

    let counterparties = ledger.counterparties();
    if counterparties.is_empty() {
        println!("No counterparties configured.");
        println!(
            "Add counterparties to: {}/counterparties.toml",
            cfg_dir.display()
        );
        return Ok(());
    }

    let rows: Vec<CounterpartyRow> = counterparties
        .iter()
        .map(|c| CounterpartyRow {
            id: c.id,
            name: c.name.clone(),
            party_type: c.party_type.to_string(),
            mobile: c.mobile.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Pick where one format goes given the user's `--output`
fn destination_for(
    format: ExportFormat,
    period: &ReportPeriod,
    output: Option<&Path>,
    format_count: usize,
    output_dir: &Path,
) -> Destination {
    match (format, output) {
        (ExportFormat::Console, None) => Destination::Stdout,
        (_, Some(path)) if format_count == 1 => Destination::File(path.to_path_buf()),
        (_, Some(path)) => Destination::File(path.with_extension(format.extension())),
        (_, None) => Destination::File(
            output_dir.join(format!("{}.{}", period.file_stem(), format.extension())),
        ),
    }
}

/// Compute a report and export it in every requested format
fn cmd_report(cfg_dir: &Path, period: ReportPeriod, args: &ExportArgs) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let ledger = Ledger::load(cfg_dir)?;
    let service = ReportService::new(&ledger, &ledger, &config);

    let report = service.generate_report(&period)?;

    let mut formats: Vec<ExportFormat> = Vec::new();
    for format in &args.format {
        if !formats.contains(format) {
            formats.push(*format);
        }
    }
    if formats.is_empty() {
        formats.push(ExportFormat::Console);
    }

    let output_dir = resolve_output_dir(&config.report.output_dir, cfg_dir);
    let mut saved: Vec<(ExportFormat, PathBuf)> = Vec::new();

    for format in &formats {
        let destination = destination_for(
            *format,
            &period,
            args.output.as_deref(),
            formats.len(),
            &output_dir,
        );
        service.export(&report, *format, &destination)?;
        if let Destination::File(path) = destination {
            saved.push((*format, path));
        }
    }

    if !saved.is_empty() {
        println!("Generated {}", period.title());
        println!("  Transactions: {}", report.transaction_count);
        println!(
            "  Net balance:  {}{}",
            config.report.currency_symbol,
            format_amount(report.net_balance)
        );
        for (_, path) in &saved {
            println!("  Saved:        {}", path.display());
        }
    }

    if args.open {
        for (format, path) in &saved {
            if matches!(format, ExportFormat::Html | ExportFormat::Pdf) {
                open_path(path)?;
            }
        }
    }

    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
