use analytics::{format_percentage, summary_table};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the salesboard application.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Err(e) = handle_serve(&cli.config, args).await {
                eprintln!("Error while serving the dashboard: {e}");
            }
        }
        Commands::Summary(args) => {
            if let Err(e) = handle_summary(&cli.config, args) {
                eprintln!("Error while building the summary: {e}");
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A sales-analytics dashboard: KPIs, rankings and insights over a sales CSV.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "salesboard.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive dashboard.
    Serve(ServeArgs),
    /// Print the KPI summary table for the dataset in the terminal.
    Summary(SummaryArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the configured port.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct SummaryArgs {
    /// Override the configured sales file.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Only include orders on or after this date (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only include orders on or before this date (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(config: &PathBuf, args: ServeArgs) -> anyhow::Result<()> {
    let mut settings = configuration::load_settings(config)?;
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    web_server::run_server(settings).await
}

/// Loads the dataset and prints the formatted KPI summary plus the insight
/// lines, the terminal twin of the dashboard's metric cards.
fn handle_summary(config: &PathBuf, args: SummaryArgs) -> anyhow::Result<()> {
    let settings = configuration::load_settings(config)?;
    let path = args.data.unwrap_or(settings.data.sales_file);

    let table = dataset::load_sales(&path)?;
    let subset: Vec<_> = table
        .into_iter()
        .filter(|sale| {
            args.from.is_none_or(|from| sale.order_date >= from)
                && args.to.is_none_or(|to| sale.order_date <= to)
        })
        .collect();

    let kpis = analytics::calculate_kpis(&subset)?;

    let mut out = Table::new();
    out.load_preset(UTF8_FULL);
    out.set_header(vec!["Metric", "Value"]);
    for row in summary_table(&kpis) {
        out.add_row(vec![row.metric, row.value]);
    }
    println!("{out}");

    let insights = analytics::generate_insights(&subset)?;
    println!("Best category: {}", insights.best_category);
    println!("Best region:   {}", insights.best_region);
    println!("Best product:  {}", insights.best_product);
    println!("Best customer: {}", insights.best_customer);
    println!(
        "Best month: {} / worst month: {} (variation: {})",
        insights.best_month,
        insights.worst_month,
        insights
            .monthly_variation_pct
            .map(format_percentage)
            .unwrap_or_else(|| "N/A".to_string()),
    );

    Ok(())
}
