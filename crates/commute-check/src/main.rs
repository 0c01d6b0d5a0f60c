use anyhow::Result;
use chrono::Local;
use clap::Parser;
use shared::checks::gather;
use shared::{BriefingGenerator, Config, EmailNotifier};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "commute-check")]
#[command(about = "Check the Red Line, Bus 1 and M2 shuttle and email a morning briefing")]
struct Args {
    /// Print the briefing without sending it
    #[arg(long)]
    dry_run: bool,

    /// Leave the flight news section out
    #[arg(long)]
    skip_flights: bool,

    /// Comma-separated recipients (overrides EMAIL_TO)
    #[arg(long)]
    to: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = Config::from_env();

    // 1. Gather
    if args.skip_flights {
        println!("🔎 Checking MBTA and M2 Shuttle...");
    } else {
        println!("🔎 Checking flights, MBTA and M2 Shuttle...");
    }
    let sections = gather(&config, args.skip_flights).await;

    // 2. Build
    let today = Local::now().date_naive();
    let briefing = BriefingGenerator::generate(
        &sections.transit,
        &sections.shuttle,
        sections.flights.as_deref(),
        today,
    );

    println!("\n{}\n", briefing.subject);
    println!("{}", briefing.body);

    if args.dry_run {
        println!("📝 Dry run, email not sent.");
        return Ok(());
    }

    // 3. Deliver
    let notifier = match EmailNotifier::from_config(&config, args.to.as_deref()) {
        Ok(notifier) => notifier,
        Err(e) => {
            error!(error = %e, "Cannot send briefing");
            println!("❌ Email not sent: {}", e);
            return Ok(());
        }
    };

    match notifier.send(&briefing).await {
        Ok(()) => println!("✅ Email sent to {} people!", notifier.recipients().len()),
        Err(e) => {
            error!(error = %e, "Briefing email failed");
            println!("❌ Email failed: {}", e);
        }
    }

    Ok(())
}
