use clap::Parser;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use urlmon_cli::cli::Args;
use urlmon_cli::output::{save_outputs, write_report};
use urlmon_cli::pipeline::{run_monitor, MonitorOptions};
use urlmon_common::Result;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries the "Wrote:" lines.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();

    if let Err(e) = run(&args).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    let options = MonitorOptions {
        timeout: args.timeout,
        strict: args.strict,
    };
    let run = run_monitor(&args.input, &options).await?;

    match &args.out_dir {
        Some(out_dir) => {
            let source = args.input.display().to_string();
            let paths = save_outputs(out_dir, &source, &run)?;
            println!("Wrote: {}", paths.report.display());
            println!("Wrote: {}", paths.results.display());
        }
        None => {
            write_report(&args.out, &run.report)?;
            println!("Wrote: {}", args.out.display());
        }
    }

    Ok(())
}
