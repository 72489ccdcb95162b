use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use verb_drill::{Cli, Drill};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Cli::parse().into_config();

    if let Err(e) = init_logging(&config.log_file) {
        eprintln!("Could not open log file {}: {}", config.log_file.display(), e);
    }

    if config.list_only {
        match config.source.choices().await {
            Ok(choices) if choices.is_empty() => eprintln!("Nothing to list for this source"),
            Ok(choices) => {
                for (index, choice) in choices.iter().enumerate() {
                    println!("{:3}. {}", index + 1, choice.label);
                }
            }
            Err(e) => {
                eprintln!("Could not list catalog: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let drill = match Drill::from_config(&config).await {
        Ok(drill) => drill,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = drill.run().await {
        eprintln!("Error running drill: {}", e);
        std::process::exit(1);
    }
}

/// Log to a file so the terminal UI stays clean. `RUST_LOG` overrides the
/// default filter.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "verb_drill=info".into()))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();

    Ok(())
}
