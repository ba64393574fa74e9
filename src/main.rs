use clap::Parser;
use field_autofill::cli::commands::{cmd_fill, cmd_mappings, cmd_scan};
use field_autofill::cli::config::{Cli, Commands, Target, load_config, resolve_mappings_path};
use field_autofill::store::mapping_store::JsonFileStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let store = JsonFileStore::new(resolve_mappings_path(cli.mappings.as_deref(), &config));

    match cli.command {
        Commands::Scan {
            url,
            fixture,
            format,
        } => {
            let target = Target::from_args(url, fixture)?;
            cmd_scan(&target, &format, &config, &store)?;
        }
        Commands::Fill {
            url,
            fixture,
            dry_run,
        } => {
            let target = Target::from_args(url, fixture)?;
            cmd_fill(&target, dry_run, &config, &store)?;
        }
        Commands::Mappings { action } => {
            cmd_mappings(&action, &store)?;
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise each -v raises the level from warn.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
