//! Point d'entrée CLI pour coordtransform

use anyhow::Result;
use clap::Parser;
use coordtransform_cli::{cmd_convert, cmd_systems, Commands, Config};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Convertir des coordonnées entre WGS-84, GCJ-02, BD-09 et Web Mercator
#[derive(Parser)]
#[command(name = "coordtransform")]
#[command(author, version)]
#[command(about = "Convert coordinates between WGS-84, GCJ-02, BD-09-LL, BD-09-MC and Web Mercator")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Convert(args) => {
            let config = args.apply_to(Config::resolve(args.config.as_deref())?);
            debug!(?config, "Resolved configuration");
            cmd_convert(&args, &config, &mut out)?;
        }
        Commands::Systems => cmd_systems(&mut out)?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    // Les résultats partent sur stdout : les logs restent sur stderr
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (_, 0) => Level::WARN,
        (_, 1) => Level::INFO,
        (_, 2) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
