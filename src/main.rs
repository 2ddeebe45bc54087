use clap::Parser;
use tracing_subscriber::EnvFilter;

use blockdex::build::run_build;
use blockdex::error::Result;

mod cli;
use cli::display::{colors_enabled, set_output, Output};
use cli::{resolve_artifact_names, resolve_config, Cli, Commands};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let ansi = colors_enabled(
        std::env::var_os("NO_COLOR").is_some(),
        Output::Stderr.is_terminal(),
    );
    // progress bars and the build summary share stderr with the log
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Index {
            root,
            pattern,
            content_dir,
            output,
            config,
            ..
        } => {
            set_output(Output::Stderr);
            let config = resolve_config(config.as_ref(), root, pattern, content_dir, output)?;
            match run_build(&config)? {
                Some(report) => cli::summary::print_build_summary(&report),
                None => cli::summary::print_empty_corpus(),
            }
            Ok(())
        }
        Commands::Inspect {
            dir,
            config,
            index_file,
            meta_file,
            ..
        } => {
            let (index_file, meta_file) =
                resolve_artifact_names(config.as_ref(), index_file, meta_file)?;
            cli::inspect::run_inspect(&dir, &index_file, &meta_file)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.log_level());

    if let Err(e) = run(cli.command) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
