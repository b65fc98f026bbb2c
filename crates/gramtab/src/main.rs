use clap::Parser;
use gramtab::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = gramtab::run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
