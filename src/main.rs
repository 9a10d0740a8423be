use colored::Colorize;
use json_dart_gen::cli::CommandLineInterface;
use tracing_subscriber::EnvFilter;

fn main() {
    let command_line_interface = CommandLineInterface::load();

    // RUST_LOG wins over -v
    let default_level = if command_line_interface.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
