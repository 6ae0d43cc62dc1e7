use clap::Parser;
use tallychart::app;
use tallychart::cli::Cli;
use tallychart::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let output = app::run(&Config::from(cli))?;
    println!("Wrote {}", output.display());
    Ok(())
}
