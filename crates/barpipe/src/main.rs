use std::time::Duration;

use anyhow::{Context, Result};
use barpipe_shared_util::paths::BarpipePaths;
use clap::CommandFactory as _;

mod aggregator;
mod client;
mod liveness;
mod opts;
mod protocol;
mod server;

fn main() {
    let opts: opts::Opt = opts::Opt::from_env();

    let log_level_filter = if opts.log_debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init_timed();
    } else {
        pretty_env_logger::formatted_timed_builder()
            .filter(Some("barpipe"), log_level_filter)
            .filter(Some("barpipe_shared_util"), log_level_filter)
            .init();
    }

    if let opts::Action::ShellCompletions { shell } = opts.action {
        clap_complete::generate(shell, &mut opts::RawOpt::command(), "barpipe", &mut std::io::stdout());
        return;
    }

    if let Err(err) = run(opts) {
        log::error!("{:?}", err);
        std::process::exit(1);
    }
}

fn run(opts: opts::Opt) -> Result<()> {
    let paths = opts.base_dir.map(BarpipePaths::from_base_dir).unwrap_or_else(BarpipePaths::default);

    match opts.action {
        opts::Action::ShellCompletions { .. } => unreachable!(),
        opts::Action::Daemon { interval } => {
            log::info!("Initializing barpipe daemon. ({})", paths);
            server::initialize_server(paths, Duration::from_secs(interval))
                .context("Failed to run the barpipe daemon")
        }
        action => client::handle_client_action(&paths, action),
    }
}
