use anyhow::{bail, Context, Result};
use barpipe_shared_util::{
    paths::BarpipePaths,
    wake::{read_pid_file, WAKE_SIGNAL},
};
use itertools::Itertools;
use nix::sys::signal;

use crate::{aggregator, liveness, opts::Action};

/// Handle the CLI actions that talk to an already-running deployment instead
/// of starting one.
pub fn handle_client_action(paths: &BarpipePaths, action: Action) -> Result<()> {
    match action {
        Action::Wake => {
            let pid = read_pid_file(paths.daemon_pid_file())
                .with_context(|| format!("No running aggregator found ({})", paths.daemon_pid_file().display()))?;
            signal::kill(pid, WAKE_SIGNAL).with_context(|| format!("Failed to signal the aggregator (pid {})", pid))?;
            println!("woke aggregator (pid {})", pid);
        }

        Action::Services => {
            let live = liveness::scan(paths.spool_dir())?;
            if live.is_empty() {
                println!("no live services in {}", paths.spool_dir().display());
            } else {
                let listing = live
                    .iter()
                    .map(|(service, pid)| {
                        let state = if paths.block_file_for(service).exists() { "" } else { "  (no block yet)" };
                        format!("{}\t{}{}", service, pid, state)
                    })
                    .join("\n");
                println!("{}", listing);
            }
        }

        Action::Signal { service, signal: producer_signal } => {
            let live = liveness::scan(paths.spool_dir())?;
            let Some(pid) = live.get(&service) else {
                bail!("service {} is not registered, or not live", service);
            };
            signal::kill(*pid, producer_signal.as_signal())
                .with_context(|| format!("Failed to signal service {} (pid {})", service, pid))?;
            println!("sent {:?} to {} (pid {})", producer_signal.as_signal(), service, pid);
        }

        Action::Frame => {
            let frame = aggregator::build_frame(paths.spool_dir())?;
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }

        Action::Daemon { .. } | Action::ShellCompletions { .. } => unreachable!(),
    }
    Ok(())
}
