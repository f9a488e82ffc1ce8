use std::{fs, time::Duration};

use anyhow::{bail, Context, Result};
use barpipe_shared_util::{atomic::write_atomic, paths::BarpipePaths, wake};
use nix::unistd::Pid;
use once_cell::sync::Lazy;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    signal::unix::{signal, SignalKind},
    sync::broadcast,
};

use crate::{
    aggregator, liveness,
    protocol::{self, FeedWriter, Header},
};

/// How long one cycle waits for input from the bar host before polling anyway.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

static EXIT: Lazy<broadcast::Sender<()>> = Lazy::new(|| broadcast::channel(2).0);

/// Set up the runtime directories and the signal handlers, then run the
/// aggregation loop until the bar host goes away or we are told to stop.
pub fn initialize_server(paths: BarpipePaths, interval: Duration) -> Result<()> {
    paths
        .create()
        .with_context(|| format!("Failed to create runtime directories ({})", paths))?;

    if let Some(pid) = wake::read_pid_file(paths.daemon_pid_file()) {
        if pid != Pid::this() && liveness::pid_is_live(pid) {
            bail!("barpipe daemon already running (pid {})", pid);
        }
    }

    // Subscribe before installing the handler so a termination signal that
    // arrives during startup is buffered rather than lost.
    let exit = EXIT.subscribe();
    simple_signal::set_handler(&[simple_signal::Signal::Int, simple_signal::Signal::Term], move |_| {
        log::info!("Shutting down barpipe daemon...");
        let _ = EXIT.send(());
    });

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to initialize tokio runtime")?;
    let result = rt.block_on(run_loop(&paths, interval, exit));

    if let Err(err) = fs::remove_file(paths.daemon_pid_file()) {
        log::debug!("could not remove the aggregator pid file: {}", err);
    }
    result
}

async fn run_loop(paths: &BarpipePaths, interval: Duration, mut exit: broadcast::Receiver<()>) -> Result<()> {
    // The wake signal is consumed as a stream: deliveries coalesce, and the
    // handler itself does no work beyond making `recv` ready. It must exist
    // before the pid file does, or the first wake would hit the default
    // signal disposition.
    let mut wake_signal =
        signal(SignalKind::user_defined1()).context("Failed to install the wake signal handler")?;
    write_atomic(paths.daemon_pid_file(), std::process::id().to_string())
        .context("Failed to register the aggregator pid file")?;

    let stdout = std::io::stdout();
    let mut feed = FeedWriter::new(stdout.lock());
    feed.write_header(&Header::default())?;
    feed.write_preamble()?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        // Drain at most one line from the bar host; a silent host must not
        // stall the poll cadence.
        match tokio::time::timeout(READ_TIMEOUT, input.next_line()).await {
            Err(_) => {}
            Ok(Ok(None)) => {
                log::info!("bar host closed stdin, exiting");
                break;
            }
            Ok(Ok(Some(line))) => {
                if let Some(event) = protocol::decode_input_line(&line) {
                    log::debug!("discarding click event: {:?}", event);
                }
            }
            Ok(Err(err)) => log::warn!("failed to read from bar host: {}", err),
        }

        match aggregator::build_frame(paths.spool_dir()) {
            Ok(frame) => feed.write_frame(&frame).context("Failed to write frame to the bar host")?,
            Err(err) => log::warn!("skipping this frame: {:?}", err),
        }

        tokio::select! {
            _ = wake_signal.recv() => log::debug!("woken for an early cycle"),
            _ = tokio::time::sleep(interval) => {}
            _ = exit.recv() => break,
        }
    }
    Ok(())
}
