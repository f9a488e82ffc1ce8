use std::path::PathBuf;

use barpipe_shared_util::ServiceId;
use clap::{Parser, Subcommand, ValueEnum};
use nix::sys::signal::Signal;

/// Struct that gets generated from `RawOpt`.
#[derive(Debug, PartialEq)]
pub struct Opt {
    pub log_debug: bool,
    pub base_dir: Option<PathBuf>,
    pub action: Action,
}

#[derive(Parser, Debug, PartialEq)]
#[command(name = "barpipe", version, about)]
pub struct RawOpt {
    /// Write out debug logs.
    #[arg(long = "debug", global = true)]
    log_debug: bool,

    /// Override the runtime base directory (the one containing the spool).
    #[arg(long = "base-dir", global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Action {
    /// Run the aggregator, feeding the status-bar host on stdout.
    #[command(name = "daemon", alias = "d")]
    Daemon {
        /// Poll interval, in seconds.
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },

    /// Ask a running aggregator to re-emit a frame immediately.
    #[command(name = "wake", alias = "w")]
    Wake,

    /// List the live services registered in the spool.
    #[command(name = "services")]
    Services,

    /// Send a signal to a producer, by service id.
    #[command(name = "signal")]
    Signal {
        /// Service id of the producer (as shown by `barpipe services`).
        service: ServiceId,

        /// The signal to deliver.
        #[arg(short, long, value_enum, default_value = "usr1")]
        signal: ProducerSignal,
    },

    /// Build one aggregated frame from the spool and print it.
    #[command(name = "frame")]
    Frame,

    /// Prints shell completions for barpipe.
    ShellCompletions {
        #[arg(short, long)]
        shell: clap_complete::shells::Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerSignal {
    Usr1,
    Usr2,
    Term,
}

impl ProducerSignal {
    pub fn as_signal(self) -> Signal {
        match self {
            ProducerSignal::Usr1 => Signal::SIGUSR1,
            ProducerSignal::Usr2 => Signal::SIGUSR2,
            ProducerSignal::Term => Signal::SIGTERM,
        }
    }
}

impl Opt {
    pub fn from_env() -> Self {
        let raw: RawOpt = RawOpt::parse();
        raw.into()
    }
}

impl From<RawOpt> for Opt {
    fn from(other: RawOpt) -> Self {
        let RawOpt { log_debug, base_dir, action } = other;
        Opt { log_debug, base_dir, action }
    }
}
