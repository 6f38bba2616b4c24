//! Command-line options shared by the front ends, and log setup.

use std::{fs::File, io, path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Tic-tac-toe with time travel")]
pub struct Args {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log))
    }

    /// Installs the global tracing subscriber.
    ///
    /// `default_file` is used when no `--log-file` was given; `None` means
    /// log to stderr.
    pub fn init_tracing(&self, default_file: Option<PathBuf>) -> io::Result<()> {
        let builder = tracing_subscriber::fmt().with_env_filter(self.env_filter());
        // Don't fail if a subscriber is already installed
        match self.log_file.clone().or(default_file) {
            Some(path) => {
                let log_file = File::create(path)?;
                let _ = builder
                    .with_writer(Arc::new(log_file))
                    .with_ansi(false)
                    .try_init();
            }
            None => {
                let _ = builder.with_writer(io::stderr).try_init();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["ttt"]);
        assert_eq!(args.log, "warn");
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from(["ttt", "--log", "timetoe=debug", "--log-file", "game.log"]);
        assert_eq!(args.log, "timetoe=debug");
        assert_eq!(args.log_file, Some(PathBuf::from("game.log")));
    }
}
