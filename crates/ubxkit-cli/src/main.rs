//! ubxconf: configure and query u-blox GNSS receivers.
//!
//! # Usage
//!
//! ```bash
//! # Run a configuration script against a receiver behind a TCP-serial bridge
//! ubxconf -r 192.168.1.50:23 -e receiver.cmd
//!
//! # Decode a captured binary stream
//! ubxconf -d capture.ubx
//! cat capture.ubx | ubxconf -d -
//! ```
//!
//! Exit code 0 on success, 1 when the idle timeout fires, the underlying OS
//! error code when the connection or the event loop fails.

mod dump;
mod exec;

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::exec::{ExecError, Outcome};

/// Default TCP port of serial-over-telnet bridges.
const DEFAULT_PORT: u16 = 23;

/// u-blox receiver configuration tool
#[derive(Parser, Debug)]
#[command(name = "ubxconf")]
#[command(about = "Configure and query u-blox GNSS receivers over the UBX protocol")]
#[command(version)]
struct Args {
    /// Remote receiver endpoint, host[:port]
    #[arg(short = 'r', long = "remote")]
    remote: Option<String>,

    /// Script of !UBX / hex command lines to execute
    #[arg(short = 'e', long = "exec", requires = "remote")]
    exec: Option<PathBuf>,

    /// Decode a binary UBX dump from a file, or '-' for stdin
    #[arg(short = 'd', long = "dump", conflicts_with = "remote")]
    dump: Option<String>,

    /// Idle timeout in seconds; 0 disables the timeout
    #[arg(short = 't', long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

    debug_assert!(ubxkit_proto::tables::tables_are_sorted());

    if let Some(path) = &args.dump {
        return match dump::run(path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("dump failed: {e}");
                os_exit_code(&e)
            },
        };
    }

    let Some(remote) = &args.remote else {
        tracing::error!("nothing to do: pass -r host[:port] or -d file");
        return ExitCode::FAILURE;
    };
    let addr = with_default_port(remote);

    match exec::run(&addr, args.exec.as_deref(), args.timeout).await {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::TimedOut) => ExitCode::FAILURE,
        Err(ExecError::Io(e)) => {
            tracing::error!("session failed: {e}");
            os_exit_code(&e)
        },
        Err(e) => {
            tracing::error!("session failed: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Append the default port when the endpoint has none.
fn with_default_port(remote: &str) -> String {
    if remote.contains(':') {
        remote.to_owned()
    } else {
        format!("{remote}:{DEFAULT_PORT}")
    }
}

/// The OS error code as an exit code, or failure when there is none.
fn os_exit_code(e: &std::io::Error) -> ExitCode {
    e.raw_os_error().map_or(ExitCode::FAILURE, |code| ExitCode::from((code & 0xFF) as u8))
}
