// rigsim -- emulated Kenwood-style CAT transceiver on a serial port.
//
// Listens for the `IF;` information query and answers with a canned status
// reply, so CAT client code can be exercised without a radio attached.
//
// Usage:
//   rigsim                                   # /dev/ttyUSB1, 57600 baud, 14.175 MHz
//   rigsim --port /dev/pts/4 --baud 38400
//   rigsim --port COM5 --band 40m
//   rigsim --freq 7074000 --skip-invalid -v
//   rigsim --mock                            # scripted exchange, no serial port
//
// A virtual null-modem pair for local testing:
//   socat -d -d pty,raw,echo=0 pty,raw,echo=0

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use rigsim_core::{Band, Transport};
use rigsim_kenwood::protocol::{self, COMMAND_TOKEN};
use rigsim_kenwood::{DecodePolicy, Responder, ResponderBuilder, ResponderStats};
use rigsim_test_harness::MockTransport;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Emulated CAT transceiver answering `IF;` on a serial port.
#[derive(Parser, Debug)]
#[command(name = "rigsim", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB1, /dev/pts/4, COM3).
    #[arg(long, default_value = "/dev/ttyUSB1")]
    port: String,

    /// Baud rate of the serial port.
    #[arg(long, default_value_t = 57_600)]
    baud: u32,

    /// How long one 3-byte read waits before giving up, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// Frequency to report in the IF reply, in Hz (default 14175000).
    #[arg(long, conflicts_with = "band")]
    freq: Option<u64>,

    /// Report a typical frequency on this band instead (e.g. 20m, 40m).
    #[arg(long)]
    band: Option<Band>,

    /// Log and skip windows that are not ASCII instead of exiting.
    #[arg(long)]
    skip_invalid: bool,

    /// Run a scripted exchange against a mock transport instead of a port.
    /// Useful for verifying CLI parsing and builder wiring without hardware.
    #[arg(long)]
    mock: bool,

    /// Enable debug logging (one line per window).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Translate the command line into a responder builder.
    fn builder(&self) -> Result<ResponderBuilder> {
        if self.timeout_ms == 0 {
            bail!("--timeout-ms must be greater than zero");
        }

        let mut builder = ResponderBuilder::new()
            .serial_port(&self.port)
            .baud_rate(self.baud)
            .read_timeout(Duration::from_millis(self.timeout_ms))
            .decode_policy(if self.skip_invalid {
                DecodePolicy::Skip
            } else {
                DecodePolicy::Fatal
            });

        if let Some(freq_hz) = self.freq {
            if Band::from_freq(freq_hz).is_none() {
                tracing::warn!(freq_hz, "frequency is outside the amateur bands");
            }
            builder = builder.frequency(freq_hz);
        } else if let Some(band) = self.band {
            builder = builder.band(band);
        }

        Ok(builder)
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Number of `IF;` queries the mock exchange feeds the responder.
const MOCK_QUERIES: usize = 3;

/// Open the serial port and answer queries until Ctrl-C.
async fn cmd_serve(builder: ResponderBuilder) -> Result<ResponderStats> {
    let mut responder = builder
        .build()
        .await
        .context("failed to open the emulated rig's serial port")?;

    let freq_hz = protocol::parse_status_frequency(&responder.config().response).ok();
    info!(
        port = %responder.config().device_path,
        baud_rate = responder.config().baud_rate,
        freq_hz,
        "emulated rig ready"
    );

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_interrupt(tokio::signal::ctrl_c(), cancel.clone()));

    let stats = responder.run(cancel).await.context("responder stopped")?;
    responder
        .into_transport()
        .close()
        .await
        .context("failed to close the serial port")?;
    Ok(stats)
}

/// Cancel `cancel` once `interrupt` resolves.
///
/// If the signal handler cannot be installed the error is logged and the
/// token is left alone: the responder keeps serving and the process falls
/// back to the default SIGINT behaviour.
async fn cancel_on_interrupt<F>(interrupt: F, cancel: CancellationToken)
where
    F: Future<Output = std::io::Result<()>>,
{
    match interrupt.await {
        Ok(()) => {
            info!("interrupt received, shutting down");
            cancel.cancel();
        }
        Err(e) => error!(error = %e, "failed to listen for Ctrl-C"),
    }
}

/// Drive the responder with a scripted client and print what it sent back.
async fn cmd_mock(builder: ResponderBuilder) -> Result<ResponderStats> {
    let cancel = CancellationToken::new();
    let mut mock = MockTransport::new();
    for _ in 0..MOCK_QUERIES {
        mock.push_bytes(COMMAND_TOKEN);
    }
    mock.cancel_when_drained(cancel.clone());

    let mut responder: Responder<MockTransport> = builder
        .build_with_transport(mock)
        .context("invalid responder configuration")?;
    let stats = responder.run(cancel).await.context("responder stopped")?;

    for reply in responder.transport().sent_data() {
        println!("{}", String::from_utf8_lossy(reply));
    }
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let builder = cli.builder()?;
    let stats = if cli.mock {
        cmd_mock(builder).await?
    } else {
        cmd_serve(builder).await?
    };

    info!(
        responses = stats.responses,
        ignored = stats.ignored,
        idle = stats.idle,
        decode_errors = stats.decode_errors,
        "done"
    );
    Ok(())
}
