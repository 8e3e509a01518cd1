// termcheck-core/src/bin/termcheck.rs

use anyhow::{Context, Result};
use termcheck_core::{Exerciser, Outcome, Script};
use termcheck_io::{SerialChannel, SerialConfig, scan_ports};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    eprintln!("[termcheck] starting…");

    let config = SerialConfig::default();
    let exerciser = Exerciser::new(Script::ansi_demo());

    let outcome = exerciser
        .run(|| SerialChannel::open(&config))
        .await
        .context("terminal exercise failed")?;

    match outcome {
        Outcome::Completed(report) => {
            eprintln!(
                "[termcheck] done: {} writes, {} bytes",
                report.units_written, report.bytes_written
            );
        }
        // No terminal on this rig: report it and exit cleanly.
        Outcome::ChannelUnavailable { reason } => {
            eprintln!("[termcheck] Failed to open uart: {}", reason);
            match scan_ports() {
                Ok(ports) if ports.is_empty() => eprintln!("[termcheck] no serial ports found"),
                Ok(ports) => eprintln!("[termcheck] serial ports present: {}", ports.join(", ")),
                Err(e) => tracing::warn!("{}", e),
            }
        }
    }

    Ok(())
}
