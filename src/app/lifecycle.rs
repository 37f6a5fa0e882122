//! Shutdown: signal handling and the final QUIT.

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::app::event::{AppEvent, EventSender, ShutdownReason};
use crate::irc::sender::Sender;

/// Turn SIGINT/SIGTERM into a shutdown request on the event channel.
pub fn spawn_signal_watcher(events: EventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match wait_for_signal().await {
            Ok(()) => AppEvent::Shutdown(ShutdownReason::Signal),
            Err(e) => AppEvent::Fatal(anyhow::Error::new(e).context("Failed to listen for signals")),
        };
        let _ = events.send(event);
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = interrupt.recv() => info!("Received SIGINT"),
        _ = terminate.recv() => info!("Received SIGTERM"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl-C");
    Ok(())
}

/// Say goodbye and close the connection. Errors are logged, not returned:
/// the process is exiting either way.
pub async fn shutdown(sender: &Sender, quit_message: &str, reason: ShutdownReason) {
    info!("Disconnecting: {}", reason);
    if let Err(e) = sender.send_quit(quit_message).await {
        warn!("Failed to send QUIT: {}", e);
        if let Err(e) = sender.close().await {
            warn!("Failed to close connection: {}", e);
        }
    }
}
