use std::fmt;

use tokio::sync::mpsc;
use tracing::debug;

use crate::irc::connection::TransportError;

/// Why the bot is leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Every nickname in the list has been claimed.
    NicksExhausted,
    /// SIGINT or SIGTERM.
    Signal,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::NicksExhausted => write!(f, "end of nick list"),
            ShutdownReason::Signal => write!(f, "termination signal"),
        }
    }
}

/// Messages from background tasks to the main loop.
#[derive(Debug)]
pub enum AppEvent {
    Shutdown(ShutdownReason),
    /// A background task hit an unrecoverable error.
    Fatal(anyhow::Error),
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Hand a background task's send failure to the main loop.
///
/// `Closed` only happens once shutdown has started, so it is not reported.
pub fn report_send_error(events: &EventSender, task: &str, err: TransportError) {
    match err {
        TransportError::Closed => debug!(task, "Connection closed, stopping"),
        err => {
            let _ = events.send(AppEvent::Fatal(
                anyhow::Error::new(err).context(format!("{} failed to send", task)),
            ));
        }
    }
}
