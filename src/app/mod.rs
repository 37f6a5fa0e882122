//! The bot itself: startup registration, the read loop, the two background
//! sequences and shutdown, all driven from one context object.

pub mod event;
pub mod join;
pub mod lifecycle;
pub mod rotation;

use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::config::BotConfig;
use crate::irc::connection::{LineReader, LineWriter};
use crate::irc::dispatcher::Dispatcher;
use crate::irc::sender::Sender;

pub use event::{AppEvent, EventSender, ShutdownReason};

/// Everything a running bot needs, built once at startup and handed to each
/// component that uses it.
pub struct Bot {
    config: Arc<BotConfig>,
    sender: Sender,
    rng: StdRng,
    event_tx: EventSender,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl Bot {
    pub fn new(config: BotConfig, writer: LineWriter) -> Self {
        Self::with_rng(config, writer, StdRng::seed_from_u64(rand::random()))
    }

    /// Use a specific random source for collision nicknames.
    pub fn with_rng(config: BotConfig, writer: LineWriter, rng: StdRng) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            config: Arc::new(config),
            sender: Sender::new(writer),
            rng,
            event_tx,
            event_rx,
        }
    }

    /// Handle for delivering events (signals, in practice) to the main loop.
    pub fn events(&self) -> EventSender {
        self.event_tx.clone()
    }

    /// Register, run until shutdown is requested, then QUIT.
    ///
    /// Returns an error without sending QUIT when the connection fails.
    pub async fn run(self, mut reader: LineReader) -> Result<ShutdownReason> {
        let Bot {
            config,
            sender,
            rng,
            event_tx,
            mut event_rx,
        } = self;

        let identity = &config.identity;
        sender.send_user(&identity.username, &identity.realname).await?;

        let rotation = tokio::spawn(rotation::run(config.clone(), sender.clone(), event_tx.clone()));
        let joiner = tokio::spawn(join::run(config.clone(), sender.clone(), event_tx));

        let mut dispatcher = Dispatcher::new(sender.clone(), rng);
        let outcome = loop {
            tokio::select! {
                biased;

                Some(event) = event_rx.recv() => match event {
                    AppEvent::Shutdown(reason) => break Ok(reason),
                    AppEvent::Fatal(e) => break Err(e),
                },
                line = reader.read_line() => {
                    let handled = match line {
                        Ok(line) => dispatcher.handle_line(&line).await,
                        Err(e) => Err(e),
                    };
                    if let Err(e) = handled {
                        break Err(e.into());
                    }
                }
            }
        };

        rotation.abort();
        joiner.abort();

        let reason = outcome?;
        lifecycle::shutdown(&sender, &config.quit_message, reason).await;
        Ok(reason)
    }
}
