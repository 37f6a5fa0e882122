//! Nick rotation: claim each configured nickname in turn, then leave.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::app::event::{report_send_error, AppEvent, EventSender, ShutdownReason};
use crate::config::BotConfig;
use crate::irc::sender::Sender;

pub async fn run(config: Arc<BotConfig>, sender: Sender, events: EventSender) {
    info!("Starting nicks...");
    let interval = Duration::from_secs(config.timing.nick_interval_secs);

    for nick in &config.nicklist {
        if let Err(e) = sender.send_nick(nick).await {
            report_send_error(&events, "nick rotation", e);
            return;
        }
        tokio::time::sleep(interval).await;
    }

    info!("End of nicks");
    let _ = events.send(AppEvent::Shutdown(ShutdownReason::NicksExhausted));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irc::connection::{LineReader, LineWriter};
    use tokio::io::duplex;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_rotation_sends_each_nick_then_requests_shutdown() {
        let (client, server) = duplex(1024);
        let sender = Sender::new(LineWriter::new(client));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let config = Arc::new(BotConfig::for_test(&["alice", "bob"], &[]));

        let start = Instant::now();
        let task = tokio::spawn(run(config, sender, tx));
        let mut reader = LineReader::new(server);

        assert_eq!(reader.read_line().await.unwrap(), "NICK alice");
        assert!(start.elapsed() < Duration::from_secs(1));

        assert_eq!(reader.read_line().await.unwrap(), "NICK bob");
        assert!(start.elapsed() >= Duration::from_secs(30));

        match rx.recv().await {
            Some(AppEvent::Shutdown(reason)) => assert_eq!(reason, ShutdownReason::NicksExhausted),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(start.elapsed() >= Duration::from_secs(60));
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_nicklist_shuts_down_immediately() {
        let (client, _server) = duplex(1024);
        let sender = Sender::new(LineWriter::new(client));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let config = Arc::new(BotConfig::for_test(&[], &["foo"]));

        let start = Instant::now();
        run(config, sender, tx).await;

        assert!(matches!(
            rx.recv().await,
            Some(AppEvent::Shutdown(ShutdownReason::NicksExhausted))
        ));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_closed_connection_stops_quietly() {
        let (client, _server) = duplex(1024);
        let sender = Sender::new(LineWriter::new(client));
        sender.close().await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let config = Arc::new(BotConfig::for_test(&["alice"], &[]));

        run(config, sender, tx).await;
        assert!(rx.recv().await.is_none());
    }
}
