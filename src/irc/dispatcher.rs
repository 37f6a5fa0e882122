//! Per-line reaction to server traffic.

use rand::rngs::StdRng;
use tracing::info;

use crate::irc::commands::Command;
use crate::irc::connection::TransportError;
use crate::irc::nickname::{generate_nickname, NICK_LEN};
use crate::irc::reply::{self, Reply};
use crate::irc::sender::Sender;

pub struct Dispatcher {
    sender: Sender,
    rng: StdRng,
}

impl Dispatcher {
    pub fn new(sender: Sender, rng: StdRng) -> Self {
        Self { sender, rng }
    }

    /// React to one inbound line.
    ///
    /// The numeric check and the PING check are independent; both run on
    /// every line.
    pub async fn handle_line(&mut self, line: &str) -> Result<(), TransportError> {
        match reply::classify(line) {
            Reply::NickRejected(code) => {
                let nick = generate_nickname(&mut self.rng, NICK_LEN);
                info!(code, "Nickname refused, retrying with {}", nick);
                self.sender.send(Command::Nick(nick)).await?;
            }
            Reply::Motd(_) => {}
            Reply::Numeric(_) | Reply::Other => info!("<- {}", line),
        }

        if reply::is_ping(line) {
            self.sender.send_pong(reply::extract_ping_token(line)).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irc::connection::LineWriter;
    use crate::logging::capture::capture;
    use rand::SeedableRng;
    use tokio::io::{duplex, AsyncReadExt, DuplexStream};

    fn dispatcher() -> (Dispatcher, Sender, DuplexStream) {
        let (client, server) = duplex(4096);
        let sender = Sender::new(LineWriter::new(client));
        let dispatcher = Dispatcher::new(sender.clone(), StdRng::seed_from_u64(3));
        (dispatcher, sender, server)
    }

    /// Close the writer and collect everything that reached the wire.
    async fn sent_lines(sender: &Sender, mut server: DuplexStream) -> Vec<String> {
        sender.close().await.unwrap();
        let mut out = String::new();
        server.read_to_string(&mut out).await.unwrap();
        out.lines().map(str::to_string).collect()
    }

    #[tokio::test]
    async fn test_ping_gets_pong() {
        let (mut dispatcher, sender, server) = dispatcher();
        dispatcher.handle_line("PING :abc123").await.unwrap();
        assert_eq!(sent_lines(&sender, server).await, vec!["PONG :abc123"]);
    }

    #[tokio::test]
    async fn test_ping_without_colon_does_not_panic() {
        let (mut dispatcher, sender, server) = dispatcher();
        dispatcher.handle_line("PING").await.unwrap();
        dispatcher.handle_line("PING srv.example").await.unwrap();
        assert_eq!(
            sent_lines(&sender, server).await,
            vec!["PONG :", "PONG :srv.example"]
        );
    }

    #[tokio::test]
    async fn test_nick_in_use_sends_random_nick() {
        let (mut dispatcher, sender, server) = dispatcher();
        dispatcher
            .handle_line(":server.example 433 * :Nickname is already in use")
            .await
            .unwrap();

        let lines = sent_lines(&sender, server).await;
        assert_eq!(lines.len(), 1);
        let nick = lines[0].strip_prefix("NICK ").unwrap();
        assert_eq!(nick.len(), 8);
        assert!(nick.chars().all(|c| "aeiouAEIOU".contains(c)), "{}", nick);
    }

    #[tokio::test]
    async fn test_not_registered_and_bad_password_also_retry() {
        let (mut dispatcher, sender, server) = dispatcher();
        dispatcher.handle_line(":srv 451 * :You have not registered").await.unwrap();
        dispatcher.handle_line(":srv 464 * :Password incorrect").await.unwrap();

        let lines = sent_lines(&sender, server).await;
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with("NICK ")));
    }

    #[tokio::test]
    async fn test_motd_and_plain_lines_send_nothing() {
        let (mut dispatcher, sender, server) = dispatcher();
        for line in [
            ":server.example 375 :- message of the day -",
            ":server.example 372 :- hello",
            ":server.example 376 :End of /MOTD command.",
            ":server.example 001 me :Welcome",
            ":nick!user@host PRIVMSG #chan :hi there",
            "NOTICE AUTH :*** Looking up your hostname",
            "ERROR :Closing link",
            "",
        ] {
            dispatcher.handle_line(line).await.unwrap();
        }
        assert!(sent_lines(&sender, server).await.is_empty());
    }

    #[tokio::test]
    async fn test_motd_is_silent_and_other_lines_are_logged() {
        let (logs, _guard) = capture();
        let (mut dispatcher, _sender, _server) = dispatcher();

        dispatcher
            .handle_line(":server.example 375 :- message of the day -")
            .await
            .unwrap();
        dispatcher.handle_line(":server.example 372 :- hello").await.unwrap();
        assert_eq!(logs.contents(), "");

        dispatcher.handle_line("NOTICE AUTH :hello").await.unwrap();
        dispatcher.handle_line(":server.example 001 me :Welcome").await.unwrap();
        let out = logs.contents();
        assert!(out.contains("<- NOTICE AUTH :hello"), "{}", out);
        assert!(out.contains("<- :server.example 001 me :Welcome"), "{}", out);
        assert!(!out.contains("375"), "{}", out);
    }

    #[tokio::test]
    async fn test_replies_are_logged_as_sent() {
        let (logs, _guard) = capture();
        let (mut dispatcher, _sender, _server) = dispatcher();

        dispatcher.handle_line("PING :abc123").await.unwrap();
        let out = logs.contents();
        assert!(out.contains("-> PONG :abc123"), "{}", out);
        assert!(out.contains("<- PING :abc123"), "{}", out);
    }

    #[tokio::test]
    async fn test_nick_collision_logs_once() {
        let (logs, _guard) = capture();
        let (mut dispatcher, _sender, _server) = dispatcher();

        dispatcher.handle_line(":srv 433 * alice :in use").await.unwrap();
        let out = logs.contents();
        assert_eq!(out.matches("Nickname refused").count(), 1, "{}", out);
        assert!(!out.contains("Changing nick"), "{}", out);
        assert_eq!(out.matches("-> NICK ").count(), 1, "{}", out);
    }

    #[tokio::test]
    async fn test_send_after_close_reports_closed() {
        let (mut dispatcher, sender, _server) = dispatcher();
        sender.close().await.unwrap();
        assert!(matches!(
            dispatcher.handle_line("PING :late").await,
            Err(TransportError::Closed)
        ));
    }
}
