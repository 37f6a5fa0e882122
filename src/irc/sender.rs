use std::sync::Arc;

use tracing::info;

use crate::irc::commands::Command;
use crate::irc::connection::{LineWriter, TransportError};

/// Cloneable handle for sending commands over the shared connection.
#[derive(Clone)]
pub struct Sender {
    writer: Arc<LineWriter>,
}

impl Sender {
    pub fn new(writer: LineWriter) -> Self {
        Self {
            writer: Arc::new(writer),
        }
    }

    /// Log the command and put it on the wire.
    pub async fn send(&self, command: Command) -> Result<(), TransportError> {
        let line = command.to_string();
        info!("-> {}", line);
        self.writer.write_line(&line).await
    }

    pub async fn send_user(&self, username: &str, realname: &str) -> Result<(), TransportError> {
        self.send(Command::User {
            username: username.to_string(),
            realname: realname.to_string(),
        })
        .await
    }

    pub async fn send_nick(&self, nick: &str) -> Result<(), TransportError> {
        info!("Changing nick to {}", nick);
        self.send(Command::Nick(nick.to_string())).await
    }

    pub async fn send_join(&self, channel: &str) -> Result<(), TransportError> {
        let command = Command::join(channel);
        if let Command::Join(ref name) = command {
            info!("Joining channel {} ...", name);
        }
        self.send(command).await
    }

    pub async fn send_pong(&self, token: &str) -> Result<(), TransportError> {
        self.send(Command::Pong(token.to_string())).await
    }

    /// Send `QUIT` as the last line and close the connection.
    pub async fn send_quit(&self, reason: &str) -> Result<(), TransportError> {
        let line = Command::Quit(reason.to_string()).to_string();
        info!("-> {}", line);
        self.writer.finish(&line).await
    }

    pub async fn close(&self) -> Result<(), TransportError> {
        self.writer.close().await
    }
}
