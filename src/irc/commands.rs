//! Outbound IRC commands.
//!
//! The bot only ever emits a handful of commands. Each [`Command`] renders to
//! its exact wire text (without the CRLF terminator, which the transport
//! adds).

use std::fmt;

/// An outbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    User { username: String, realname: String },
    Nick(String),
    Join(String),
    Pong(String),
    Quit(String),
}

impl Command {
    /// Build a `JOIN`, adding the `#` prefix unless the name already has one.
    pub fn join(channel: &str) -> Self {
        let channel = channel.trim();
        if channel.starts_with('#') {
            Command::Join(channel.to_string())
        } else {
            Command::Join(format!("#{}", channel))
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::User { username, realname } => {
                write!(f, "USER {} 0 * :{}", clean(username), clean(realname))
            }
            Command::Nick(nick) => write!(f, "NICK {}", clean(nick)),
            Command::Join(channel) => write!(f, "JOIN {}", clean(channel)),
            Command::Pong(token) => write!(f, "PONG :{}", clean(token)),
            Command::Quit(reason) => write!(f, "QUIT :{}", clean(reason)),
        }
    }
}

/// Drop characters that would end the line early or smuggle in a second one.
fn clean(param: &str) -> String {
    param.replace(['\r', '\n', '\0'], "")
}
