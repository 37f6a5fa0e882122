//! Inbound line classification.
//!
//! Only two things matter about a server line: whether it is a numeric reply
//! (`:server 433 * :Nickname is already in use`) and whether it is a `PING`.
//! Nothing here fails; anything unrecognised is simply not numeric.

/// Replies that mean the current nickname was refused.
pub const NICK_REJECTED: [u16; 3] = [
    433, // nickname in use
    451, // not registered
    464, // invalid password
];

/// Message-of-the-day replies.
pub const MOTD: [u16; 3] = [372, 375, 376];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    NickRejected(u16),
    Motd(u16),
    Numeric(u16),
    Other,
}

pub fn classify(line: &str) -> Reply {
    match classify_numeric(line) {
        Some(code) if NICK_REJECTED.contains(&code) => Reply::NickRejected(code),
        Some(code) if MOTD.contains(&code) => Reply::Motd(code),
        Some(code) => Reply::Numeric(code),
        None => Reply::Other,
    }
}

/// The numeric code of a prefixed server reply, if the line is one.
pub fn classify_numeric(line: &str) -> Option<u16> {
    if !line.starts_with(':') {
        return None;
    }
    let code: u16 = line.split_whitespace().nth(1)?.parse().ok()?;
    (1..=999).contains(&code).then_some(code)
}

pub fn is_ping(line: &str) -> bool {
    line.split_whitespace().next() == Some("PING")
}

/// Payload to echo back in the `PONG`.
///
/// Normally everything after the first `:`. A `PING` without a colon falls
/// back to its first parameter, or to an empty token when it has none.
pub fn extract_ping_token(line: &str) -> &str {
    match line.split_once(':') {
        Some((_, token)) => token,
        None => line.split_whitespace().nth(1).unwrap_or(""),
    }
}
