//! IRC protocol layer: line transport, outbound commands and reply handling.

pub mod commands;
pub mod connection;
pub mod dispatcher;
pub mod nickname;
pub mod reply;
pub mod sender;
