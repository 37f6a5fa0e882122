use std::sync::Arc;
use std::time::Duration;

use crate::app::event::{report_send_error, EventSender};
use crate::config::BotConfig;
use crate::irc::sender::Sender;

/// Join every configured channel once the startup delay has passed.
pub async fn run(config: Arc<BotConfig>, sender: Sender, events: EventSender) {
    if config.channels.is_empty() {
        return;
    }
    tokio::time::sleep(Duration::from_secs(config.timing.join_delay_secs)).await;

    for channel in &config.channels {
        if let Err(e) = sender.send_join(channel).await {
            report_send_error(&events, "channel join", e);
            return;
        }
    }
}
