use crate::config::RelayConfig;
use crate::display::DisplayClient;
use crate::relay::event::InboundEvent;
use crate::relay::extract::PayloadMatcher;
use crate::relay::reply::render_reply;
use std::sync::Arc;
use tracing::{debug, warn};

/// A reply addressed to the medium an event arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub target: String,
    pub text: String,
}

/// Forwards qualifying IRC messages to the display and answers with the
/// display's response.
pub struct Relay<D> {
    matcher: PayloadMatcher,
    settings: RelayConfig,
    display: D,
}

impl<D: DisplayClient> Relay<D> {
    pub fn new(settings: RelayConfig, display: D) -> Result<Self, regex::Error> {
        Ok(Self {
            matcher: PayloadMatcher::new(&settings.keyword)?,
            settings,
            display,
        })
    }

    /// Handle one event: one display exchange and one reply, or nothing if
    /// the event is not meant for the display. Transport failures turn into
    /// the configured failure reply.
    pub async fn handle(&self, event: &InboundEvent) -> Option<Reply> {
        let payload = self.matcher.extract(event)?;
        debug!(origin = %event.origin, medium = ?event.medium, payload = %payload, "Relaying to display");

        let response = match self.display.send_and_receive(&payload).await {
            Ok(response) => response,
            Err(e) => {
                warn!(origin = %event.origin, error = %e, "Display exchange failed");
                self.settings.failure_reply.clone()
            }
        };

        Some(Reply {
            target: event.medium.reply_target(&event.origin).to_string(),
            text: render_reply(&response, self.settings.max_reply_len),
        })
    }

    /// Handle `event` on its own task so a slow display never holds up the
    /// IRC read loop, then send the reply.
    pub fn dispatch(self: &Arc<Self>, event: InboundEvent, sender: irc::client::Sender) {
        let relay = Arc::clone(self);
        tokio::spawn(async move {
            let Some(reply) = relay.handle(&event).await else {
                return;
            };
            if let Err(e) = crate::irc::sender::send_reply(&sender, &reply) {
                warn!(to = %reply.target, error = %e, "Failed to send reply");
            }
        });
    }
}
