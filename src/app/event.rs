#[derive(Debug)]
pub enum RelayEvent {
    /// Registration with the IRC server has been sent
    Connected,

    /// IRC message received from the server
    Message {
        message: irc::client::prelude::Message,
    },

    /// The read loop failed; a `Disconnected` follows
    Error {
        error: String,
    },
    Disconnected {
        reason: String,
    },
}
