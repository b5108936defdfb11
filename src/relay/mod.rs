//! IRC-facing side of the relay: turns inbound messages into display
//! payloads and display responses into replies.

pub mod event;
pub mod extract;
pub mod listener;
pub mod reply;

pub use event::InboundEvent;
pub use listener::{Relay, Reply};
