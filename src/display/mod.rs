//! Display transport: one-shot UDP exchanges with the split-flap display.
//!
//! Each request opens its own socket, writes the payload followed by a
//! single space, collects whatever the display sends back until it goes
//! quiet, and closes the socket again.

pub mod error;
pub mod transport;

pub use error::TransportError;
pub use transport::{DisplayClient, UdpDisplay};
