//! IRC protocol layer: connection management and reply sending.

pub mod connection;
pub mod sender;
