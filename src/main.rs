mod app;
mod config;
mod display;
mod irc;
mod relay;

use crate::app::event::RelayEvent;
use crate::config::AppConfig;
use crate::display::UdpDisplay;
use crate::irc::connection::spawn_connection;
use crate::irc::sender::send_quit;
use crate::relay::{InboundEvent, Relay};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const QUIT_MESSAGE: &str = "Fallblatt going dark";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = config::load_config(config_path.as_deref())?;

    info!(
        nick = %cfg.irc.nickname,
        server = %cfg.irc.server,
        channels = ?cfg.irc.channels,
        display = %cfg.display.endpoint(),
        "Configuration loaded"
    );

    let display = UdpDisplay::new(cfg.display.clone());
    let relay = Relay::new(cfg.relay.clone(), display)
        .with_context(|| format!("Invalid relay keyword {:?}", cfg.relay.keyword))?;

    run(cfg, Arc::new(relay)).await
}

/// Stay connected until Ctrl-C, reconnecting after every disconnect.
async fn run(cfg: AppConfig, relay: Arc<Relay<UdpDisplay>>) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RelayEvent>();

        info!("Connecting to {}:{}...", cfg.irc.server, cfg.irc.port);
        let connection = tokio::select! {
            _ = &mut shutdown => return Ok(()),
            result = spawn_connection(&cfg.irc, event_tx) => result,
        };

        match connection {
            Ok(conn) => loop {
                let event = tokio::select! {
                    _ = &mut shutdown => {
                        info!("Shutting down");
                        send_quit(&conn.sender, QUIT_MESSAGE);
                        return Ok(());
                    }
                    event = event_rx.recv() => event,
                };

                match event {
                    Some(RelayEvent::Message { message }) => {
                        if let Some(inbound) = InboundEvent::from_message(&message) {
                            relay.dispatch(inbound, conn.sender.clone());
                        }
                    }
                    Some(RelayEvent::Connected) => {
                        info!(channels = ?cfg.irc.channels, "Connected as {}", cfg.irc.nickname);
                    }
                    Some(RelayEvent::Error { error }) => {
                        warn!(%error, "IRC connection error");
                    }
                    Some(RelayEvent::Disconnected { reason }) => {
                        warn!(%reason, "Disconnected");
                        break;
                    }
                    None => {
                        debug!("Event channel closed");
                        break;
                    }
                }
            },
            Err(e) => warn!("Connection failed: {:#}", e),
        }

        let delay = cfg.irc.reconnect_delay();
        info!("Reconnecting in {}s", delay.as_secs());
        tokio::select! {
            _ = &mut shutdown => return Ok(()),
            _ = tokio::time::sleep(delay) => {}
        }
    }
}
