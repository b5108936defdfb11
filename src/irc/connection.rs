use crate::app::event::RelayEvent;
use crate::config::IrcConfig;
use anyhow::{Context, Result};
use futures::StreamExt;
use irc::client::prelude::*;
use tokio::sync::mpsc;
use tracing::debug;

pub struct IrcConnection {
    pub sender: irc::client::Sender,
}

fn client_config(cfg: &IrcConfig) -> Config {
    Config {
        server: Some(cfg.server.clone()),
        port: Some(cfg.port),
        use_tls: Some(cfg.tls),
        nickname: Some(cfg.nickname.clone()),
        username: cfg.username.clone(),
        realname: cfg.realname.clone(),
        password: cfg.password.clone(),
        nick_password: cfg.nick_password.clone(),
        channels: cfg.channels.clone(),
        dangerously_accept_invalid_certs: Some(cfg.accept_invalid_certs),
        version: Some(format!("fallblatt-relay {}", env!("CARGO_PKG_VERSION"))),
        ..Config::default()
    }
}

/// Connect, register, and forward every inbound message to `event_tx`
/// until the connection drops.
pub async fn spawn_connection(
    cfg: &IrcConfig,
    event_tx: mpsc::UnboundedSender<RelayEvent>,
) -> Result<IrcConnection> {
    let mut client = Client::from_config(client_config(cfg))
        .await
        .with_context(|| format!("Failed to connect to {}:{}", cfg.server, cfg.port))?;
    client.identify().context("Failed to register with the server")?;

    let sender = client.sender();
    let mut stream = client.stream()?;

    let _ = event_tx.send(RelayEvent::Connected);

    tokio::spawn(async move {
        while let Some(result) = stream.next().await {
            match result {
                Ok(message) => {
                    debug!(line = %message.to_string().trim_end(), "IRC <-");
                    if event_tx.send(RelayEvent::Message { message }).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = event_tx.send(RelayEvent::Error {
                        error: e.to_string(),
                    });
                    break;
                }
            }
        }
        let _ = event_tx.send(RelayEvent::Disconnected {
            reason: "Connection closed".to_string(),
        });
    });

    Ok(IrcConnection { sender })
}
