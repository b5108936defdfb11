use crate::config::DisplayConfig;
use crate::display::TransportError;
use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, trace};

/// Largest payload a single UDP datagram can carry.
const MAX_DATAGRAM: usize = 65_535;

/// Something that can show a payload and answer with text.
pub trait DisplayClient: Send + Sync + 'static {
    /// Send `payload` to the display and return its response, which is
    /// empty when the display stays silent.
    fn send_and_receive(
        &self,
        payload: &str,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Display reached over best-effort UDP datagrams.
///
/// Holds only configuration. Every exchange binds a fresh socket, so
/// concurrent exchanges never see each other's datagrams.
#[derive(Debug, Clone)]
pub struct UdpDisplay {
    config: DisplayConfig,
}

impl UdpDisplay {
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    async fn open(&self, endpoint: &str) -> Result<UdpSocket, TransportError> {
        let remote = lookup_host(endpoint)
            .await
            .map_err(|source| TransportError::Resolve {
                endpoint: endpoint.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| TransportError::Resolve {
                endpoint: endpoint.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
            })?;

        let local: SocketAddr = if remote.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let unavailable = |source| TransportError::Unavailable {
            endpoint: endpoint.to_string(),
            source,
        };
        let socket = UdpSocket::bind(local).await.map_err(unavailable)?;
        socket.connect(remote).await.map_err(unavailable)?;
        Ok(socket)
    }

    /// Collect datagrams until the display is quiet for the idle timeout,
    /// sends an empty datagram, the total wait elapses, or the response
    /// limit is reached.
    async fn collect(&self, socket: &UdpSocket, endpoint: &str) -> Result<Vec<u8>, TransportError> {
        let limit = self.config.max_response_bytes;
        let deadline = Instant::now() + self.config.max_wait();
        let mut response = Vec::new();
        let mut buf = vec![0u8; MAX_DATAGRAM];

        while response.len() < limit {
            let wait_until = (Instant::now() + self.config.idle_timeout()).min(deadline);
            match timeout_at(wait_until, socket.recv(&mut buf)).await {
                Err(_) => {
                    trace!(endpoint, "Display went quiet");
                    break;
                }
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => response.extend_from_slice(&buf[..n]),
                Ok(Err(e)) if !response.is_empty() => {
                    debug!(endpoint, error = %e, "Read ended early, keeping partial response");
                    break;
                }
                Ok(Err(e)) => return Err(TransportError::from_session(endpoint, e)),
            }
        }

        response.truncate(limit);
        Ok(response)
    }
}

impl DisplayClient for UdpDisplay {
    async fn send_and_receive(&self, payload: &str) -> Result<String, TransportError> {
        let endpoint = self.config.endpoint();
        // The socket lives for this scope only and is closed on every return.
        let socket = self.open(&endpoint).await?;

        let frame = format!("{} ", payload);
        socket
            .send(frame.as_bytes())
            .await
            .map_err(|e| TransportError::from_session(&endpoint, e))?;

        let response = self.collect(&socket, &endpoint).await?;
        debug!(
            endpoint = %endpoint,
            sent = frame.len(),
            received = response.len(),
            "Display exchange finished"
        );
        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn display_peer() -> (UdpSocket, UdpDisplay) {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = peer.local_addr().unwrap().port();
        let display = UdpDisplay::new(DisplayConfig {
            host: "127.0.0.1".into(),
            port,
            idle_timeout_ms: 200,
            max_wait_ms: 2000,
            max_response_bytes: 4096,
        });
        (peer, display)
    }

    #[tokio::test]
    async fn test_payload_gets_trailing_space_and_reply_is_returned() {
        let (peer, display) = display_peer().await;
        let server = tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (n, from) = peer.recv_from(&mut buf).await.unwrap();
            peer.send_to(b"OK", from).await.unwrap();
            String::from_utf8(buf[..n].to_vec()).unwrap()
        });

        let response = display.send_and_receive("Board meeting at 5pm").await.unwrap();
        assert_eq!(response, "OK");
        assert_eq!(server.await.unwrap(), "Board meeting at 5pm ");
    }

    #[tokio::test]
    async fn test_silent_display_yields_empty_response() {
        let (peer, display) = display_peer().await;
        let server = tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (n, _) = peer.recv_from(&mut buf).await.unwrap();
            // Hold the socket open so the client only sees silence.
            tokio::time::sleep(Duration::from_millis(500)).await;
            n
        });

        let started = std::time::Instant::now();
        let response = display.send_and_receive("hello").await.unwrap();
        assert_eq!(response, "");
        assert!(started.elapsed() < Duration::from_millis(1500));
        assert_eq!(server.await.unwrap(), "hello ".len());
    }

    #[tokio::test]
    async fn test_datagrams_accumulate_until_empty_datagram() {
        let (peer, display) = display_peer().await;
        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (_, from) = peer.recv_from(&mut buf).await.unwrap();
            peer.send_to(b"AB", from).await.unwrap();
            peer.send_to(b"CD", from).await.unwrap();
            peer.send_to(b"", from).await.unwrap();
            peer.send_to(b"late", from).await.unwrap();
            tokio::time::sleep(Duration::from_millis(500)).await;
        });

        let response = display.send_and_receive("x").await.unwrap();
        assert_eq!(response, "ABCD");
    }

    #[tokio::test]
    async fn test_response_is_capped() {
        let (peer, mut display) = display_peer().await;
        display.config.max_response_bytes = 4;
        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (_, from) = peer.recv_from(&mut buf).await.unwrap();
            peer.send_to(b"ABCDEF", from).await.unwrap();
        });

        let response = display.send_and_receive("x").await.unwrap();
        assert_eq!(response, "ABCD");
    }

    #[tokio::test]
    async fn test_closed_port_is_unavailable() {
        let (peer, display) = display_peer().await;
        drop(peer);

        let err = display.send_and_receive("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Unavailable { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_sequential_exchanges_are_independent() {
        let (peer, display) = display_peer().await;
        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            loop {
                let Ok((n, from)) = peer.recv_from(&mut buf).await else { break };
                let reply = format!("ack:{}", String::from_utf8_lossy(&buf[..n]).trim_end());
                let _ = peer.send_to(reply.as_bytes(), from).await;
            }
        });

        assert_eq!(display.send_and_receive("first").await.unwrap(), "ack:first");
        assert_eq!(display.send_and_receive("second").await.unwrap(), "ack:second");
    }

    #[tokio::test]
    async fn test_concurrent_exchanges_do_not_mix() {
        let (peer, display) = display_peer().await;
        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            loop {
                let Ok((n, from)) = peer.recv_from(&mut buf).await else { break };
                let reply = format!("ack:{}", String::from_utf8_lossy(&buf[..n]).trim_end());
                let _ = peer.send_to(reply.as_bytes(), from).await;
            }
        });

        let (a, b) = tokio::join!(
            display.send_and_receive("left"),
            display.send_and_receive("right")
        );
        assert_eq!(a.unwrap(), "ack:left");
        assert_eq!(b.unwrap(), "ack:right");
    }
}
