//! UDP listener and request loop.

use hickory_proto::op::Message;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::DnsConfig;
use crate::error::DnsError;
use crate::handler::QueryHandler;
use crate::metrics::{self, DropReason};

/// Largest datagram read from the socket; anything longer is truncated and
/// will fail to decode.
const MAX_DATAGRAM_SIZE: usize = 4096;

/// Wildcard DNS server bound to a single UDP socket.
pub struct DnsServer {
    socket: UdpSocket,
    handler: QueryHandler,
}

impl DnsServer {
    /// Bind the UDP socket described by `config`.
    pub async fn bind(config: DnsConfig) -> Result<Self, DnsError> {
        let socket = UdpSocket::bind((config.host.as_str(), config.port)).await?;
        let local_addr = socket.local_addr()?;

        info!(
            addr = %local_addr,
            root_domain = %config.root_domain,
            ttl = config.ttl,
            "DNS UDP listening for *.{}",
            config.root_domain
        );

        Ok(Self {
            socket,
            handler: QueryHandler::new(&config),
        })
    }

    /// Address the socket is actually bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, DnsError> {
        Ok(self.socket.local_addr()?)
    }

    /// Serve queries until `shutdown` is cancelled.
    ///
    /// Datagrams are handled one at a time, each to completion before the
    /// next is read.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(root_domain = %self.handler.root_domain(), "DNS server shutting down");
                    return;
                }
                received = self.socket.recv_from(&mut buf) => {
                    let (len, peer) = match received {
                        Ok(v) => v,
                        Err(e) => {
                            warn!(error = %e, "recv_from failed");
                            continue;
                        }
                    };
                    self.handle_datagram(&buf[..len], peer).await;
                }
            }
        }
    }

    /// Decode, answer and reply to one datagram. Nothing in here can fail
    /// past this call.
    async fn handle_datagram(&self, bytes: &[u8], peer: SocketAddr) {
        let Ok(request) = Message::from_vec(bytes) else {
            metrics::record_dropped(DropReason::Malformed);
            return;
        };

        let Some(response) = self.handler.handle(&request, peer) else {
            return;
        };

        let encoded = match encode_reply(response) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!(error = %e, %peer, "failed to encode response");
                return;
            }
        };

        if let Err(e) = self.socket.send_to(&encoded, peer).await {
            warn!(error = %e, %peer, "send_to failed");
            metrics::record_send_error();
        }
    }
}

/// Encode a response to wire format.
pub fn encode_response(response: &Message) -> Result<Vec<u8>, DnsError> {
    Ok(response.to_vec()?)
}

/// Encode `response`, or the same response stripped of its answers if an
/// answer cannot be encoded, so the client still gets a reply.
fn encode_reply(mut response: Message) -> Result<Vec<u8>, DnsError> {
    match encode_response(&response) {
        Ok(encoded) => Ok(encoded),
        Err(e) => {
            warn!(error = %e, id = response.id(), "answer not encodable, replying without it");
            response.take_answers();
            encode_response(&response)
        }
    }
}
