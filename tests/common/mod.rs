//! Shared test infrastructure for UDP integration tests.

#![allow(dead_code)]

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use tokio::net::UdpSocket;
use tokio_util::sync::{CancellationToken, DropGuard};

use wildcard_dns::{DnsConfig, DnsServer};

// --- Constants ---

pub const ROOT_DOMAIN: &str = "nip.example.com";
pub const TTL: u32 = 30;

/// How long to wait for a reply before concluding none is coming.
pub const REPLY_TIMEOUT: Duration = Duration::from_millis(500);

// --- TestServer ---

/// A wildcard DNS server on an ephemeral loopback port, stopped on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: DropGuard,
}

impl TestServer {
    pub async fn start() -> Self {
        let config = DnsConfig {
            root_domain: ROOT_DOMAIN.to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            ttl: TTL,
        };
        let server = DnsServer::bind(config)
            .await
            .expect("failed to bind test server");
        let addr = server.local_addr().expect("failed to get local addr");

        let shutdown = CancellationToken::new();
        tokio::spawn(server.run(shutdown.clone()));

        Self {
            addr,
            _shutdown: shutdown.drop_guard(),
        }
    }

    /// Open a client socket on loopback.
    pub async fn client(&self) -> UdpSocket {
        UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("failed to bind client socket")
    }

    /// Send raw bytes and wait for a reply, returning `None` on timeout.
    pub async fn exchange_raw(&self, client: &UdpSocket, bytes: &[u8]) -> Option<Vec<u8>> {
        client
            .send_to(bytes, self.addr)
            .await
            .expect("failed to send datagram");

        let mut buf = vec![0u8; 4096];
        match tokio::time::timeout(REPLY_TIMEOUT, client.recv_from(&mut buf)).await {
            Ok(Ok((len, from))) => {
                assert_eq!(from, self.addr, "reply came from an unexpected address");
                buf.truncate(len);
                Some(buf)
            }
            Ok(Err(e)) => panic!("recv_from failed: {e}"),
            Err(_) => None,
        }
    }

    /// Send a query and parse the reply.
    pub async fn query(&self, name: &str, record_type: RecordType, id: u16) -> Message {
        let client = self.client().await;
        let reply = self
            .exchange_raw(&client, &build_query_bytes(name, record_type, id))
            .await
            .unwrap_or_else(|| panic!("no reply for {name} {record_type}"));
        Message::from_vec(&reply).expect("failed to parse DNS response")
    }
}

// --- Query construction ---

/// Build wire-format bytes for a DNS query.
pub fn build_query_bytes(name: &str, record_type: RecordType, id: u16) -> Vec<u8> {
    let mut msg = Message::new();
    msg.set_id(id);
    msg.set_message_type(MessageType::Query);
    msg.set_op_code(OpCode::Query);
    msg.set_recursion_desired(true);
    let mut query = Query::new();
    query.set_name(Name::from_ascii(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);
    msg.add_query(query);
    msg.to_vec().unwrap()
}

// --- Response helpers ---

/// Extract A addresses from a response.
pub fn extract_a_ips(msg: &Message) -> Vec<Ipv4Addr> {
    msg.answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::A(a) => Some(Ipv4Addr::from(*a)),
            _ => None,
        })
        .collect()
}

/// Extract AAAA addresses from a response.
pub fn extract_aaaa_ips(msg: &Message) -> Vec<Ipv6Addr> {
    msg.answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::AAAA(aaaa) => Some(Ipv6Addr::from(*aaaa)),
            _ => None,
        })
        .collect()
}

/// Extract TXT strings from a response, one per record.
pub fn extract_txt(msg: &Message) -> Vec<String> {
    msg.answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::TXT(txt) => Some(
                txt.txt_data()
                    .iter()
                    .map(|part| String::from_utf8_lossy(part).into_owned())
                    .collect(),
            ),
            _ => None,
        })
        .collect()
}

/// Assert the header fields every response carries.
pub fn assert_authoritative_response(msg: &Message, id: u16) {
    assert_eq!(msg.id(), id);
    assert_eq!(msg.message_type(), MessageType::Response);
    assert!(msg.authoritative(), "AA bit not set");
    assert!(!msg.recursion_available(), "RA bit set");
}
