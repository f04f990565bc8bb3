//! Per-query dispatch: decode the question, pick an answer, build the response.

use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

use crate::codec;
use crate::config::DnsConfig;
use crate::metrics::{self, DropReason, QueryResult, Timer};
use crate::txt;

/// Answers queries for names under a single root domain.
#[derive(Debug, Clone)]
pub struct QueryHandler {
    root_domain: String,
    ttl: u32,
}

impl QueryHandler {
    /// Create a handler for the given configuration.
    pub fn new(config: &DnsConfig) -> Self {
        Self {
            root_domain: config.root_domain.clone(),
            ttl: config.ttl,
        }
    }

    /// Root domain this handler answers for.
    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Build the response to `request`, received from `peer`.
    ///
    /// Only the first question is answered. Returns `None` when the message
    /// carries no question at all; otherwise a response is always produced,
    /// with zero answers if nothing matched.
    pub fn handle(&self, request: &Message, peer: SocketAddr) -> Option<Message> {
        let timer = Timer::start();

        let Some(query) = request.queries().first() else {
            metrics::record_dropped(DropReason::NoQuestion);
            return None;
        };

        let name = query.name().to_lowercase();
        let qname = name_text(&name);
        let rtype = query.query_type();

        let mut question = query.clone();
        question.set_name(name.clone());

        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_authoritative(true)
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(false)
            .set_response_code(ResponseCode::NoError)
            .add_query(question);

        match self.answer(&qname, rtype, peer.ip()) {
            Some(rdata) => {
                info!(rtype = %rtype, name = %qname, answer = %rdata, "Answer");
                let mut record = Record::from_rdata(name, self.ttl, rdata);
                record.set_dns_class(DNSClass::IN);
                response.add_answer(record);
                metrics::record_query(rtype, QueryResult::Answered, timer.elapsed());
            }
            None => {
                info!(rtype = %rtype, name = %qname, "No data");
                metrics::record_query(rtype, QueryResult::NoData, timer.elapsed());
            }
        }

        Some(response)
    }

    /// Pick the answer data for a lowercased query name.
    fn answer(&self, name: &str, rtype: RecordType, peer: IpAddr) -> Option<RData> {
        let root = self.root_domain.as_str();
        match rtype {
            RecordType::A => codec::decode_ipv4(name, root).map(|ip| RData::A(A::from(ip))),
            RecordType::AAAA => codec::decode_ipv6(name, root).map(|ip| RData::AAAA(AAAA::from(ip))),
            // TXT always answers inside the zone
            RecordType::TXT => codec::subject(name, root)
                .map(|_| RData::TXT(TXT::new(vec![txt::txt_answer(name, root, peer)]))),
            _ => None,
        }
    }
}

/// Presentation form of `name` without the trailing root dot.
fn name_text(name: &Name) -> String {
    let mut text = name.to_ascii();
    if text.ends_with('.') {
        text.pop();
    }
    text
}
