use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub addresses: Vec<IpAddr>,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Smallest TTL among the collected address records.
    pub min_ttl: Option<u32>,
}

impl DnsResponse {
    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decode a wire-format response and collect its A records.
    ///
    /// Records of other types (CNAME chains, AAAA) are skipped. The TTL of a
    /// multi-record answer is the minimum across the A records.
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, String> {
        let message = Message::from_vec(response_bytes)
            .map_err(|e| format!("Failed to parse DNS response: {}", e))?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut addresses = Vec::new();
        let mut min_ttl: Option<u32> = None;

        for record in message.answers() {
            if let RData::A(a) = record.data() {
                let record_ttl = record.ttl();
                min_ttl = Some(min_ttl.map_or(record_ttl, |current| current.min(record_ttl)));
                addresses.push(IpAddr::V4(a.0));
            }
        }

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            min_ttl = ?min_ttl,
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            addresses,
            rcode,
            truncated,
            min_ttl,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::YXRRSet => "YXRRSET",
            ResponseCode::NXRRSet => "NXRRSET",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            _ => "UNKNOWN",
        }
    }
}
