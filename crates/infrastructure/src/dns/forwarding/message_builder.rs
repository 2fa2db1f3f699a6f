//! DNS Message Builder
//!
//! Constructs address-record query messages in wire format using `hickory-proto`.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use resolvercache_domain::ResolveError;
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build an A/IN query for `hostname` with RD set and a random id.
    ///
    /// The name is made fully qualified before encoding, so `example.com`
    /// and `example.com.` produce the same question.
    pub fn build_address_query(hostname: &str) -> Result<Vec<u8>, ResolveError> {
        let name = Self::fqdn(hostname)?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::A);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        Self::serialize_message(&message).map_err(|reason| ResolveError::InvalidHostname {
            hostname: hostname.to_string(),
            reason,
        })
    }

    fn fqdn(hostname: &str) -> Result<Name, ResolveError> {
        let invalid = |reason: String| ResolveError::InvalidHostname {
            hostname: hostname.to_string(),
            reason,
        };

        if hostname.is_empty() || hostname == "." {
            return Err(invalid("empty name".to_string()));
        }

        let absolute = if hostname.ends_with('.') {
            hostname.to_string()
        } else {
            format!("{}.", hostname)
        };

        Name::from_str(&absolute).map_err(|e| invalid(e.to_string()))
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, String> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| format!("failed to encode query: {}", e))?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_address_query() {
        let query = MessageBuilder::build_address_query("google.com").unwrap();

        // DNS header is always 12 bytes, plus question section
        assert!(query.len() > 12);

        // Byte 2: QR(1) + Opcode(4) + AA(1) + TC(1) + RD(1)
        assert_eq!(query[2] & 0x01, 0x01, "RD flag should be set");
        assert_eq!(query[2] & 0x80, 0x00, "QR flag should be clear");

        // QDCOUNT = 1
        assert_eq!(&query[4..6], &[0x00, 0x01]);
    }

    #[test]
    fn test_question_is_type_a_class_in() {
        let query = MessageBuilder::build_address_query("a.example").unwrap();
        let tail = &query[query.len() - 4..];
        assert_eq!(tail, &[0x00, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn test_relative_and_absolute_names_encode_identically() {
        let relative = MessageBuilder::build_address_query("example.com").unwrap();
        let absolute = MessageBuilder::build_address_query("example.com.").unwrap();
        assert_eq!(relative[12..], absolute[12..]);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(
            MessageBuilder::build_address_query(""),
            Err(ResolveError::InvalidHostname { .. })
        ));
    }

    #[test]
    fn test_oversized_name_is_invalid_hostname() {
        let label = "a".repeat(63);
        let name = vec![label.as_str(); 5].join(".");
        let result = MessageBuilder::build_address_query(&name);
        assert!(matches!(result, Err(ResolveError::InvalidHostname { .. })));
    }

    #[test]
    fn test_oversized_label_is_rejected() {
        let label = "a".repeat(64);
        let result = MessageBuilder::build_address_query(&format!("{}.com", label));
        assert!(matches!(result, Err(ResolveError::InvalidHostname { .. })));
    }
}
