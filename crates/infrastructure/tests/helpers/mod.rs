#![allow(dead_code)]

pub mod dns_server_mock;
pub mod responses;
pub mod stub_resolver;
pub mod stub_transport;

pub use dns_server_mock::MockDnsServer;
pub use stub_resolver::StubResolver;
pub use stub_transport::{StubReply, StubTransport};
