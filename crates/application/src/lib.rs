//! resolvercache application layer: ports shared between adapters and jobs
pub mod ports;
