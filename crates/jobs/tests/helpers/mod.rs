mod mock_sweep_port;

pub use mock_sweep_port::MockCacheSweepPort;
