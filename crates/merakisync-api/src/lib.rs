// merakisync-api: Async Rust client for the Cisco Meraki Dashboard API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::MerakiClient;
pub use error::Error;
pub use transport::TransportConfig;
