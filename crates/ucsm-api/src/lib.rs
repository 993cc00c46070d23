// ucsm-api: Async Rust client for the UCS Manager XML API (`/nuova`)

pub mod auth;
pub mod client;
pub mod error;
pub mod mo;
pub mod query;
pub mod staging;
pub mod transport;
pub mod xml;

pub use client::UcsClient;
pub use error::Error;
pub use mo::{ClassId, Dn, ManagedObject, MoStatus};
pub use staging::StagedMo;
pub use transport::{TlsMode, TransportConfig};
