// ucsm-core: VLAN group migration on top of ucsm-api.

pub mod changelog;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use changelog::{ChangeEntry, ChangeLog};
pub use config::{ControllerConfig, TlsVerification};
pub use controller::{
    AutoApprove, CommitOutcome, Confirm, ConnectionState, Controller, MoveRequest,
};
pub use error::{CoreError, ErrorKind};
pub use session::FabricSession;
pub use store::ObjectCache;

// Re-export model types at the crate root for ergonomics.
pub use model::{FabricChild, FabricScope, PooledVlan, PortChannelBinding, Vlan, VlanGroup};

// The wire-level types callers need to drive a session directly.
pub use ucsm_api::{ClassId, Dn, ManagedObject};
