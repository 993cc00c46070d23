// ── Domain model ──
//
// Typed views of the handful of UCS Manager classes the migration touches.
// Each type keeps only the fields the controller actually reads.

mod binding;
mod fabric;

pub use binding::{FabricChild, PooledVlan, PortChannelBinding};
pub use fabric::{FabricScope, Vlan, VlanGroup};
