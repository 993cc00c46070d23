// ── Child bindings ──
//
// Objects found below a VLAN or VLAN group in a hierarchical query.
// `FabricChild` is the discriminator the migration logic matches on.

use serde::Serialize;
use ucsm_api::Dn;

/// Membership of a VLAN in a VLAN group (`fabricPooledVlan`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PooledVlan {
    /// Name of the member VLAN.
    pub name: String,
    pub dn: Dn,
    /// The owning VLAN group.
    pub group_dn: Option<Dn>,
}

/// A port-channel carrying a VLAN (`fabricEthVlanPc`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortChannelBinding {
    pub dn: Dn,
    pub switch_id: Option<String>,
    pub port_id: Option<String>,
}

/// One object from a hierarchical query, classified by its class id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FabricChild {
    PooledVlan(PooledVlan),
    PortChannel(PortChannelBinding),
    Other { class_id: String, dn: Dn },
}

impl FabricChild {
    pub fn is_port_channel(&self) -> bool {
        matches!(self, Self::PortChannel(_))
    }

    /// The bound VLAN name, for pooled-VLAN bindings.
    pub fn pooled_vlan_name(&self) -> Option<&str> {
        match self {
            Self::PooledVlan(p) => Some(&p.name),
            _ => None,
        }
    }
}
