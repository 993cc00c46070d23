// ── LAN cloud VLANs and VLAN groups ──

use std::fmt;

use serde::Serialize;
use ucsm_api::Dn;

/// Which fabric interconnect(s) a VLAN is defined on.
///
/// Global VLANs live at `fabric/lan/net-*`; fabric-specific ones at
/// `fabric/lan/A/net-*` or `fabric/lan/B/net-*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FabricScope {
    Dual,
    A,
    B,
}

impl FabricScope {
    pub fn from_dn(dn: &Dn) -> Self {
        match dn.parent().as_ref().map(Dn::rn) {
            Some("A") => Self::A,
            Some("B") => Self::B,
            _ => Self::Dual,
        }
    }
}

impl fmt::Display for FabricScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dual => "dual",
            Self::A => "A",
            Self::B => "B",
        })
    }
}

/// A VLAN (`fabricVlan`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vlan {
    pub id: u16,
    pub name: String,
    pub dn: Dn,
    pub fabric: FabricScope,
    /// Private VLAN sharing mode (`none`, `primary`, `isolated`, ...).
    pub sharing: Option<String>,
}

/// A VLAN group (`fabricNetGroup`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanGroup {
    pub name: String,
    pub dn: Dn,
}

impl VlanGroup {
    /// DN of the pooled-VLAN binding that would place `vlan_name` in this group.
    pub fn pooled_vlan_dn(&self, vlan_name: &str) -> Dn {
        self.dn.child(&format!("net-{vlan_name}"))
    }
}
