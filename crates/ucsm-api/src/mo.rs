// Managed objects
//
// UCS Manager models every piece of configuration as a managed object (MO)
// addressed by a distinguished name. The client keeps MOs untyped -- a class
// id, a DN, and string attributes -- and leaves typed views to ucsm-core.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

// ── Class ids ────────────────────────────────────────────────────────

/// The object classes this client queries and stages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr,
)]
pub enum ClassId {
    /// A LAN cloud VLAN (`fabric/lan/net-{name}` or `fabric/lan/{A|B}/net-{name}`).
    #[strum(serialize = "fabricVlan")]
    FabricVlan,
    /// A VLAN group (`fabric/lan/net-group-{name}`).
    #[strum(serialize = "fabricNetGroup")]
    FabricNetGroup,
    /// Membership of a VLAN in a VLAN group (`{group}/net-{vlan}`).
    #[strum(serialize = "fabricPooledVlan")]
    FabricPooledVlan,
    /// A port-channel bound under a VLAN (`{vlan}/pc-switch-{id}-pc-{port}`).
    #[strum(serialize = "fabricEthVlanPc")]
    FabricEthVlanPc,
}

// ── Distinguished names ──────────────────────────────────────────────

/// A distinguished name such as `fabric/lan/net-group-CORP/net-vlan666`.
///
/// Path segments (relative names) may contain bracketed values with `/`
/// inside, e.g. `ip-[10.0.0.1/24]`; those slashes are not separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Dn(String);

impl Dn {
    pub fn new(dn: impl Into<String>) -> Self {
        Self(dn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte index of the last separator outside brackets.
    fn last_separator(&self) -> Option<usize> {
        let mut depth = 0usize;
        let mut last = None;
        for (idx, ch) in self.0.char_indices() {
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '/' if depth == 0 => last = Some(idx),
                _ => {}
            }
        }
        last
    }

    /// The relative name (last path segment).
    pub fn rn(&self) -> &str {
        match self.last_separator() {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// The parent DN, or `None` for a top-level object.
    pub fn parent(&self) -> Option<Dn> {
        self.last_separator().map(|idx| Dn(self.0[..idx].to_owned()))
    }

    /// Append a relative name.
    pub fn child(&self, rn: &str) -> Dn {
        Dn(format!("{}/{rn}", self.0))
    }

    /// `true` if `self` lives strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &Dn) -> bool {
        self.0.len() > ancestor.0.len()
            && self.0.starts_with(&ancestor.0)
            && self.0.as_bytes().get(ancestor.0.len()) == Some(&b'/')
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Dn {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Dn {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Dn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Staging status ───────────────────────────────────────────────────

/// The `status` attribute sent with an object in `configConfMos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoStatus {
    /// Strict create: the controller rejects an existing DN.
    Created,
    /// Create or update in place.
    CreatedModified,
    /// Remove the object and its subtree.
    Deleted,
}

impl MoStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::CreatedModified => "created,modified",
            Self::Deleted => "deleted",
        }
    }
}

// ── ManagedObject ────────────────────────────────────────────────────

/// An untyped managed object as returned by a query.
///
/// `dn`, `rn` and `status` are lifted out of the attribute map; everything
/// else is kept verbatim in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedObject {
    pub class_id: String,
    pub dn: Dn,
    pub attributes: IndexMap<String, String>,
}

impl ManagedObject {
    pub fn new(class_id: impl Into<String>, dn: impl Into<Dn>) -> Self {
        Self {
            class_id: class_id.into(),
            dn: dn.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The `name` attribute, present on most fabric classes.
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    pub fn rn(&self) -> &str {
        self.dn.rn()
    }

    /// The typed class id, if this is one of the known classes.
    pub fn class(&self) -> Option<ClassId> {
        self.class_id.parse().ok()
    }

    pub fn is_class(&self, class: ClassId) -> bool {
        self.class_id == class.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn class_id_round_trips_wire_names() {
        assert_eq!(ClassId::FabricEthVlanPc.to_string(), "fabricEthVlanPc");
        assert_eq!("fabricNetGroup".parse::<ClassId>().unwrap(), ClassId::FabricNetGroup);
        assert!("swVlan".parse::<ClassId>().is_err());
    }

    #[test]
    fn dn_splits_on_last_separator() {
        let dn = Dn::from("fabric/lan/net-group-CORP/net-vlan666");
        assert_eq!(dn.rn(), "net-vlan666");
        assert_eq!(dn.parent().unwrap().as_str(), "fabric/lan/net-group-CORP");
        assert_eq!(Dn::from("fabric").parent(), None);
        assert_eq!(Dn::from("fabric").rn(), "fabric");
    }

    #[test]
    fn dn_ignores_slashes_inside_brackets() {
        let dn = Dn::from("org-root/ip-pool-ext/block-[10.0.0.1/24]");
        assert_eq!(dn.rn(), "block-[10.0.0.1/24]");
        assert_eq!(dn.parent().unwrap().as_str(), "org-root/ip-pool-ext");
    }

    #[test]
    fn descendant_check_requires_separator() {
        let group = Dn::from("fabric/lan/net-group-A");
        assert!(Dn::from("fabric/lan/net-group-A/net-x").is_descendant_of(&group));
        assert!(!Dn::from("fabric/lan/net-group-AB/net-x").is_descendant_of(&group));
        assert!(!group.is_descendant_of(&group));
    }

    #[test]
    fn managed_object_accessors() {
        let mo = ManagedObject::new("fabricVlan", "fabric/lan/net-vlan666")
            .with_attr("id", "666")
            .with_attr("name", "vlan666");
        assert_eq!(mo.name(), Some("vlan666"));
        assert_eq!(mo.rn(), "net-vlan666");
        assert_eq!(mo.class(), Some(ClassId::FabricVlan));
        assert!(mo.is_class(ClassId::FabricVlan));
    }
}
