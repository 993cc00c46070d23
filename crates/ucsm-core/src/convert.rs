// ── API-to-domain type conversions ──
//
// Bridges raw `ucsm_api::ManagedObject` values into the typed model.
// Missing or malformed required attributes are decode errors; everything
// optional is carried as `Option`.

use tracing::warn;
use ucsm_api::{ClassId, ManagedObject};

use crate::error::CoreError;
use crate::model::{FabricChild, FabricScope, PooledVlan, PortChannelBinding, Vlan, VlanGroup};

// ── Helpers ──────────────────────────────────────────────────────────

fn decode_error(mo: &ManagedObject, message: impl Into<String>) -> CoreError {
    CoreError::Decode {
        class_id: mo.class_id.clone(),
        dn: mo.dn.to_string(),
        message: message.into(),
    }
}

fn expect_class(mo: &ManagedObject, class: ClassId) -> Result<(), CoreError> {
    if mo.is_class(class) {
        Ok(())
    } else {
        Err(decode_error(mo, format!("expected class {class}")))
    }
}

fn required<'a>(mo: &'a ManagedObject, key: &str) -> Result<&'a str, CoreError> {
    mo.attr(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| decode_error(mo, format!("missing attribute '{key}'")))
}

/// `name` attribute, falling back to the `net-{name}` relative name.
fn name_or_rn(mo: &ManagedObject) -> Result<String, CoreError> {
    if let Some(name) = mo.name().filter(|n| !n.is_empty()) {
        return Ok(name.to_owned());
    }
    mo.rn()
        .strip_prefix("net-")
        .map(str::to_owned)
        .ok_or_else(|| decode_error(mo, "missing attribute 'name'"))
}

// ── Conversions ──────────────────────────────────────────────────────

impl TryFrom<&ManagedObject> for Vlan {
    type Error = CoreError;

    fn try_from(mo: &ManagedObject) -> Result<Self, Self::Error> {
        expect_class(mo, ClassId::FabricVlan)?;
        let raw_id = required(mo, "id")?;
        let id = raw_id
            .parse::<u16>()
            .map_err(|_| decode_error(mo, format!("invalid VLAN id '{raw_id}'")))?;

        Ok(Self {
            id,
            name: required(mo, "name")?.to_owned(),
            dn: mo.dn.clone(),
            fabric: FabricScope::from_dn(&mo.dn),
            sharing: mo.attr("sharing").map(str::to_owned),
        })
    }
}

impl TryFrom<&ManagedObject> for VlanGroup {
    type Error = CoreError;

    fn try_from(mo: &ManagedObject) -> Result<Self, Self::Error> {
        expect_class(mo, ClassId::FabricNetGroup)?;
        Ok(Self {
            name: required(mo, "name")?.to_owned(),
            dn: mo.dn.clone(),
        })
    }
}

impl TryFrom<&ManagedObject> for PooledVlan {
    type Error = CoreError;

    fn try_from(mo: &ManagedObject) -> Result<Self, Self::Error> {
        expect_class(mo, ClassId::FabricPooledVlan)?;
        Ok(Self {
            name: name_or_rn(mo)?,
            dn: mo.dn.clone(),
            group_dn: mo.dn.parent(),
        })
    }
}

impl TryFrom<&ManagedObject> for PortChannelBinding {
    type Error = CoreError;

    fn try_from(mo: &ManagedObject) -> Result<Self, Self::Error> {
        expect_class(mo, ClassId::FabricEthVlanPc)?;
        Ok(Self {
            dn: mo.dn.clone(),
            switch_id: mo.attr("switchId").map(str::to_owned),
            port_id: mo.attr("portId").map(str::to_owned),
        })
    }
}

impl TryFrom<&ManagedObject> for FabricChild {
    type Error = CoreError;

    fn try_from(mo: &ManagedObject) -> Result<Self, Self::Error> {
        match mo.class() {
            Some(ClassId::FabricPooledVlan) => PooledVlan::try_from(mo).map(Self::PooledVlan),
            Some(ClassId::FabricEthVlanPc) => {
                PortChannelBinding::try_from(mo).map(Self::PortChannel)
            }
            _ => Ok(Self::Other {
                class_id: mo.class_id.clone(),
                dn: mo.dn.clone(),
            }),
        }
    }
}

/// Build the managed object for a new pooled-VLAN binding.
pub fn pooled_vlan_mo(group: &VlanGroup, vlan_name: &str) -> ManagedObject {
    ManagedObject::new(
        ClassId::FabricPooledVlan.as_ref(),
        group.pooled_vlan_dn(vlan_name),
    )
    .with_attr("name", vlan_name)
}

/// Convert every object of a listing. The first undecodable object fails
/// the whole conversion.
pub(crate) fn convert_strict<'a, T>(
    objects: impl IntoIterator<Item = &'a ManagedObject>,
) -> Result<Vec<T>, CoreError>
where
    T: TryFrom<&'a ManagedObject, Error = CoreError>,
{
    objects.into_iter().map(T::try_from).collect()
}

/// Convert every object of a listing, skipping (and logging) any that
/// cannot be decoded.
pub(crate) fn convert_lenient<'a, T>(objects: impl IntoIterator<Item = &'a ManagedObject>) -> Vec<T>
where
    T: TryFrom<&'a ManagedObject, Error = CoreError>,
{
    objects
        .into_iter()
        .filter_map(|mo| match T::try_from(mo) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "skipping undecodable object");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use ucsm_api::Dn;

    use super::*;

    #[test]
    fn vlan_from_fabric_specific_dn() {
        let mo = ManagedObject::new("fabricVlan", "fabric/lan/B/net-vlan666-b")
            .with_attr("id", "666")
            .with_attr("name", "vlan666-b")
            .with_attr("sharing", "none");
        let vlan = Vlan::try_from(&mo).unwrap();
        assert_eq!(vlan.id, 666);
        assert_eq!(vlan.fabric, FabricScope::B);
        assert_eq!(vlan.sharing.as_deref(), Some("none"));
    }

    #[test]
    fn vlan_with_bad_id_is_a_decode_error() {
        let mo = ManagedObject::new("fabricVlan", "fabric/lan/net-x")
            .with_attr("id", "seven")
            .with_attr("name", "x");
        let err = Vlan::try_from(&mo).unwrap_err();
        assert!(matches!(err, CoreError::Decode { ref message, .. } if message.contains("seven")));
    }

    #[test]
    fn wrong_class_is_rejected() {
        let mo = ManagedObject::new("fabricNetGroup", "fabric/lan/net-group-CORP")
            .with_attr("name", "CORP");
        assert!(Vlan::try_from(&mo).is_err());
        assert_eq!(VlanGroup::try_from(&mo).unwrap().name, "CORP");
    }

    #[test]
    fn pooled_vlan_name_falls_back_to_rn() {
        let mo = ManagedObject::new("fabricPooledVlan", "fabric/lan/net-group-CORP/net-vlan666");
        let pooled = PooledVlan::try_from(&mo).unwrap();
        assert_eq!(pooled.name, "vlan666");
        assert_eq!(pooled.group_dn, Some(Dn::from("fabric/lan/net-group-CORP")));
    }

    #[test]
    fn children_are_classified_by_class_id() {
        let pc = ManagedObject::new("fabricEthVlanPc", "fabric/lan/net-v/pc-switch-A-pc-10")
            .with_attr("switchId", "A")
            .with_attr("portId", "10");
        let child = FabricChild::try_from(&pc).unwrap();
        assert!(child.is_port_channel());

        let other = ManagedObject::new("swVlan", "fabric/lan/net-v/sw");
        let child = FabricChild::try_from(&other).unwrap();
        assert!(matches!(child, FabricChild::Other { ref class_id, .. } if class_id == "swVlan"));
    }

    #[test]
    fn new_binding_lives_under_the_group() {
        let group = VlanGroup {
            name: "CORP".into(),
            dn: Dn::from("fabric/lan/net-group-CORP"),
        };
        let mo = pooled_vlan_mo(&group, "vlan666");
        assert_eq!(mo.dn.as_str(), "fabric/lan/net-group-CORP/net-vlan666");
        assert_eq!(mo.name(), Some("vlan666"));
    }
}
