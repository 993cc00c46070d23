// Staged configuration changes
//
// `add_mo` / `remove_mo` only record intent locally. Nothing reaches the
// controller until `commit`, which sends every staged object in a single
// `configConfMos` call.

use tracing::{debug, info};

use crate::client::UcsClient;
use crate::error::Error;
use crate::mo::{ManagedObject, MoStatus};
use crate::xml::{self, XmlElement};

/// One pending change: the object as it should be sent, and its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedMo {
    pub mo: ManagedObject,
    pub status: MoStatus,
}

impl StagedMo {
    /// The `<pair key="{dn}">` element for `configConfMos`.
    fn to_pair(&self) -> XmlElement {
        let object = XmlElement::new(self.mo.class_id.clone())
            .with_attr("dn", self.mo.dn.as_str())
            .with_attrs(&self.mo.attributes)
            .with_attr("status", self.status.as_str());
        XmlElement::new("pair")
            .with_attr("key", self.mo.dn.as_str())
            .with_child(object)
    }
}

impl UcsClient {
    /// Stage the creation of `mo`.
    ///
    /// With `modify_present` the controller updates an existing object at
    /// the same DN instead of rejecting the commit.
    pub fn add_mo(&self, mo: ManagedObject, modify_present: bool) {
        let status = if modify_present {
            MoStatus::CreatedModified
        } else {
            MoStatus::Created
        };
        self.stage(mo, status);
    }

    /// Stage the removal of `mo` (and, on the controller, its subtree).
    pub fn remove_mo(&self, mo: &ManagedObject) {
        self.stage(
            ManagedObject::new(mo.class_id.clone(), mo.dn.clone()),
            MoStatus::Deleted,
        );
    }

    fn stage(&self, mo: ManagedObject, status: MoStatus) {
        debug!(dn = %mo.dn, status = status.as_str(), "staging change");
        // A later change for the same DN replaces the earlier one in place.
        self.staged_buffer()
            .insert(mo.dn.clone(), StagedMo { mo, status });
    }

    /// Snapshot of the pending changes, in staging order.
    pub fn staged(&self) -> Vec<StagedMo> {
        self.staged_buffer().values().cloned().collect()
    }

    pub fn staged_count(&self) -> usize {
        self.staged_buffer().len()
    }

    /// Drop every pending change. Returns how many were discarded.
    pub fn discard_staged(&self) -> usize {
        let mut buffer = self.staged_buffer();
        let count = buffer.len();
        buffer.clear();
        count
    }

    /// Send all staged changes in one `configConfMos` call.
    ///
    /// Returns the objects echoed back by the controller. An empty buffer
    /// returns immediately without contacting the controller. On failure
    /// the buffer is left intact.
    pub async fn commit(&self) -> Result<Vec<ManagedObject>, Error> {
        let pending = self.staged();
        if pending.is_empty() {
            debug!("nothing staged, skipping configConfMos");
            return Ok(Vec::new());
        }

        let request = XmlElement::new("configConfMos")
            .with_attr("cookie", self.cookie()?)
            .with_attr("inHierarchical", "false")
            .with_child(
                XmlElement::new("inConfigs").with_children(pending.iter().map(StagedMo::to_pair)),
            );

        info!(count = pending.len(), "committing staged changes");
        let root = self.post(&request).await?;
        self.discard_staged();

        let mut objects = Vec::new();
        if let Some(out) = root.child("outConfigs") {
            for pair in out.children.iter().filter(|c| c.name == "pair") {
                xml::collect_objects(pair, None, false, &mut objects)?;
            }
        }
        Ok(objects)
    }
}
