// Configuration queries
//
// `configResolveClass` lists every object of a class; `configResolveDn`
// fetches one object and, optionally, its whole subtree.

use tracing::debug;

use crate::client::UcsClient;
use crate::error::Error;
use crate::mo::{ClassId, Dn, ManagedObject};
use crate::xml::{self, XmlElement};

impl UcsClient {
    /// List all objects of `class_id`, in controller order.
    ///
    /// `configResolveClass classId="{class_id}" inHierarchical="false"`
    pub async fn query_class_id(&self, class_id: ClassId) -> Result<Vec<ManagedObject>, Error> {
        let request = XmlElement::new("configResolveClass")
            .with_attr("cookie", self.cookie()?)
            .with_attr("classId", class_id.as_ref())
            .with_attr("inHierarchical", "false");

        debug!(%class_id, "resolving class");
        let root = self.post(&request).await?;

        let mut objects = Vec::new();
        if let Some(out) = root.child("outConfigs") {
            xml::collect_objects(out, None, false, &mut objects)?;
        }
        debug!(%class_id, count = objects.len(), "class resolved");
        Ok(objects)
    }

    /// Fetch the object at `dn`.
    ///
    /// With `hierarchical` set the result is the object followed by every
    /// descendant, depth-first. An unknown DN yields an empty list.
    ///
    /// `configResolveDn dn="{dn}" inHierarchical="{hierarchical}"`
    pub async fn query_dn(&self, dn: &Dn, hierarchical: bool) -> Result<Vec<ManagedObject>, Error> {
        let request = XmlElement::new("configResolveDn")
            .with_attr("cookie", self.cookie()?)
            .with_attr("dn", dn.as_str())
            .with_attr("inHierarchical", if hierarchical { "true" } else { "false" });

        debug!(%dn, hierarchical, "resolving dn");
        let root = self.post(&request).await?;

        let mut objects = Vec::new();
        if let Some(out) = root.child("outConfig") {
            xml::collect_objects(out, None, hierarchical, &mut objects)?;
        }
        Ok(objects)
    }
}
