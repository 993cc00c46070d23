// XML document model for the UCS Manager wire format
//
// Requests and responses are small, attribute-heavy documents. They are
// parsed into a plain element tree with quick-xml and interpreted by the
// method modules (auth, query, staging).

use std::fmt::Write as _;

use indexmap::IndexMap;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Error;
use crate::mo::{Dn, ManagedObject};

/// Attributes lifted out of the attribute map when building a `ManagedObject`.
const RESERVED_ATTRS: &[&str] = &["dn", "rn", "status", "childAction"];

/// A parsed (or to-be-written) XML element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub(crate) fn with_attrs<'a>(
        mut self,
        attrs: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        for (key, value) in attrs {
            self.attributes.insert(key.clone(), value.clone());
        }
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First direct child with the given element name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    // ── Writing ──────────────────────────────────────────────────────

    /// Serialize to a compact XML string (no declaration).
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape(value.as_str()));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_into(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }

    // ── Parsing ──────────────────────────────────────────────────────

    /// Parse a complete document into its root element.
    pub fn parse(body: &str) -> Result<Self, Error> {
        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| decode_error(format!("malformed XML: {e}"), body))?;
            match event {
                Event::Start(start) => stack.push(element_from(&start, body)?),
                Event::Empty(start) => {
                    let element = element_from(&start, body)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| decode_error("unbalanced closing tag".into(), body))?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(decode_error("unexpected end of document".into(), body));
        }
        root.ok_or_else(|| decode_error("empty response body".into(), body))
    }
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    }
}

fn element_from(start: &BytesStart<'_>, body: &str) -> Result<XmlElement, Error> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| decode_error(format!("invalid element name: {e}"), body))?
        .to_owned();

    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| decode_error(format!("invalid attribute: {e}"), body))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| decode_error(format!("invalid attribute name: {e}"), body))?
            .to_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| decode_error(format!("invalid attribute value: {e}"), body))?
            .into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn decode_error(message: String, body: &str) -> Error {
    Error::Deserialization {
        message,
        body: body.to_owned(),
    }
}

// ── Response interpretation ──────────────────────────────────────────

/// Verify that `root` answers `method` and carries no `errorCode`.
pub(crate) fn check_response(root: &XmlElement, method: &str) -> Result<(), Error> {
    if let Some(code) = root.attr("errorCode") {
        let message = root.attr("errorDescr").unwrap_or("no description");
        return Err(Error::from_api(code, message));
    }
    if root.name != method {
        return Err(Error::Deserialization {
            message: format!("expected <{method}> response, got <{}>", root.name),
            body: root.to_xml(),
        });
    }
    Ok(())
}

/// Convert the object elements below `container` into managed objects.
///
/// Top-level objects must carry a `dn`; nested children usually only carry
/// an `rn`, which is joined onto their parent's DN. With `hierarchical`
/// set, the subtree is flattened depth-first, parents before children.
pub(crate) fn collect_objects(
    container: &XmlElement,
    parent: Option<&Dn>,
    hierarchical: bool,
    out: &mut Vec<ManagedObject>,
) -> Result<(), Error> {
    for element in &container.children {
        let dn = match (element.attr("dn"), element.attr("rn"), parent) {
            (Some(dn), _, _) => Dn::from(dn),
            (None, Some(rn), Some(parent)) => parent.child(rn),
            _ => {
                return Err(Error::Deserialization {
                    message: format!("<{}> has neither dn nor a resolvable rn", element.name),
                    body: element.to_xml(),
                });
            }
        };

        let mut mo = ManagedObject::new(element.name.clone(), dn.clone());
        for (key, value) in &element.attributes {
            if !RESERVED_ATTRS.contains(&key.as_str()) {
                mo.attributes.insert(key.clone(), value.clone());
            }
        }
        out.push(mo);

        if hierarchical {
            collect_objects(element, Some(&dn), true, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn writes_escaped_attributes() {
        let doc = XmlElement::new("aaaLogin")
            .with_attr("inName", "admin")
            .with_attr("inPassword", "p<&\"w");
        assert_eq!(
            doc.to_xml(),
            r#"<aaaLogin inName="admin" inPassword="p&lt;&amp;&quot;w"/>"#
        );
    }

    #[test]
    fn parses_nested_elements() {
        let body = r#"<?xml version="1.0"?>
            <configResolveDn dn="fabric/lan/net-group-CORP" cookie="" response="yes">
              <outConfig>
                <fabricNetGroup dn="fabric/lan/net-group-CORP" name="CORP">
                  <fabricPooledVlan rn="net-vlan666" name="vlan666"/>
                </fabricNetGroup>
              </outConfig>
            </configResolveDn>"#;
        let root = XmlElement::parse(body).unwrap();
        assert_eq!(root.name, "configResolveDn");
        let out = root.child("outConfig").unwrap();
        assert_eq!(out.children.len(), 1);
        assert_eq!(out.children[0].children[0].attr("rn"), Some("net-vlan666"));
    }

    #[test]
    fn parse_rejects_truncated_documents() {
        let err = XmlElement::parse("<configResolveClass><outConfigs>").unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
        assert!(XmlElement::parse("").is_err());
    }

    #[test]
    fn error_code_becomes_api_error() {
        let root = XmlElement::parse(
            r#"<configConfMos response="yes" errorCode="103" errorDescr="already exists"/>"#,
        )
        .unwrap();
        let err = check_response(&root, "configConfMos").unwrap_err();
        assert!(matches!(err, Error::Api { ref code, .. } if code == "103"));
    }

    #[test]
    fn flattens_hierarchy_with_derived_dns() {
        let root = XmlElement::parse(
            r#"<outConfig>
                 <fabricVlan dn="fabric/lan/net-vlan666" id="666" name="vlan666" status="">
                   <fabricEthVlanPc rn="pc-switch-A-pc-10" switchId="A" portId="10"/>
                 </fabricVlan>
               </outConfig>"#,
        )
        .unwrap();
        let mut objects = Vec::new();
        collect_objects(&root, None, true, &mut objects).unwrap();

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].dn.as_str(), "fabric/lan/net-vlan666");
        assert_eq!(objects[0].attr("status"), None);
        assert_eq!(
            objects[1].dn.as_str(),
            "fabric/lan/net-vlan666/pc-switch-A-pc-10"
        );
        assert_eq!(objects[1].attr("switchId"), Some("A"));
    }
}
