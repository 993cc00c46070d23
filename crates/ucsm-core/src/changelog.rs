// ── Pending change log ──
//
// Human-readable record of every staged mutation plus one summary entry
// per move. Lives only in memory and is shown before a commit.

use std::fmt;

use serde::Serialize;
use ucsm_api::Dn;

/// One queued action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChangeEntry {
    /// An object staged for deletion.
    Remove { dn: Dn },
    /// An object staged for creation (or in-place update).
    Create { dn: Dn },
    /// Summary of one `move_vlan` call.
    MoveVlan {
        vlan_id: u16,
        source: Option<String>,
        target: Option<String>,
    },
}

impl ChangeEntry {
    /// `true` for entries backed by a staged remote mutation.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Remove { .. } | Self::Create { .. })
    }
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove { dn } => write!(f, "remove({dn})"),
            Self::Create { dn } => write!(f, "create({dn})"),
            Self::MoveVlan {
                vlan_id,
                source,
                target,
            } => write!(
                f,
                "move_vlan({vlan_id},source_name={},target_name={})",
                source.as_deref().unwrap_or("None"),
                target.as_deref().unwrap_or("None"),
            ),
        }
    }
}

/// Ordered list of pending entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeLog {
    entries: Vec<ChangeEntry>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ChangeEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries backed by a staged mutation.
    pub fn mutation_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_mutation()).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a ChangeEntry;
    type IntoIter = std::slice::Iter<'a, ChangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_render_as_call_notation() {
        let remove = ChangeEntry::Remove {
            dn: Dn::from("fabric/lan/net-group-CORP/net-vlan666"),
        };
        assert_eq!(
            remove.to_string(),
            "remove(fabric/lan/net-group-CORP/net-vlan666)"
        );

        let summary = ChangeEntry::MoveVlan {
            vlan_id: 666,
            source: None,
            target: Some("CORP".into()),
        };
        assert_eq!(
            summary.to_string(),
            "move_vlan(666,source_name=None,target_name=CORP)"
        );
    }

    #[test]
    fn mutation_count_skips_summaries() {
        let mut log = ChangeLog::new();
        log.push(ChangeEntry::Create {
            dn: Dn::from("fabric/lan/net-group-CORP/net-vlan666"),
        });
        log.push(ChangeEntry::MoveVlan {
            vlan_id: 666,
            source: None,
            target: Some("CORP".into()),
        });
        assert_eq!(log.len(), 2);
        assert_eq!(log.mutation_count(), 1);
    }
}
