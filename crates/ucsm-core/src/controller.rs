// ── Controller abstraction ──
//
// Owns one UCS Manager session, the per-run object cache, and the pending
// change log. `move_vlan` only stages; nothing reaches the fabric until
// `commit` is confirmed. Every remote call is awaited in sequence, so a
// run never has two requests in flight.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use ucsm_api::transport::{TlsMode, TransportConfig};
use ucsm_api::{ClassId, ManagedObject, UcsClient};

use crate::changelog::{ChangeEntry, ChangeLog};
use crate::config::{ControllerConfig, TlsVerification};
use crate::convert::{self, convert_lenient, convert_strict};
use crate::error::CoreError;
use crate::model::{FabricChild, PooledVlan, Vlan, VlanGroup};
use crate::session::FabricSession;
use crate::store::ObjectCache;

// ── ConnectionState ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

// ── MoveRequest ──────────────────────────────────────────────────

/// Parameters of one VLAN move.
///
/// With no `source`, the VLAN is detached from every port channel instead
/// of from a group. With no `target`, nothing is created. A blank group
/// name counts as no group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveRequest {
    pub vlan_id: u16,
    pub source: Option<String>,
    pub target: Option<String>,
}

impl MoveRequest {
    pub fn new(vlan_id: u16) -> Self {
        Self {
            vlan_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_group(mut self, name: impl Into<String>) -> Self {
        self.source = Some(name.into());
        self
    }

    #[must_use]
    pub fn to_group(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }
}

// ── Commit confirmation ──────────────────────────────────────────

/// Result of [`Controller::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The change log was empty. No prompt, no remote call.
    NothingToCommit,
    /// The operator declined. Log and staged buffer are kept.
    Declined { pending: usize },
    /// The staged buffer was applied in one call.
    Committed { applied: usize },
}

/// Decides whether a pending change log gets committed.
pub trait Confirm {
    fn confirm(&mut self, pending: &ChangeLog) -> Result<bool, CoreError>;
}

impl<F> Confirm for F
where
    F: FnMut(&ChangeLog) -> Result<bool, CoreError>,
{
    fn confirm(&mut self, pending: &ChangeLog) -> Result<bool, CoreError> {
        self(pending)
    }
}

/// Approves every commit without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl Confirm for AutoApprove {
    fn confirm(&mut self, _pending: &ChangeLog) -> Result<bool, CoreError> {
        Ok(true)
    }
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Generic over the session so the migration logic runs unchanged against
/// an in-memory fabric in tests. Production code uses the default
/// [`UcsClient`] via [`Controller::new`] and [`Controller::connect`].
pub struct Controller<S = UcsClient> {
    config: ControllerConfig,
    session: Option<S>,
    cache: ObjectCache,
    change_log: ChangeLog,
}

impl Controller<UcsClient> {
    /// Create a new Controller from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to log in.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            session: None,
            cache: ObjectCache::new(),
            change_log: ChangeLog::new(),
        }
    }

    /// Open an authenticated session. A no-op when already connected.
    pub async fn connect(&mut self) -> Result<(), CoreError> {
        if self.session.is_some() {
            debug!("already connected");
            return Ok(());
        }

        let config = &self.config;
        let endpoint = UcsClient::endpoint(&config.host, config.secure, config.port)?;
        let client = UcsClient::new(endpoint.clone(), &build_transport(config))?;
        debug!(%endpoint, username = %config.username, "logging in");

        client
            .login(&config.username, &config.password)
            .await
            .map_err(|e| match CoreError::from(e) {
                CoreError::ConnectionFailed { reason, .. } => CoreError::ConnectionFailed {
                    url: endpoint.to_string(),
                    reason,
                },
                other => other,
            })?;

        info!(host = %config.host, "connected to UCS Manager");
        self.session = Some(client);
        Ok(())
    }
}

impl<S: FabricSession> Controller<S> {
    /// Wrap an already logged-in session.
    pub fn with_session(config: ControllerConfig, session: S) -> Self {
        Self {
            config,
            session: Some(session),
            cache: ObjectCache::new(),
            change_log: ChangeLog::new(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        if self.session.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn session(&self) -> Option<&S> {
        self.session.as_ref()
    }

    pub fn cache(&self) -> &ObjectCache {
        &self.cache
    }

    /// Entries queued since the last commit or discard.
    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    /// Log out and drop the session. Uncommitted changes are lost.
    pub async fn disconnect(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if !self.change_log.is_empty() {
            warn!(
                pending = self.change_log.len(),
                "disconnecting with uncommitted changes; they are discarded"
            );
        }
        if let Err(e) = session.logout().await {
            warn!(error = %e, "logout failed (non-fatal)");
        }
        self.cache.clear();
        self.change_log.clear();
        debug!("disconnected");
    }

    // ── Cached queries ───────────────────────────────────────────

    /// All objects of a class, queried at most once per cache lifetime.
    pub async fn fetch(&mut self, class_id: ClassId) -> Result<Arc<Vec<ManagedObject>>, CoreError> {
        if let Some(cached) = self.cache.get(class_id) {
            debug!(%class_id, "cache hit");
            return Ok(cached);
        }
        let session = connected(self.session.as_ref())?;
        let objects = session.query_class_id(class_id).await?;
        info!(%class_id, count = objects.len(), "local state updated");
        Ok(self.cache.insert(class_id, objects))
    }

    async fn typed<T>(&mut self, class_id: ClassId) -> Result<Vec<T>, CoreError>
    where
        T: for<'a> TryFrom<&'a ManagedObject, Error = CoreError>,
    {
        let objects = self.fetch(class_id).await?;
        Ok(convert_lenient(objects.iter()))
    }

    /// Like `typed`, but any undecodable object fails the call.
    async fn typed_strict<T>(&mut self, class_id: ClassId) -> Result<Vec<T>, CoreError>
    where
        T: for<'a> TryFrom<&'a ManagedObject, Error = CoreError>,
    {
        let objects = self.fetch(class_id).await?;
        convert_strict(objects.iter())
    }

    /// Every VLAN with `vlan_id`, across all fabric scopes.
    ///
    /// Zero matches is an error. More than one match in the same scope
    /// is logged, since a scope normally holds each id once. Unlike
    /// [`show_vlan`](Self::show_vlan), a VLAN that cannot be decoded fails
    /// the lookup instead of being skipped.
    pub async fn find_vlans(&mut self, vlan_id: u16) -> Result<Vec<Vlan>, CoreError> {
        let vlans: Vec<Vlan> = self.typed_strict(ClassId::FabricVlan).await?;
        let matched: Vec<Vlan> = vlans.into_iter().filter(|v| v.id == vlan_id).collect();
        if matched.is_empty() {
            return Err(CoreError::VlanNotFound { vlan_id });
        }

        let mut scopes = HashSet::new();
        if !matched.iter().all(|v| scopes.insert(v.fabric)) {
            warn!(
                vlan_id,
                count = matched.len(),
                dns = ?matched.iter().map(|v| v.dn.as_str()).collect::<Vec<_>>(),
                "several VLANs share this id within one fabric scope"
            );
        }
        debug!(vlan_id, count = matched.len(), "resolved VLAN id");
        Ok(matched)
    }

    // ── Read-only views ──────────────────────────────────────────

    /// VLANs carrying `vlan_id`. Empty when none exist.
    pub async fn show_vlan(&mut self, vlan_id: u16) -> Result<Vec<Vlan>, CoreError> {
        let vlans: Vec<Vlan> = self.typed(ClassId::FabricVlan).await?;
        Ok(vlans.into_iter().filter(|v| v.id == vlan_id).collect())
    }

    pub async fn show_vlan_groups(&mut self) -> Result<Vec<VlanGroup>, CoreError> {
        self.typed(ClassId::FabricNetGroup).await
    }

    pub async fn show_pooled_vlans(&mut self) -> Result<Vec<PooledVlan>, CoreError> {
        self.typed(ClassId::FabricPooledVlan).await
    }

    // ── Staging ──────────────────────────────────────────────────

    /// Stage the move of every VLAN with `request.vlan_id`.
    ///
    /// Both group names are resolved before anything is staged, so a
    /// resolution error leaves the session untouched. Returns the VLANs
    /// that were acted on.
    pub async fn move_vlan(&mut self, request: &MoveRequest) -> Result<Vec<Vlan>, CoreError> {
        info!(
            vlan_id = request.vlan_id,
            source = ?request.source,
            target = ?request.target,
            "staging VLAN move"
        );

        let source_name = group_name(request.source.as_deref());
        let target_name = group_name(request.target.as_deref());

        let targets = self.find_vlans(request.vlan_id).await?;
        let groups: Vec<VlanGroup> = self.typed_strict(ClassId::FabricNetGroup).await?;
        let source = source_name
            .map(|name| resolve_group(&groups, name))
            .transpose()?;
        let target = target_name
            .map(|name| resolve_group(&groups, name))
            .transpose()?;

        match &source {
            Some(group) => self.unbind_from_group(group, &targets).await?,
            None => self.detach_port_channels(&targets).await?,
        }

        if let Some(group) = &target {
            let session = connected(self.session.as_ref())?;
            for vlan in &targets {
                let mo = convert::pooled_vlan_mo(group, &vlan.name);
                let dn = mo.dn.clone();
                session.add_mo(mo, true);
                debug!(%dn, "staged create");
                self.change_log.push(ChangeEntry::Create { dn });
            }
        }

        self.change_log.push(ChangeEntry::MoveVlan {
            vlan_id: request.vlan_id,
            source: source_name.map(str::to_owned),
            target: target_name.map(str::to_owned),
        });
        Ok(targets)
    }

    /// Stage removal of the source group's pooled VLANs that name one of
    /// `targets`. The group itself stays.
    async fn unbind_from_group(&mut self, group: &VlanGroup, targets: &[Vlan]) -> Result<(), CoreError> {
        let session = connected(self.session.as_ref())?;
        let names: HashSet<&str> = targets.iter().map(|v| v.name.as_str()).collect();
        let tree = session.query_dn(&group.dn, true).await?;

        for mo in tree.iter().filter(|mo| mo.dn.is_descendant_of(&group.dn)) {
            let child = FabricChild::try_from(mo)?;
            if child.pooled_vlan_name().is_some_and(|name| names.contains(name)) {
                stage_remove(session, &mut self.change_log, mo);
            }
        }
        Ok(())
    }

    /// Stage removal of every port-channel membership under each VLAN.
    async fn detach_port_channels(&mut self, targets: &[Vlan]) -> Result<(), CoreError> {
        let session = connected(self.session.as_ref())?;
        for vlan in targets {
            let tree = session.query_dn(&vlan.dn, true).await?;
            for mo in tree.iter().filter(|mo| mo.dn.is_descendant_of(&vlan.dn)) {
                if FabricChild::try_from(mo)?.is_port_channel() {
                    stage_remove(session, &mut self.change_log, mo);
                }
            }
        }
        Ok(())
    }

    // ── Commit ───────────────────────────────────────────────────

    /// Apply everything staged in one remote call, after `confirm` agrees.
    ///
    /// On success the cache and the change log are cleared. On failure both
    /// are kept and the error reports how many changes were in flight.
    pub async fn commit(&mut self, confirm: &mut impl Confirm) -> Result<CommitOutcome, CoreError> {
        if self.change_log.is_empty() {
            info!("nothing to commit");
            return Ok(CommitOutcome::NothingToCommit);
        }
        let session = connected(self.session.as_ref())?;

        if !confirm.confirm(&self.change_log)? {
            let pending = self.change_log.len();
            info!(pending, "commit declined; staged changes kept");
            return Ok(CommitOutcome::Declined { pending });
        }

        let staged = session.staged_count();
        session
            .commit()
            .await
            .map_err(|e| CoreError::CommitFailed {
                staged,
                message: e.to_string(),
            })?;
        info!(applied = staged, "remote state changes committed");

        self.cache.clear();
        self.change_log.clear();
        debug!("local state cleared");
        Ok(CommitOutcome::Committed { applied: staged })
    }

    /// Drop every staged change and the change log without committing.
    /// Returns the number of staged objects dropped.
    pub fn discard(&mut self) -> usize {
        let dropped = self.session.as_ref().map_or(0, FabricSession::discard_staged);
        self.change_log.clear();
        if dropped > 0 {
            info!(dropped, "staged changes discarded");
        }
        dropped
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn connected<S>(session: Option<&S>) -> Result<&S, CoreError> {
    session.ok_or(CoreError::NotConnected)
}

fn stage_remove<S: FabricSession>(session: &S, log: &mut ChangeLog, mo: &ManagedObject) {
    session.remove_mo(mo);
    debug!(dn = %mo.dn, "staged remove");
    log.push(ChangeEntry::Remove { dn: mo.dn.clone() });
}

/// A trimmed group name, or `None` when absent or blank.
fn group_name(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}

fn resolve_group(groups: &[VlanGroup], name: &str) -> Result<VlanGroup, CoreError> {
    groups
        .iter()
        .find(|g| g.name == name)
        .cloned()
        .ok_or_else(|| CoreError::VlanGroupNotFound {
            name: name.to_owned(),
            available: groups.iter().map(|g| g.name.clone()).collect(),
        })
}

/// Build a [`TransportConfig`] from the controller configuration.
fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ucsm_api::Dn;

    use super::*;
    use crate::model::FabricScope;

    fn group(name: &str) -> VlanGroup {
        VlanGroup {
            name: name.into(),
            dn: Dn::from(format!("fabric/lan/net-group-{name}")),
        }
    }

    #[test]
    fn unknown_group_lists_the_available_ones() {
        let groups = vec![group("CORP"), group("DMZ")];
        let err = resolve_group(&groups, "LAB").unwrap_err();
        match err {
            CoreError::VlanGroupNotFound { name, available } => {
                assert_eq!(name, "LAB");
                assert_eq!(available, vec!["CORP", "DMZ"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_group_names_mean_no_group() {
        assert_eq!(group_name(None), None);
        assert_eq!(group_name(Some("")), None);
        assert_eq!(group_name(Some("   ")), None);
        assert_eq!(group_name(Some(" OLD ")), Some("OLD"));
    }

    #[test]
    fn move_request_builder() {
        let req = MoveRequest::new(666).from_group("OLD").to_group("NEW");
        assert_eq!(req.vlan_id, 666);
        assert_eq!(req.source.as_deref(), Some("OLD"));
        assert_eq!(req.target.as_deref(), Some("NEW"));
    }

    #[test]
    fn closures_act_as_confirmers() {
        let log = ChangeLog::new();
        let mut seen = 0;
        let mut confirm = |pending: &ChangeLog| -> Result<bool, CoreError> {
            seen = pending.len() + 1;
            Ok(false)
        };
        assert!(!Confirm::confirm(&mut confirm, &log).unwrap());
        assert_eq!(seen, 1);
        assert!(AutoApprove.confirm(&log).unwrap());
    }

    #[test]
    fn transport_follows_tls_setting() {
        let mut config = ControllerConfig::new("ucs", "admin", "pw".to_owned().into());
        config.tls = TlsVerification::SystemDefaults;
        let transport = build_transport(&config);
        assert!(matches!(transport.tls, TlsMode::System));
        assert_eq!(transport.timeout, config.timeout);
    }

    #[test]
    fn fabric_scope_is_hashable_for_duplicate_checks() {
        let mut scopes = HashSet::new();
        assert!(scopes.insert(FabricScope::A));
        assert!(!scopes.insert(FabricScope::A));
    }
}
