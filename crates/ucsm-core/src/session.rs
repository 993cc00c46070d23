// ── Fabric session seam ──
//
// The controller talks to UCS Manager through this trait so the migration
// logic can be exercised against an in-memory fabric. `UcsClient` is the
// production implementation.

use std::future::Future;

use secrecy::SecretString;
use ucsm_api::{ClassId, Dn, ManagedObject, UcsClient};

/// A logged-in connection with a local staging buffer.
///
/// `add_mo` / `remove_mo` only stage; `commit` applies everything staged
/// in one remote call.
pub trait FabricSession: Send + Sync {
    fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<(), ucsm_api::Error>> + Send;

    fn logout(&self) -> impl Future<Output = Result<(), ucsm_api::Error>> + Send;

    fn query_class_id(
        &self,
        class_id: ClassId,
    ) -> impl Future<Output = Result<Vec<ManagedObject>, ucsm_api::Error>> + Send;

    /// The object at `dn`, followed by its subtree when `hierarchical`.
    fn query_dn(
        &self,
        dn: &Dn,
        hierarchical: bool,
    ) -> impl Future<Output = Result<Vec<ManagedObject>, ucsm_api::Error>> + Send;

    fn add_mo(&self, mo: ManagedObject, modify_present: bool);

    fn remove_mo(&self, mo: &ManagedObject);

    fn staged_count(&self) -> usize;

    fn discard_staged(&self) -> usize;

    fn commit(&self) -> impl Future<Output = Result<Vec<ManagedObject>, ucsm_api::Error>> + Send;
}

impl FabricSession for UcsClient {
    async fn login(&self, username: &str, password: &SecretString) -> Result<(), ucsm_api::Error> {
        UcsClient::login(self, username, password).await
    }

    async fn logout(&self) -> Result<(), ucsm_api::Error> {
        UcsClient::logout(self).await
    }

    async fn query_class_id(
        &self,
        class_id: ClassId,
    ) -> Result<Vec<ManagedObject>, ucsm_api::Error> {
        UcsClient::query_class_id(self, class_id).await
    }

    async fn query_dn(
        &self,
        dn: &Dn,
        hierarchical: bool,
    ) -> Result<Vec<ManagedObject>, ucsm_api::Error> {
        UcsClient::query_dn(self, dn, hierarchical).await
    }

    fn add_mo(&self, mo: ManagedObject, modify_present: bool) {
        UcsClient::add_mo(self, mo, modify_present);
    }

    fn remove_mo(&self, mo: &ManagedObject) {
        UcsClient::remove_mo(self, mo);
    }

    fn staged_count(&self) -> usize {
        UcsClient::staged_count(self)
    }

    fn discard_staged(&self) -> usize {
        UcsClient::discard_staged(self)
    }

    async fn commit(&self) -> Result<Vec<ManagedObject>, ucsm_api::Error> {
        UcsClient::commit(self).await
    }
}
