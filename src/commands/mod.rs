//! Perintah per entitas. Tiap modul hanya merangkai ApiClient, QueryCache,
//! ListController dan MutationDispatcher untuk endpoint-nya sendiri.

pub mod auth_cmd;
pub mod ledger_cmd;
pub mod partner_cmd;
pub mod report_cmd;
pub mod stock_cmd;
pub mod transaction_cmd;
pub mod user_cmd;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::decode_record;
use crate::form::{ConfirmedDelete, ModalMode, Submission};
use crate::mutation::{action_key, MutationKind};
use crate::query::ListController;
use crate::AppState;

/// Endpoint REST satu entitas beserta namespace cache-nya.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub namespace: &'static str,
    pub path: &'static str,
}

impl Resource {
    pub const fn new(namespace: &'static str, path: &'static str) -> Self {
        Self { namespace, path }
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.path, id)
    }

    pub fn list<T: DeserializeOwned>(&self, state: &AppState) -> ListController<T> {
        ListController::new(self.namespace, self.path, state.page_size())
    }

    /// Namespace ini ditambah namespace lain yang ikut berubah.
    fn affected<'a>(&'a self, also: &[&'a str]) -> Vec<&'a str> {
        let mut namespaces = vec![self.namespace];
        namespaces.extend(also.iter().copied().filter(|ns| *ns != self.namespace));
        namespaces
    }

    pub async fn create<B, T>(&self, state: &AppState, body: &B, also: &[&str]) -> Result<T, String>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let action = action_key(self.namespace, MutationKind::Create, None);
        let value: Value = state
            .mutations
            .run(&state.cache, &action, &self.affected(also), state.api.post(self.path, body))
            .await?;
        Ok(decode_record(value, &[])?)
    }

    pub async fn update<B, T>(
        &self,
        state: &AppState,
        id: i64,
        body: &B,
        also: &[&str],
    ) -> Result<T, String>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let action = action_key(self.namespace, MutationKind::Update, Some(id));
        let path = self.item_path(id);
        let value: Value = state
            .mutations
            .run(&state.cache, &action, &self.affected(also), state.api.put(&path, body))
            .await?;
        Ok(decode_record(value, &[])?)
    }

    /// PATCH ke sub-path item, mis. `/vouchers/7/stock`. Isi respons diabaikan.
    pub async fn patch<B: Serialize>(
        &self,
        state: &AppState,
        id: i64,
        sub_path: &str,
        body: &B,
        also: &[&str],
    ) -> Result<(), String> {
        let action = action_key(self.namespace, MutationKind::Patch, Some(id));
        let path = format!("{}/{}", self.item_path(id), sub_path);
        let _: Value = state
            .mutations
            .run(&state.cache, &action, &self.affected(also), state.api.patch(&path, body))
            .await?;
        Ok(())
    }

    /// Hapus satu baris. Butuh token dari dialog konfirmasi.
    pub async fn delete(
        &self,
        state: &AppState,
        target: ConfirmedDelete,
        also: &[&str],
    ) -> Result<(), String> {
        let id = target.id();
        let action = action_key(self.namespace, MutationKind::Delete, Some(id));
        let path = self.item_path(id);
        state
            .mutations
            .run(&state.cache, &action, &self.affected(also), state.api.delete(&path))
            .await?;
        Ok(())
    }

    /// Kirim hasil modal form: create → POST, edit → PUT ke item.
    pub async fn submit<T: DeserializeOwned>(
        &self,
        state: &AppState,
        submission: &Submission,
        also: &[&str],
    ) -> Result<T, String> {
        match submission.mode {
            ModalMode::Create => self.create(state, &submission.payload, also).await,
            ModalMode::Edit(id) => self.update(state, id, &submission.payload, also).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affected_namespaces_start_with_own_and_skip_duplicates() {
        let resource = Resource::new("transactions-voucher", "/transactions/voucher");
        assert_eq!(
            resource.affected(&["vouchers", "transactions-voucher", "members"]),
            vec!["transactions-voucher", "vouchers", "members"]
        );
        assert_eq!(resource.item_path(4), "/transactions/voucher/4");
    }
}
