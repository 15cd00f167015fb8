use super::Resource;
use crate::form::{ConfirmedDelete, Submission};
use crate::models::ledger::{CashEntry, UnexpectedEntry};
use crate::query::ListController;
use crate::AppState;

pub const UNEXPECTED: Resource = Resource::new("unexpected", "/unexpected");
pub const CASH: Resource = Resource::new("uang-modal", "/uang-modal");

pub fn unexpected_list(state: &AppState) -> ListController<UnexpectedEntry> {
    UNEXPECTED.list(state)
}

pub async fn save_unexpected(
    state: &AppState,
    submission: &Submission,
) -> Result<UnexpectedEntry, String> {
    UNEXPECTED.submit(state, submission, &[]).await
}

pub async fn delete_unexpected(state: &AppState, target: ConfirmedDelete) -> Result<(), String> {
    UNEXPECTED.delete(state, target, &[]).await
}

/// Uang modal per lokasi.
pub fn cash_list(state: &AppState) -> ListController<CashEntry> {
    CASH.list(state)
}

pub async fn save_cash(state: &AppState, submission: &Submission) -> Result<CashEntry, String> {
    CASH.submit(state, submission, &[]).await
}

pub async fn delete_cash(state: &AppState, target: ConfirmedDelete) -> Result<(), String> {
    CASH.delete(state, target, &[]).await
}
