use super::partner_cmd::MEMBERS;
use super::Resource;
use crate::form::ConfirmedDelete;
use crate::models::transaction::{
    CreateTransactionPayload, Transaction, TransactionKind, TransactionStatus, UpdateStatusPayload,
};
use crate::query::ListController;
use crate::validation;
use crate::AppState;

pub fn resource(kind: TransactionKind) -> Resource {
    Resource::new(kind.namespace(), kind.path())
}

/// Namespace lain yang ikut berubah: stok barang (dipotong / dikembalikan
/// server) dan total transaksi member.
pub fn related_namespaces(kind: TransactionKind) -> Vec<&'static str> {
    let mut namespaces: Vec<&'static str> = kind.stock_kind().map(|s| s.namespace()).into_iter().collect();
    namespaces.push(MEMBERS.namespace);
    namespaces
}

pub fn transaction_list(state: &AppState, kind: TransactionKind) -> ListController<Transaction> {
    resource(kind).list(state)
}

/// Buat transaksi baru
pub async fn create_transaction(
    state: &AppState,
    kind: TransactionKind,
    payload: &CreateTransactionPayload,
) -> Result<Transaction, String> {
    if payload.items.is_empty() {
        return Err("Keranjang kosong".into());
    }

    for item in &payload.items {
        validation::validate_required("Nama produk", &item.product_name)?;
        validation::validate_quantity(item.quantity, Some(1), None)?;
        validation::validate_amount(item.unit_price, None, None)?;
    }

    resource(kind)
        .create(state, payload, &related_namespaces(kind))
        .await
}

pub async fn update_status(
    state: &AppState,
    kind: TransactionKind,
    id: i64,
    status: TransactionStatus,
) -> Result<(), String> {
    resource(kind)
        .patch(
            state,
            id,
            "status",
            &UpdateStatusPayload { status },
            &related_namespaces(kind),
        )
        .await
}

/// Hapus transaksi. Server mengembalikan stok barangnya.
pub async fn delete_transaction(
    state: &AppState,
    kind: TransactionKind,
    target: ConfirmedDelete,
) -> Result<(), String> {
    resource(kind)
        .delete(state, target, &related_namespaces(kind))
        .await
}
