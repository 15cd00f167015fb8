use super::Resource;
use crate::form::{ConfirmedDelete, Submission};
use crate::log_info;
use crate::models::stock::{StockDeltaPayload, StockItem, StockKind, Voucher};
use crate::query::ListController;
use crate::stock::StockAdjustment;
use crate::AppState;

pub fn resource(kind: StockKind) -> Resource {
    Resource::new(kind.namespace(), kind.path())
}

pub fn voucher_list(state: &AppState) -> ListController<Voucher> {
    resource(StockKind::Voucher).list(state)
}

/// List aksesoris / sparepart (bentuk barangnya sama).
pub fn item_list(state: &AppState, kind: StockKind) -> Result<ListController<StockItem>, String> {
    if kind == StockKind::Voucher {
        return Err("Voucher memakai voucher_list".into());
    }
    Ok(resource(kind).list(state))
}

pub async fn save_voucher(state: &AppState, submission: &Submission) -> Result<Voucher, String> {
    resource(StockKind::Voucher).submit(state, submission, &[]).await
}

pub async fn save_item(
    state: &AppState,
    kind: StockKind,
    submission: &Submission,
) -> Result<StockItem, String> {
    resource(kind).submit(state, submission, &[]).await
}

pub async fn delete_stock(
    state: &AppState,
    kind: StockKind,
    target: ConfirmedDelete,
) -> Result<(), String> {
    resource(kind).delete(state, target, &[]).await
}

/// Kirim penyesuaian stok sebagai delta bertanda. Stok baru dibaca ulang dari server.
pub async fn adjust_stock(
    state: &AppState,
    kind: StockKind,
    id: i64,
    adjustment: &StockAdjustment,
) -> Result<(), String> {
    let delta = adjustment.validate()?;

    resource(kind)
        .patch(state, id, "stock", &StockDeltaPayload { delta }, &[])
        .await?;

    log_info!("STOCK", "Stok disesuaikan", serde_json::json!({
        "kind": kind.namespace(),
        "id": id,
        "delta": delta,
        "preview": adjustment.preview()
    }));

    Ok(())
}
