use serde::{Deserialize, Serialize};

use super::stock::StockKind;

/// Jenis transaksi, masing-masing punya endpoint sendiri.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Voucher,
    Accessory,
    Sparepart,
    Service,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 4] = [
        TransactionKind::Voucher,
        TransactionKind::Accessory,
        TransactionKind::Sparepart,
        TransactionKind::Service,
    ];

    pub fn namespace(&self) -> &'static str {
        match self {
            TransactionKind::Voucher => "transactions-voucher",
            TransactionKind::Accessory => "transactions-accessory",
            TransactionKind::Sparepart => "transactions-sparepart",
            TransactionKind::Service => "transactions-service",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            TransactionKind::Voucher => "/transactions/voucher",
            TransactionKind::Accessory => "/transactions/accessory",
            TransactionKind::Sparepart => "/transactions/sparepart",
            TransactionKind::Service => "/transactions/service",
        }
    }

    /// Stok yang ikut berubah ketika transaksi dibuat atau dihapus.
    /// Servis tidak memotong stok.
    pub fn stock_kind(&self) -> Option<StockKind> {
        match self {
            TransactionKind::Voucher => Some(StockKind::Voucher),
            TransactionKind::Accessory => Some(StockKind::Accessory),
            TransactionKind::Sparepart => Some(StockKind::Sparepart),
            TransactionKind::Service => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionItem {
    #[serde(rename = "produkId", default)]
    pub product_id: Option<i64>,
    #[serde(rename = "namaProduk")]
    pub product_name: String,
    #[serde(rename = "qty")]
    pub quantity: i64,
    #[serde(rename = "hargaSatuan")]
    pub unit_price: f64,
}

impl TransactionItem {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "namaPembeli", default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<TransactionItem>,
    pub total: f64,
    #[serde(rename = "keuntungan", default)]
    pub profit: f64,
    pub status: TransactionStatus,
    /// `YYYY-MM-DD` atau RFC 3339, tergantung endpoint.
    #[serde(rename = "tanggal", alias = "createdAt")]
    pub date: String,
}

/// Payload aksi penjualan. Total dan profit dihitung server.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransactionPayload {
    #[serde(rename = "namaPembeli", skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(rename = "memberId", skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    pub items: Vec<TransactionItem>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateStatusPayload {
    pub status: TransactionStatus,
}
