use serde::{Deserialize, Serialize};

/// Reseller di bawah konter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Downline {
    pub id: i64,
    #[serde(rename = "kode")]
    pub code: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// Pelanggan tetap, `total_transaction` diakumulasi server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "noHp", alias = "phone")]
    pub phone: String,
    #[serde(rename = "totalTransaksi", default)]
    pub total_transaction: f64,
}
