use serde::{Deserialize, Serialize};

/// Kejadian tak terduga (selisih kas, barang rusak, dll) yang dicatat terhadap transaksi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnexpectedEntry {
    pub id: i64,
    #[serde(rename = "transaksiId", default)]
    pub transaction_ref: Option<i64>,
    #[serde(rename = "jumlah")]
    pub amount: f64,
    #[serde(rename = "keterangan")]
    pub description: String,
    #[serde(rename = "tanggal")]
    pub date: String,
}

/// Catatan uang modal per lokasi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEntry {
    pub id: i64,
    #[serde(rename = "keterangan")]
    pub description: String,
    #[serde(rename = "jumlah")]
    pub amount: f64,
    #[serde(rename = "lokasi")]
    pub location: String,
    #[serde(rename = "tanggal")]
    pub date: String,
}
