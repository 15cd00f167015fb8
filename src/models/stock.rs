use serde::{Deserialize, Serialize};

/// Stok voucher (paket data / pulsa) per lokasi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: i64,
    pub brand: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "stok")]
    pub stock: i64,
    #[serde(rename = "hargaModal")]
    pub cost_price: f64,
    #[serde(rename = "hargaGrosir", default)]
    pub wholesale_price: Option<f64>,
    #[serde(rename = "hargaJual")]
    pub retail_price: f64,
    #[serde(rename = "lokasi", default)]
    pub location: Option<String>,
}

/// Aksesoris dan sparepart berbagi bentuk yang sama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: i64,
    #[serde(default)]
    pub barcode: Option<String>,
    pub brand: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "kategori", default)]
    pub category: Option<String>,
    #[serde(rename = "stok")]
    pub stock: i64,
    #[serde(rename = "hargaModal")]
    pub cost_price: f64,
    #[serde(rename = "hargaJual")]
    pub sell_price: f64,
    #[serde(rename = "lokasi", default)]
    pub location: Option<String>,
}

/// Jenis barang stok yang punya halaman sendiri di dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockKind {
    Voucher,
    Accessory,
    Sparepart,
}

impl StockKind {
    pub fn namespace(&self) -> &'static str {
        match self {
            StockKind::Voucher => "vouchers",
            StockKind::Accessory => "accessories",
            StockKind::Sparepart => "spareparts",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            StockKind::Voucher => "/vouchers",
            StockKind::Accessory => "/accessories",
            StockKind::Sparepart => "/spareparts",
        }
    }
}

/// Payload `PATCH /<stok>/{id}/stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDeltaPayload {
    pub delta: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voucher_uses_api_field_names() {
        let json = serde_json::json!({
            "id": 7,
            "brand": "XL",
            "nama": "Paket 5GB",
            "stok": 10,
            "hargaModal": 10000,
            "hargaJual": 15000
        });
        let voucher: Voucher = serde_json::from_value(json).unwrap();
        assert_eq!(voucher.name, "Paket 5GB");
        assert_eq!(voucher.stock, 10);
        assert_eq!(voucher.wholesale_price, None);
        assert_eq!(voucher.location, None);
    }

    #[test]
    fn stock_item_tolerates_missing_optional_fields() {
        let json = serde_json::json!({
            "id": 1,
            "brand": "Samsung",
            "nama": "LCD A10",
            "stok": 2,
            "hargaModal": 250000,
            "hargaJual": 350000
        });
        let item: StockItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.barcode, None);
        assert_eq!(item.category, None);
    }
}
