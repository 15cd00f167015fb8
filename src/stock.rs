//! Modal penyesuaian stok: hitung delta bertanda dan preview stok akhir.
//!
//! Preview hanya perkiraan; nilai yang tersimpan selalu dari server.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    pub current: i64,
    pub direction: AdjustDirection,
    pub quantity: i64,
}

impl StockAdjustment {
    pub fn new(current: i64, direction: AdjustDirection, quantity: i64) -> Self {
        Self {
            current,
            direction,
            quantity,
        }
    }

    /// Positif = tambah, negatif = kurang.
    pub fn delta(&self) -> i64 {
        match self.direction {
            AdjustDirection::Increase => self.quantity,
            AdjustDirection::Decrease => -self.quantity,
        }
    }

    pub fn preview(&self) -> i64 {
        self.current + self.delta()
    }

    /// Delta yang boleh dikirim, atau alasan tombol simpan dinonaktifkan.
    pub fn validate(&self) -> Result<i64, AppError> {
        validation::validate_quantity(self.quantity, Some(1), None).map_err(AppError::Validation)?;

        if self.preview() < 0 {
            return Err(AppError::Validation(format!(
                "Stok akhir tidak boleh negatif (stok sekarang {})",
                self.current
            )));
        }

        Ok(self.delta())
    }
}
