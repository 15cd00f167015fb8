use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{AppError, AppResult};

/// Satu halaman hasil list. Total dari server dipakai apa adanya.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            total_pages: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Key array data yang pernah dipakai endpoint list.
const DATA_KEYS: [&str; 3] = ["data", "formatted", "items"];

fn as_count(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn meta_count(obj: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    let meta = obj.get("meta").and_then(Value::as_object);
    keys.iter().find_map(|key| {
        as_count(meta.and_then(|m| m.get(*key))).or_else(|| as_count(obj.get(*key)))
    })
}

impl Page<Value> {
    /// Normalisasi respons list ke satu bentuk envelope.
    ///
    /// Diterima: array polos, `{data|formatted|items: [...]}` dengan metadata di
    /// `meta` atau top-level (`total` / `totalItems`, `totalPages`).
    pub fn from_response(value: Value) -> AppResult<Self> {
        match value {
            Value::Array(items) => Ok(Self::single(items)),
            Value::Object(obj) => {
                let items = DATA_KEYS
                    .iter()
                    .find_map(|key| obj.get(*key).and_then(Value::as_array))
                    .cloned()
                    .ok_or_else(|| {
                        AppError::Decode("respons list tidak berisi array data".into())
                    })?;

                let fallback = Self::single(items);
                let total = meta_count(&obj, &["total", "totalItems"]).unwrap_or(fallback.total);
                let total_pages = meta_count(&obj, &["totalPages"]).unwrap_or(fallback.total_pages);

                Ok(Self {
                    data: fallback.data,
                    total,
                    total_pages,
                })
            }
            other => Err(AppError::Decode(format!(
                "respons list tidak dikenal: {}",
                other
            ))),
        }
    }

    fn single(items: Vec<Value>) -> Self {
        let total = items.len() as u64;
        Self {
            data: items,
            total,
            total_pages: if total > 0 { 1 } else { 0 },
        }
    }

    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<Page<T>> {
        let data = self
            .data
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;

        Ok(Page {
            data,
            total: self.total,
            total_pages: self.total_pages,
        })
    }
}

/// Ambil satu record dari respons mutasi / detail: `{data: {...}}`,
/// `{<wrapper>: {...}}` atau objek polos.
pub fn decode_record<T: DeserializeOwned>(value: Value, wrappers: &[&str]) -> AppResult<T> {
    let inner = match &value {
        Value::Object(obj) => wrappers
            .iter()
            .chain(std::iter::once(&"data"))
            .find_map(|key| obj.get(*key).filter(|v| v.is_object()))
            .cloned(),
        _ => None,
    };
    Ok(serde_json::from_value(inner.unwrap_or(value))?)
}
