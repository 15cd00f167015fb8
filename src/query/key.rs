use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use super::period::{DateRange, Period};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Semua input sebuah list view: filter, sort, halaman.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListParams {
    /// 1-based
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub period: Period,
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
    /// Filter khusus entitas (`brand`, `status`, `kategori`, `lokasi`, ...)
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            sort_by: None,
            sort_order: SortOrder::default(),
            period: Period::All,
            custom_start: None,
            custom_end: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        self.period.resolve(today, self.custom_start, self.custom_end)
    }

    /// Query string yang dikirim ke endpoint list, urutannya stabil.
    pub fn query_pairs(&self, today: NaiveDate) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ];

        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search".to_string(), search.to_string()));
        }

        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy".to_string(), sort_by.clone()));
            pairs.push(("sortOrder".to_string(), self.sort_order.as_str().to_string()));
        }

        pairs.extend(self.date_range(today).query_pairs());

        for (key, value) in &self.filters {
            let value = value.trim();
            if !value.is_empty() && value != "all" {
                pairs.push((key.clone(), value.to_string()));
            }
        }

        pairs
    }
}

/// Key cache list: namespace entitas + query string yang benar-benar dikirim.
///
/// Input yang tidak ikut terkirim (rentang custom saat periode bukan `custom`,
/// filter kosong / `all`) tidak membedakan key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    namespace: String,
    pairs: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(namespace: &str, params: &ListParams, today: NaiveDate) -> Self {
        Self {
            namespace: namespace.to_string(),
            pairs: params.query_pairs(today),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Hash stabil dalam satu proses, untuk log.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
