use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::cache::QueryCache;
use super::key::{ListParams, QueryKey, SortOrder};
use super::pagination::PageInfo;
use super::period::{self, Period};
use crate::api::{ApiClient, Page};
use crate::errors::{AppError, AppResult};
use crate::{log_debug, log_warn};

/// Satu permintaan list yang sedang berjalan.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub key: QueryKey,
    path: String,
    force: bool,
}

/// Hasil fetch, belum diterapkan ke controller.
#[derive(Debug)]
pub struct FetchOutcome {
    key: QueryKey,
    result: AppResult<Page<Value>>,
}

impl FetchTicket {
    /// Pakai cache bila masih fresh, selain itu fetch dan simpan hasilnya.
    pub async fn fetch(self, client: &ApiClient, cache: &QueryCache) -> FetchOutcome {
        if !self.force {
            if let Some(hit) = cache.get(&self.key) {
                log_debug!("CACHE", "hit", serde_json::json!({
                    "namespace": self.key.namespace(),
                    "key": self.key.fingerprint()
                }));
                return FetchOutcome {
                    key: self.key,
                    result: Ok(hit),
                };
            }
        }

        let result = client.get_page(&self.path, self.key.query_pairs()).await;
        if let Ok(page) = &result {
            cache.insert(self.key.clone(), page.clone());
        }

        FetchOutcome {
            key: self.key,
            result,
        }
    }
}

/// Yang perlu ditampilkan di tempat tabel.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    Loading,
    Error(&'a str),
    /// `refreshing`: data masih milik key sebelumnya atau sedang di-fetch ulang
    Rows { page: &'a Page<T>, refreshing: bool },
}

/// State satu tabel list: filter, sort, halaman, dan data terakhir.
pub struct ListController<T> {
    namespace: String,
    path: String,
    params: ListParams,
    data: Option<Page<T>>,
    error: Option<String>,
    in_flight: Option<QueryKey>,
    /// Key milik `data`
    shown: Option<QueryKey>,
    fixed_today: Option<NaiveDate>,
}

impl<T: DeserializeOwned> ListController<T> {
    pub fn new(namespace: &str, path: &str, page_size: u32) -> Self {
        Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
            params: ListParams::new(page_size),
            data: None,
            error: None,
            in_flight: None,
            shown: None,
            fixed_today: None,
        }
    }

    /// Kunci tanggal "hari ini" (untuk test dan laporan historis).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(period::today)
    }

    pub fn current_key(&self) -> QueryKey {
        QueryKey::new(&self.namespace, &self.params, self.today())
    }

    // --- input ---

    pub fn set_search(&mut self, search: &str) {
        if self.params.search != search {
            self.params.search = search.to_string();
            self.params.page = 1;
        }
    }

    pub fn set_filter(&mut self, name: &str, value: Option<&str>) {
        let changed = match value {
            Some(v) => self.params.filters.insert(name.to_string(), v.to_string()).as_deref() != Some(v),
            None => self.params.filters.remove(name).is_some(),
        };
        if changed {
            self.params.page = 1;
        }
    }

    pub fn set_sort(&mut self, sort_by: &str, order: SortOrder) {
        self.params.sort_by = Some(sort_by.to_string());
        self.params.sort_order = order;
    }

    pub fn set_period(&mut self, period: Period) {
        if self.params.period != period {
            self.params.period = period;
            self.params.page = 1;
        }
    }

    pub fn set_custom_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.params.period = Period::Custom;
        self.params.custom_start = start;
        self.params.custom_end = end;
        self.params.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.params.page = page.max(1);
    }

    /// Ganti ukuran halaman selalu kembali ke halaman 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.params.page_size = page_size.max(1);
        self.params.page = 1;
    }

    pub fn next_page(&mut self) -> bool {
        match self.page_info() {
            Some(info) if info.has_next() => {
                self.params.page += 1;
                true
            }
            _ => false,
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.params.page > 1 {
            self.params.page -= 1;
            true
        } else {
            false
        }
    }

    // --- fetch ---

    pub fn begin(&mut self) -> FetchTicket {
        self.ticket(false)
    }

    /// Seperti `begin`, tapi selalu ke server.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.ticket(true)
    }

    fn ticket(&mut self, force: bool) -> FetchTicket {
        let key = self.current_key();
        self.in_flight = Some(key.clone());
        self.error = None;
        FetchTicket {
            key,
            path: self.path.clone(),
            force,
        }
    }

    /// Terapkan hasil fetch. `Ok(false)` bila hasil milik key yang sudah tidak berlaku.
    pub fn complete(&mut self, outcome: FetchOutcome) -> Result<bool, String> {
        if self.in_flight.as_ref() != Some(&outcome.key) {
            log_debug!("QUERY", "stale response discarded", serde_json::json!({
                "namespace": self.namespace,
                "key": outcome.key.fingerprint()
            }));
            return Ok(false);
        }
        self.in_flight = None;

        match outcome.result.and_then(|raw| raw.decode::<T>()) {
            Ok(page) => {
                self.data = Some(page);
                self.shown = Some(outcome.key);
                self.error = None;
                Ok(true)
            }
            Err(err) => {
                log_warn!("QUERY", "gagal memuat list", serde_json::json!({
                    "namespace": self.namespace,
                    "error": err.to_string()
                }));
                let msg = load_error_message(&err);
                self.error = Some(msg.clone());
                Err(msg)
            }
        }
    }

    pub async fn load(&mut self, client: &ApiClient, cache: &QueryCache) -> Result<(), String> {
        let ticket = self.begin();
        let outcome = ticket.fetch(client, cache).await;
        self.complete(outcome).map(|_| ())
    }

    pub async fn refresh(&mut self, client: &ApiClient, cache: &QueryCache) -> Result<(), String> {
        let ticket = self.begin_refresh();
        let outcome = ticket.fetch(client, cache).await;
        self.complete(outcome).map(|_| ())
    }

    // --- output ---

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Data terakhir yang berhasil dimuat, walau milik key sebelumnya.
    pub fn data(&self) -> Option<&Page<T>> {
        self.data.as_ref()
    }

    pub fn page_info(&self) -> Option<PageInfo> {
        self.data.as_ref().map(|page| PageInfo {
            page: self.params.page,
            page_size: self.params.page_size,
            total: page.total,
            total_pages: page.total_pages,
        })
    }

    pub fn view(&self) -> ListView<'_, T> {
        if let Some(err) = &self.error {
            return ListView::Error(err);
        }
        match &self.data {
            Some(page) => ListView::Rows {
                page,
                refreshing: self.is_fetching() || self.shown.as_ref() != Some(&self.current_key()),
            },
            None => ListView::Loading,
        }
    }
}

fn load_error_message(err: &AppError) -> String {
    match err {
        AppError::Network(_) => "Gagal memuat data. Periksa koneksi Anda.".to_string(),
        other => other.user_message(),
    }
}
