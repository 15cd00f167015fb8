pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod errors;
pub mod form;
pub mod logger;
pub mod models;
pub mod mutation;
pub mod query;
pub mod stock;
pub mod validation;

use std::sync::Mutex;

use api::ApiClient;
use auth::session::SessionStore;
use config::AppConfig;
use errors::AppResult;
use mutation::MutationDispatcher;
use query::debounce::Debouncer;
use query::QueryCache;

/// State global aplikasi, dibagi ke semua layar dashboard.
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub sessions: Mutex<SessionStore>,
    pub cache: QueryCache,
    pub mutations: MutationDispatcher,
}

impl AppState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let api = ApiClient::new(&config.api)?;
        let cache = QueryCache::new(config.stale_time());

        Ok(Self {
            config,
            api,
            sessions: Mutex::new(SessionStore::new()),
            cache,
            mutations: MutationDispatcher::new(),
        })
    }

    /// Ukuran halaman awal untuk tabel baru.
    pub fn page_size(&self) -> u32 {
        self.config.query.default_page_size
    }

    /// Debouncer kolom cari dengan quiet window dari config.
    pub fn search_debouncer(&self) -> (Debouncer<String>, tokio::sync::mpsc::UnboundedReceiver<String>) {
        Debouncer::spawn(self.config.search_debounce())
    }
}

/// Startup: config, logger, lalu cek sesi sekali.
pub async fn run() -> Result<(), String> {
    let _ = AppConfig::load_from_file(std::path::Path::new(".env"));
    let config = config::init_config().clone();

    if let Err(e) = logger::init_global_logger(&config.logging) {
        eprintln!("⚠️  Warning: Failed to initialize logger: {}", e);
    }

    log_info!("APP", "Application starting", serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "environment": config.environment.as_str(),
        "api_base_url": config.api.base_url
    }));

    let state = AppState::new(config).map_err(|e| {
        log_error!("APP", "Gagal inisialisasi state", e);
        e.to_string()
    })?;

    match commands::auth_cmd::check_session(&state).await {
        Some(identity) => log_info!("APP", "Sesi aktif", serde_json::json!({
            "user_id": identity.id,
            "role": identity.role
        })),
        None => log_info!("APP", "Belum login", serde_json::json!({
            "route": auth::guard::LOGIN_ROUTE
        })),
    }

    Ok(())
}
