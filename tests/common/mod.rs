//! Fake REST API in-process untuk integration test.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use konter_admin::config::AppConfig;
use konter_admin::AppState;

pub const TOKEN: &str = "token-admin-1";
pub const PASSWORD: &str = "rahasia123";

#[derive(Default)]
pub struct FakeApi {
    pub vouchers: Mutex<Vec<Value>>,
    pub voucher_gets: AtomicUsize,
    pub member_gets: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub member_deletes: AtomicUsize,
    pub last_query: Mutex<HashMap<String, String>>,
}

impl FakeApi {
    fn seeded() -> Self {
        let api = Self::default();
        *api.vouchers.lock().unwrap() = vec![
            voucher(1, "Telkomsel", "Data 5GB", 10),
            voucher(2, "XL", "Data 10GB", 4),
            voucher(3, "Indosat", "Pulsa 50rb", 0),
        ];
        api
    }

    pub fn hits(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn voucher_stock(&self, id: i64) -> Option<i64> {
        self.vouchers
            .lock()
            .unwrap()
            .iter()
            .find(|v| v["id"] == id)
            .and_then(|v| v["stok"].as_i64())
    }
}

fn voucher(id: i64, brand: &str, nama: &str, stok: i64) -> Value {
    json!({
        "id": id,
        "brand": brand,
        "nama": nama,
        "stok": stok,
        "hargaModal": 20000,
        "hargaJual": 25000,
        "lokasi": "Pusat"
    })
}

fn admin() -> Value {
    json!({ "id": 1, "nama": "Rina", "email": "rina@konter.id", "role": "admin", "lokasi": "Pusat" })
}

type Shared = Arc<FakeApi>;
type Reply = (StatusCode, Json<Value>);

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

async fn me(headers: HeaderMap) -> Reply {
    if authorized(&headers) {
        ok(json!({ "user": admin() }))
    } else {
        fail(StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

async fn login(State(api): State<Shared>, Json(body): Json<Value>) -> Reply {
    api.login_calls.fetch_add(1, Ordering::SeqCst);
    if body["password"] == PASSWORD {
        ok(json!({ "token": TOKEN, "user": admin() }))
    } else {
        fail(StatusCode::UNAUTHORIZED, "Email atau password salah")
    }
}

async fn logout(State(api): State<Shared>) -> Reply {
    api.logout_calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})))
}

async fn list_vouchers(
    State(api): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    api.voucher_gets.fetch_add(1, Ordering::SeqCst);
    *api.last_query.lock().unwrap() = query.clone();

    let search = query.get("search").map(|s| s.to_lowercase()).unwrap_or_default();
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let size: usize = query.get("pageSize").and_then(|p| p.parse().ok()).unwrap_or(10);

    let matching: Vec<Value> = api
        .vouchers
        .lock()
        .unwrap()
        .iter()
        .filter(|v| v["nama"].as_str().unwrap_or("").to_lowercase().contains(&search))
        .cloned()
        .collect();
    let total = matching.len();
    let data: Vec<Value> = matching.into_iter().skip((page - 1) * size).take(size).collect();

    ok(json!({
        "data": data,
        "meta": { "total": total, "totalPages": (total + size - 1) / size }
    }))
}

async fn create_voucher(State(api): State<Shared>, Json(mut body): Json<Value>) -> Reply {
    if body["brand"].as_str().map_or(true, |b| b.trim().is_empty()) {
        return fail(StatusCode::BAD_REQUEST, "Brand wajib diisi");
    }
    let mut vouchers = api.vouchers.lock().unwrap();
    body["id"] = json!(vouchers.len() as i64 + 1);
    vouchers.push(body.clone());
    (StatusCode::CREATED, Json(json!({ "data": body })))
}

async fn adjust_voucher_stock(
    State(api): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let delta = body["delta"].as_i64().unwrap_or(0);
    let mut vouchers = api.vouchers.lock().unwrap();
    let Some(voucher) = vouchers.iter_mut().find(|v| v["id"] == id) else {
        return fail(StatusCode::NOT_FOUND, "Voucher tidak ditemukan");
    };
    let next = voucher["stok"].as_i64().unwrap_or(0) + delta;
    if next < 0 {
        return fail(StatusCode::UNPROCESSABLE_ENTITY, "Stok tidak cukup");
    }
    voucher["stok"] = json!(next);
    ok(voucher.clone())
}

async fn list_members(State(api): State<Shared>) -> Reply {
    api.member_gets.fetch_add(1, Ordering::SeqCst);
    ok(json!([
        { "id": 1, "nama": "Budi", "noHp": "081234567890", "totalTransaksi": 75000 },
        { "id": 2, "nama": "Ani", "noHp": "081298765432", "totalTransaksi": 120000 }
    ]))
}

async fn delete_member(State(api): State<Shared>, Path(id): Path<i64>) -> Reply {
    api.member_deletes.fetch_add(1, Ordering::SeqCst);
    if id > 2 {
        return fail(StatusCode::NOT_FOUND, "Member tidak ditemukan");
    }
    ok(json!({ "message": "Member dihapus" }))
}

async fn list_voucher_transactions() -> Reply {
    ok(json!({
        "formatted": [{
            "id": 11,
            "namaPembeli": "Budi",
            "items": [{ "produkId": 1, "namaProduk": "Data 5GB", "qty": 2, "hargaSatuan": 25000 }],
            "total": 50000,
            "keuntungan": 10000,
            "status": "success",
            "tanggal": "2024-06-12"
        }],
        "totalItems": 31,
        "totalPages": 4
    }))
}

async fn create_voucher_transaction(State(api): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut vouchers = api.vouchers.lock().unwrap();
    let mut total = 0.0;
    for item in body["items"].as_array().cloned().unwrap_or_default() {
        let qty = item["qty"].as_i64().unwrap_or(0);
        total += item["hargaSatuan"].as_f64().unwrap_or(0.0) * qty as f64;
        if let Some(v) = vouchers.iter_mut().find(|v| v["id"] == item["produkId"]) {
            let stok = v["stok"].as_i64().unwrap_or(0);
            if stok < qty {
                return fail(StatusCode::UNPROCESSABLE_ENTITY, "Stok tidak cukup");
            }
            v["stok"] = json!(stok - qty);
        }
    }
    ok(json!({
        "id": 12,
        "namaPembeli": body["namaPembeli"],
        "items": body["items"],
        "total": total,
        "keuntungan": 0,
        "status": "pending",
        "tanggal": "2024-06-15"
    }))
}

/// Jalankan fake API di port acak. Mengembalikan state fake dan base URL.
pub async fn spawn() -> (Arc<FakeApi>, String) {
    let api = Arc::new(FakeApi::seeded());
    let app = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/vouchers", get(list_vouchers).post(create_voucher))
        .route("/api/vouchers/{id}/stock", patch(adjust_voucher_stock))
        .route("/api/members", get(list_members))
        .route("/api/members/{id}", delete(delete_member))
        .route(
            "/api/transactions/voucher",
            get(list_voucher_transactions).post(create_voucher_transaction),
        )
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (api, format!("http://{}/api", addr))
}

pub fn app_state(base_url: &str) -> AppState {
    AppState::new(AppConfig::with_base_url(base_url)).unwrap()
}

/// State yang sudah login sebagai admin.
pub async fn logged_in_state(base_url: &str) -> AppState {
    let state = app_state(base_url);
    state.api.set_token(Some(TOKEN.to_string()));
    konter_admin::commands::auth_cmd::check_session(&state)
        .await
        .expect("sesi admin");
    state
}
