use serde_json::Value;

use crate::api::decode_record;
use crate::auth::guard::{route_access, RouteAccess};
use crate::errors::{AppError, AppResult, SESSION_INVALID};
use crate::models::user::{Identity, LoginPayload, LoginResult};
use crate::validation;
use crate::AppState;
use crate::{log_info, log_warn};

fn set_session(state: &AppState, identity: Option<Identity>) {
    if let Ok(mut store) = state.sessions.lock() {
        store.resolve(identity);
    }
}

/// Cek sesi aktif ke `/auth/me`. Gagal apa pun dianggap belum login.
pub async fn check_session(state: &AppState) -> Option<Identity> {
    if let Ok(mut store) = state.sessions.lock() {
        store.begin_check();
    }

    let result: AppResult<Identity> = match state.api.get::<Value>("/auth/me", &[]).await {
        Ok(body) => decode_record(body, &["user"]),
        Err(e) => Err(e),
    };

    let identity = match result {
        Ok(identity) => Some(identity),
        Err(e) => {
            if !e.is_unauthorized() {
                log_warn!("AUTH", "Cek sesi gagal", serde_json::json!({
                    "error": e.to_string()
                }));
            }
            state.api.set_token(None);
            None
        }
    };

    set_session(state, identity.clone());
    identity
}

/// Login user dan simpan token ke API client.
pub async fn login(state: &AppState, email: String, password: String) -> Result<Identity, String> {
    validation::validate_email(&email)?;
    validation::validate_password(&password)?;

    let payload = LoginPayload {
        email: email.trim().to_string(),
        password,
    };

    let result = state
        .api
        .post::<_, Value>("/auth/login", &payload)
        .await
        .and_then(|body| decode_record::<LoginResult>(body, &[]));

    match result {
        Ok(login) => {
            state.api.set_token(Some(login.token));
            state.cache.invalidate_all();
            set_session(state, Some(login.user.clone()));

            log_info!("AUTH", "User login", serde_json::json!({
                "user_id": login.user.id,
                "role": login.user.role
            }));
            Ok(login.user)
        }
        Err(e) => {
            log_warn!("AUTH", "Login gagal", serde_json::json!({
                "email": payload.email,
                "error": e.to_string()
            }));
            set_session(state, None);
            Err(login_error_message(e))
        }
    }
}

fn login_error_message(err: AppError) -> String {
    match err {
        AppError::Unauthorized(msg) if msg == SESSION_INVALID => "Email atau password salah".into(),
        other => other.user_message(),
    }
}

/// Logout: beritahu server (best effort), lalu buang token, identitas dan seluruh cache.
pub async fn logout(state: &AppState) {
    if let Err(e) = state.api.post::<_, Value>("/auth/logout", &serde_json::json!({})).await {
        log_warn!("AUTH", "Logout ke server gagal, sesi lokal tetap dihapus", serde_json::json!({
            "error": e.to_string()
        }));
    }

    state.api.set_token(None);
    if let Ok(mut store) = state.sessions.lock() {
        store.clear();
    }
    state.cache.invalidate_all();

    log_info!("AUTH", "User logout");
}

/// Keputusan gerbang halaman untuk sesi saat ini.
pub fn current_access(state: &AppState) -> RouteAccess {
    match state.sessions.lock() {
        Ok(store) => route_access(&store),
        Err(_) => RouteAccess::Loading,
    }
}
