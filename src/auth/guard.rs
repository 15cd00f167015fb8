use super::session::{SessionState, SessionStore};
use crate::errors::{AppError, AppResult};
use crate::models::user::Identity;
use crate::AppState;

/// Halaman tujuan redirect bila belum login.
pub const LOGIN_ROUTE: &str = "/login";

/// Keputusan untuk halaman yang butuh login.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAccess {
    /// Cek sesi belum selesai: tampilkan indikator loading.
    Loading,
    RedirectToLogin,
    Granted(Identity),
}

pub fn route_access(store: &SessionStore) -> RouteAccess {
    match store.state() {
        SessionState::Uninitialized | SessionState::Checking => RouteAccess::Loading,
        SessionState::Resolved(None) => RouteAccess::RedirectToLogin,
        SessionState::Resolved(Some(identity)) => RouteAccess::Granted(identity.clone()),
    }
}

/// Helper: pastikan ada user login dan kembalikan identitasnya.
pub fn require_session(state: &AppState) -> AppResult<Identity> {
    let store = state
        .sessions
        .lock()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    store
        .identity()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Sesi tidak valid, silakan login ulang".into()))
}

/// Helper: validasi session + pastikan role ADMIN.
pub fn require_admin(state: &AppState) -> AppResult<Identity> {
    let identity = require_session(state)?;
    if !identity.is_admin() {
        return Err(AppError::Forbidden(
            "hanya Admin yang bisa melakukan ini".into(),
        ));
    }
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    #[test]
    fn route_access_follows_session_state() {
        let mut store = SessionStore::new();
        assert_eq!(route_access(&store), RouteAccess::Loading);

        store.begin_check();
        assert_eq!(route_access(&store), RouteAccess::Loading);

        store.resolve(None);
        assert_eq!(route_access(&store), RouteAccess::RedirectToLogin);

        let identity = Identity {
            id: 2,
            name: "Dodi".into(),
            email: "dodi@konter.id".into(),
            role: Role::Kasir,
            location: Some("Cabang Selatan".into()),
        };
        store.resolve(Some(identity.clone()));
        assert_eq!(route_access(&store), RouteAccess::Granted(identity));
    }
}
