use super::Resource;
use crate::auth::guard::require_admin;
use crate::form::{ConfirmedDelete, Submission};
use crate::models::user::User;
use crate::query::ListController;
use crate::AppState;

pub const USERS: Resource = Resource::new("users", "/users");

/// List user. Hanya Admin.
pub fn user_list(state: &AppState) -> Result<ListController<User>, String> {
    require_admin(state)?;
    Ok(USERS.list(state))
}

pub async fn save_user(state: &AppState, submission: &Submission) -> Result<User, String> {
    require_admin(state)?;
    USERS.submit(state, submission, &[]).await
}

pub async fn delete_user(state: &AppState, target: ConfirmedDelete) -> Result<(), String> {
    let admin = require_admin(state)?;
    if admin.id == target.id() {
        return Err("Tidak bisa menghapus akun sendiri".into());
    }
    USERS.delete(state, target, &[]).await
}
