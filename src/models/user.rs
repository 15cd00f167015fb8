use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Kasir,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "KASIR" | "USER" | "STAFF" => Ok(Role::Kasir),
            other => Err(serde::de::Error::custom(format!("role tidak dikenal: {}", other))),
        }
    }
}

/// Identitas user yang sedang login, hasil `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    #[serde(rename = "nama", alias = "name")]
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "lokasi", alias = "location", default)]
    pub location: Option<String>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// User di halaman manajemen user (Admin only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nama", alias = "name")]
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "lokasi", alias = "location", default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Hasil login dari API.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResult {
    pub token: String,
    pub user: Identity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_is_case_insensitive() {
        let identity: Identity = serde_json::from_value(serde_json::json!({
            "id": 1,
            "nama": "Rina",
            "email": "rina@konter.id",
            "role": "admin",
            "lokasi": "Cabang Utara"
        }))
        .unwrap();
        assert!(identity.is_admin());
        assert_eq!(identity.location.as_deref(), Some("Cabang Utara"));

        let role: Role = serde_json::from_value(serde_json::json!("Kasir")).unwrap();
        assert_eq!(role, Role::Kasir);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let role: Result<Role, _> = serde_json::from_value(serde_json::json!("root"));
        assert!(role.is_err());
    }
}
