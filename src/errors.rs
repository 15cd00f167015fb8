use thiserror::Error;

/// Pesan fallback bila server tidak memberi pesan error.
pub const GENERIC_FAILURE: &str = "Terjadi kesalahan. Silakan coba lagi.";
pub const NETWORK_FAILURE: &str = "Gagal terhubung ke server. Periksa koneksi internet Anda.";
pub const NOT_FOUND_FAILURE: &str = "Data tidak ditemukan";
pub const SESSION_INVALID: &str = "Sesi tidak valid";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Gagal koneksi: {0}")]
    Network(String),

    #[error("Autentikasi gagal: {0}")]
    Unauthorized(String),

    #[error("Akses ditolak: {0}")]
    Forbidden(String),

    #[error("Data tidak ditemukan: {0}")]
    NotFound(String),

    #[error("Validasi gagal: {0}")]
    Validation(String),

    #[error("Server error ({status}): {}", message.as_deref().unwrap_or("-"))]
    Api { status: u16, message: Option<String> },

    #[error("Permintaan sebelumnya masih diproses: {0}")]
    Busy(String),

    #[error("Respons tidak valid: {0}")]
    Decode(String),

    #[error("Konfigurasi tidak valid: {0}")]
    Config(String),

    #[error("Error: {0}")]
    Internal(String),
}

impl AppError {
    /// Bangun error dari status HTTP non-2xx dan pesan `error` dari body (jika ada).
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => AppError::Unauthorized(message.unwrap_or_else(|| SESSION_INVALID.into())),
            403 => AppError::Forbidden(message.unwrap_or_else(|| "Akses ditolak".into())),
            404 => AppError::NotFound(message.unwrap_or_else(|| NOT_FOUND_FAILURE.into())),
            400 | 409 | 422 => match message {
                Some(msg) => AppError::Validation(msg),
                None => AppError::Api { status, message: None },
            },
            _ => AppError::Api { status, message },
        }
    }

    /// Pesan yang ditampilkan ke user. Pesan dari server dipakai apa adanya,
    /// selain itu pakai fallback generik.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => NETWORK_FAILURE.to_string(),
            AppError::Validation(msg) | AppError::Unauthorized(msg) | AppError::Forbidden(msg) => {
                msg.clone()
            }
            AppError::Api { message: Some(msg), .. } => msg.clone(),
            AppError::Api { message: None, .. } => GENERIC_FAILURE.to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Busy(_) => "Permintaan sedang diproses, mohon tunggu".to_string(),
            AppError::Decode(_)
            | AppError::Config(_)
            | AppError::Internal(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// 401 di tengah mutasi tidak memicu login ulang: tampil sebagai kegagalan umum.
    pub fn into_mutation_error(self) -> Self {
        match self {
            AppError::Unauthorized(_) => AppError::Api { status: 401, message: None },
            other => other,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::from_status(status.as_u16(), None)
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.user_message()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = AppError::from_status(422, Some("Stok tidak cukup".into()));
        assert_eq!(err.user_message(), "Stok tidak cukup");

        let err = AppError::from_status(500, Some("Database down".into()));
        assert_eq!(err.user_message(), "Database down");
    }

    #[test]
    fn missing_message_falls_back_to_generic() {
        assert_eq!(AppError::from_status(500, None).user_message(), GENERIC_FAILURE);
        assert_eq!(AppError::from_status(400, None).user_message(), GENERIC_FAILURE);
        assert!(AppError::from_status(401, None).is_unauthorized());
        assert_eq!(AppError::from_status(404, None).user_message(), NOT_FOUND_FAILURE);
        assert_eq!(
            AppError::from_status(403, Some("Hanya admin".into())).user_message(),
            "Hanya admin"
        );
    }

    #[test]
    fn not_found_keeps_server_message() {
        let err = AppError::from_status(404, Some("Voucher tidak ditemukan".into()));
        assert_eq!(err.user_message(), "Voucher tidak ditemukan");
    }

    #[test]
    fn api_error_display_without_message() {
        let err = AppError::Api { status: 502, message: None };
        assert_eq!(err.to_string(), "Server error (502): -");
        let err = AppError::Api { status: 500, message: Some("Database down".into()) };
        assert_eq!(err.to_string(), "Server error (500): Database down");
    }

    #[test]
    fn unauthorized_mutation_is_generic() {
        let err = AppError::from_status(401, Some("Unauthorized".into())).into_mutation_error();
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        let err = AppError::from_status(422, Some("Stok tidak cukup".into())).into_mutation_error();
        assert_eq!(err.user_message(), "Stok tidak cukup");
    }

    #[test]
    fn network_errors_use_connection_message() {
        let msg: String = AppError::Network("dns".into()).into();
        assert_eq!(msg, NETWORK_FAILURE);
    }
}
