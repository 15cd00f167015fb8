//! Modal form: field rules, normalisasi payload, dan state machine modal.

pub mod entities;

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use crate::validation;

/// Nilai mentah form, per nama field (nama field = nama di API).
pub type FormValues = BTreeMap<String, String>;

/// Pesan error per field.
pub type FormErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Name,
    Password,
    Integer,
    Decimal,
    Email,
    Phone,
    Barcode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub min_value: Option<f64>,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            min_length: None,
            min_value: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Nama orang (member, user): 2-100 karakter.
    pub fn name(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Name)
    }

    pub fn password(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    pub fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub fn decimal(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Decimal)
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn phone(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Phone)
    }

    pub fn barcode(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Barcode)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    /// Validasi satu field lalu normalisasi ke nilai JSON.
    fn normalize(&self, raw: &str) -> Result<Value, String> {
        let trimmed = raw.trim();

        // Password tidak di-trim: spasi termasuk isi password
        if self.kind == FieldKind::Password && !raw.is_empty() {
            validation::validate_password(raw)?;
            return Ok(Value::String(raw.to_string()));
        }

        if trimmed.is_empty() {
            if self.required {
                return Err(format!("{} wajib diisi", self.label));
            }
            return Ok(Value::Null);
        }

        if let Some(min) = self.min_length {
            validation::validate_min_length(self.label, trimmed, min)?;
        }

        match self.kind {
            FieldKind::Text => Ok(Value::String(trimmed.to_string())),
            FieldKind::Name => {
                validation::validate_name(trimmed)?;
                Ok(Value::String(trimmed.to_string()))
            }
            FieldKind::Password => Ok(Value::String(raw.to_string())),
            FieldKind::Email => {
                validation::validate_email(trimmed)?;
                Ok(Value::String(trimmed.to_string()))
            }
            FieldKind::Phone => {
                validation::validate_phone(trimmed)?;
                Ok(Value::String(trimmed.to_string()))
            }
            FieldKind::Barcode => {
                validation::validate_barcode(trimmed)?;
                Ok(Value::String(trimmed.to_string()))
            }
            FieldKind::Integer => {
                let n = validation::parse_integer(self.label, trimmed)?;
                if let Some(min) = self.min_value {
                    validation::validate_min_value(self.label, n as f64, min)?;
                }
                Ok(Value::Number(n.into()))
            }
            FieldKind::Decimal => {
                let n = validation::parse_number(self.label, trimmed)?;
                if let Some(min) = self.min_value {
                    validation::validate_min_value(self.label, n, min)?;
                }
                Ok(number_value(n))
            }
        }
    }
}

/// Bilangan bulat dikirim sebagai integer JSON (`10000`, bukan `10000.0`).
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::Number((n as i64).into())
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Nilai kosong untuk modal "tambah".
    pub fn blank_values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), String::new()))
            .collect()
    }

    /// Validasi semua field. Sukses: payload JSON ternormalisasi.
    /// Gagal: semua pesan per field sekaligus.
    pub fn validate(&self, values: &FormValues) -> Result<Map<String, Value>, FormErrors> {
        let mut payload = Map::new();
        let mut errors = FormErrors::new();

        for field in &self.fields {
            let raw = values.get(field.name).map(String::as_str).unwrap_or("");
            match field.normalize(raw) {
                Ok(value) => {
                    payload.insert(field.name.to_string(), value);
                }
                Err(msg) => {
                    errors.insert(field.name.to_string(), msg);
                }
            }
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    Open {
        mode: ModalMode,
        values: FormValues,
        errors: FormErrors,
        server_error: Option<String>,
    },
    Submitting {
        mode: ModalMode,
        values: FormValues,
    },
}

/// Payload siap kirim ke mutation dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub mode: ModalMode,
    pub payload: Map<String, Value>,
}

pub struct ModalForm {
    schema: FormSchema,
    state: ModalState,
}

impl ModalForm {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            state: ModalState::Closed,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    /// Tombol submit dinonaktifkan selama request berjalan.
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, ModalState::Submitting { .. })
    }

    pub fn values(&self) -> Option<&FormValues> {
        match &self.state {
            ModalState::Open { values, .. } | ModalState::Submitting { values, .. } => Some(values),
            ModalState::Closed => None,
        }
    }

    pub fn errors(&self) -> Option<&FormErrors> {
        match &self.state {
            ModalState::Open { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn open_create(&mut self) {
        self.state = ModalState::Open {
            mode: ModalMode::Create,
            values: self.schema.blank_values(),
            errors: FormErrors::new(),
            server_error: None,
        };
    }

    /// Buka modal edit dengan nilai yang sudah terisi.
    pub fn open_edit(&mut self, id: i64, prefill: FormValues) {
        let mut values = self.schema.blank_values();
        values.extend(prefill);
        self.state = ModalState::Open {
            mode: ModalMode::Edit(id),
            values,
            errors: FormErrors::new(),
            server_error: None,
        };
    }

    /// Ubah satu field. Error field itu dihapus sampai submit berikutnya.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        match &mut self.state {
            ModalState::Open { values, errors, .. } => {
                values.insert(name.to_string(), value.to_string());
                errors.remove(name);
                true
            }
            _ => false,
        }
    }

    /// `Open → Submitting` bila valid. Bila tidak valid tetap `Open` dengan pesan per field.
    pub fn submit(&mut self) -> Result<Submission, FormErrors> {
        let ModalState::Open { mode, values, .. } = &self.state else {
            return Err(FormErrors::new());
        };
        let (mode, values) = (*mode, values.clone());

        match self.schema.validate(&values) {
            Ok(payload) => {
                self.state = ModalState::Submitting { mode, values };
                Ok(Submission { mode, payload })
            }
            Err(errors) => {
                self.state = ModalState::Open {
                    mode,
                    values,
                    errors: errors.clone(),
                    server_error: None,
                };
                Err(errors)
            }
        }
    }

    /// Hasil request. Sukses menutup modal; gagal membuka kembali form dengan pesan server.
    pub fn finish(&mut self, result: Result<(), String>) {
        let ModalState::Submitting { mode, values } = &self.state else {
            return;
        };

        self.state = match result {
            Ok(()) => ModalState::Closed,
            Err(message) => ModalState::Open {
                mode: *mode,
                values: values.clone(),
                errors: FormErrors::new(),
                server_error: Some(message),
            },
        };
    }

    pub fn cancel(&mut self) {
        self.state = ModalState::Closed;
    }
}

/// Konfirmasi hapus. DELETE hanya bisa dikirim dengan token dari `confirm`,
/// jadi tidak ada jalan ke request tanpa langkah konfirmasi.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmDelete {
    pending: Option<i64>,
}

/// Bukti bahwa user sudah mengonfirmasi penghapusan satu baris.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedDelete {
    id: i64,
}

impl ConfirmedDelete {
    pub fn id(&self) -> i64 {
        self.id
    }
}

impl ConfirmDelete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Klik tombol hapus: buka dialog konfirmasi untuk baris `id`.
    pub fn request(&mut self, id: i64) {
        self.pending = Some(id);
    }

    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// User menekan "Hapus" di dialog. Dialog tertutup; `None` bila tidak ada yang menunggu.
    pub fn confirm(&mut self) -> Option<ConfirmedDelete> {
        self.pending.take().map(|id| ConfirmedDelete { id })
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
