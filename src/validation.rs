//! Input validation used by the modal forms and commands
//!
//! - Generic field rules (required, min length, min value, numeric)
//! - Entity fields (names, email, phone, barcode)
//! - Financial data (amounts, quantities)

/// Validation result type
pub type ValidationResult = Result<(), String>;

pub fn validate_required(label: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(format!("{} wajib diisi", label));
    }
    Ok(())
}

pub fn validate_min_length(label: &str, value: &str, min: usize) -> ValidationResult {
    if value.trim().chars().count() < min {
        return Err(format!("{} minimal {} karakter", label, min));
    }
    Ok(())
}

pub fn validate_min_value(label: &str, value: f64, min: f64) -> ValidationResult {
    if value < min {
        return Err(format!("{} minimal {}", label, format_number(min)));
    }
    Ok(())
}

/// Parse angka dari input form. Spasi di tepi diabaikan.
pub fn parse_number(label: &str, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("{} harus berupa angka", label))
}

pub fn parse_integer(label: &str, value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("{} harus berupa bilangan bulat", label))
}

/// Validate a person's name (member, user)
/// - Length: 2-100 characters
pub fn validate_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Nama tidak boleh kosong".into());
    }

    if trimmed.chars().count() < 2 || trimmed.chars().count() > 100 {
        return Err("Nama harus 2-100 karakter".into());
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err("Email tidak boleh kosong".into());
    }

    if trimmed.len() > 254 {
        return Err("Email terlalu panjang (max 254 karakter)".into());
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err("Email harus berisi '@'".into());
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return Err("Format email tidak valid".into());
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Domain email tidak valid".into());
    }

    Ok(())
}

/// Validate phone number (Indonesian format, 8-15 digit)
pub fn validate_phone(phone: &str) -> ValidationResult {
    let trimmed = phone.trim();

    if trimmed.is_empty() {
        return Err("Nomor HP tidak boleh kosong".into());
    }

    if !trimmed.chars().all(|c| c.is_ascii_digit() || "+- ".contains(c)) {
        return Err("Nomor HP hanya boleh berisi angka".into());
    }

    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    if !(8..=15).contains(&digits) {
        return Err("Nomor HP harus 8-15 digit".into());
    }

    Ok(())
}

/// Password login: cukup tidak kosong dan panjang wajar; kekuatan diatur server.
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return Err("Password tidak boleh kosong".into());
    }

    if password.len() < 6 {
        return Err("Password minimal 6 karakter".into());
    }

    if password.len() > 128 {
        return Err("Password maksimal 128 karakter".into());
    }

    Ok(())
}

/// Validate monetary amount (default 0 .. 1 miliar)
pub fn validate_amount(amount: f64, min: Option<f64>, max: Option<f64>) -> ValidationResult {
    if !amount.is_finite() {
        return Err("Jumlah tidak valid".into());
    }

    let min_val = min.unwrap_or(0.0);
    let max_val = max.unwrap_or(1_000_000_000.0);

    if amount < min_val {
        return Err(format!("Jumlah minimal {}", format_currency(min_val)));
    }

    if amount > max_val {
        return Err(format!("Jumlah maksimal {}", format_currency(max_val)));
    }

    Ok(())
}

/// Validate quantity (stok, qty item)
pub fn validate_quantity(qty: i64, min: Option<i64>, max: Option<i64>) -> ValidationResult {
    if qty < 0 {
        return Err("Jumlah tidak boleh negatif".into());
    }

    let min_val = min.unwrap_or(0);
    let max_val = max.unwrap_or(1_000_000);

    if qty < min_val {
        return Err(format!("Jumlah minimal {}", min_val));
    }

    if qty > max_val {
        return Err(format!("Jumlah maksimal {}", max_val));
    }

    Ok(())
}

/// Validate barcode (optional)
pub fn validate_barcode(barcode: &str) -> ValidationResult {
    let trimmed = barcode.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    if trimmed.len() > 50 {
        return Err("Barcode terlalu panjang (max 50 karakter)".into());
    }

    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Barcode hanya boleh berisi huruf dan angka".into());
    }

    Ok(())
}

/// Angka tanpa `.0` bila bulat, untuk pesan dan prefill form.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Rp dengan pemisah ribuan titik.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
