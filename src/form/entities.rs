//! Skema form per entitas dan prefill untuk modal edit.

use super::{FieldSpec, FormSchema, FormValues};
use crate::models::ledger::{CashEntry, UnexpectedEntry};
use crate::models::partner::{Downline, Member};
use crate::models::stock::{StockItem, Voucher};
use crate::models::user::{Role, User};
use crate::validation::format_number;

/// Entitas yang bisa diedit lewat modal form.
pub trait FormEntity {
    fn schema() -> FormSchema;

    /// Nilai prefill modal edit, dengan nama field yang sama seperti skema.
    fn form_values(&self) -> FormValues;
}

fn values<const N: usize>(pairs: [(&str, String); N]) -> FormValues {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_number(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

impl FormEntity for Voucher {
    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("brand", "Brand").required(),
            FieldSpec::text("nama", "Nama voucher").required().min_length(2),
            FieldSpec::integer("stok", "Stok").required().min_value(0.0),
            FieldSpec::decimal("hargaModal", "Harga modal").required().min_value(0.0),
            FieldSpec::decimal("hargaGrosir", "Harga grosir").min_value(0.0),
            FieldSpec::decimal("hargaJual", "Harga jual").required().min_value(0.0),
            FieldSpec::text("lokasi", "Lokasi"),
        ])
    }

    fn form_values(&self) -> FormValues {
        values([
            ("brand", self.brand.clone()),
            ("nama", self.name.clone()),
            ("stok", self.stock.to_string()),
            ("hargaModal", format_number(self.cost_price)),
            ("hargaGrosir", opt_number(self.wholesale_price)),
            ("hargaJual", format_number(self.retail_price)),
            ("lokasi", opt_text(&self.location)),
        ])
    }
}

impl FormEntity for StockItem {
    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::barcode("barcode", "Barcode"),
            FieldSpec::text("brand", "Brand").required(),
            FieldSpec::text("nama", "Nama barang").required().min_length(2),
            FieldSpec::text("kategori", "Kategori"),
            FieldSpec::integer("stok", "Stok").required().min_value(0.0),
            FieldSpec::decimal("hargaModal", "Harga modal").required().min_value(0.0),
            FieldSpec::decimal("hargaJual", "Harga jual").required().min_value(0.0),
            FieldSpec::text("lokasi", "Lokasi"),
        ])
    }

    fn form_values(&self) -> FormValues {
        values([
            ("barcode", opt_text(&self.barcode)),
            ("brand", self.brand.clone()),
            ("nama", self.name.clone()),
            ("kategori", opt_text(&self.category)),
            ("stok", self.stock.to_string()),
            ("hargaModal", format_number(self.cost_price)),
            ("hargaJual", format_number(self.sell_price)),
            ("lokasi", opt_text(&self.location)),
        ])
    }
}

impl FormEntity for Downline {
    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("kode", "Kode downline").required().min_length(2),
            FieldSpec::text("nama", "Nama").required().min_length(2),
        ])
    }

    fn form_values(&self) -> FormValues {
        values([("kode", self.code.clone()), ("nama", self.name.clone())])
    }
}

impl FormEntity for Member {
    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::name("nama", "Nama").required(),
            FieldSpec::phone("noHp", "Nomor HP").required(),
        ])
    }

    fn form_values(&self) -> FormValues {
        values([("nama", self.name.clone()), ("noHp", self.phone.clone())])
    }
}

impl FormEntity for CashEntry {
    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("keterangan", "Keterangan").required(),
            FieldSpec::decimal("jumlah", "Jumlah").required().min_value(1.0),
            FieldSpec::text("lokasi", "Lokasi").required(),
            FieldSpec::text("tanggal", "Tanggal").required(),
        ])
    }

    fn form_values(&self) -> FormValues {
        values([
            ("keterangan", self.description.clone()),
            ("jumlah", format_number(self.amount)),
            ("lokasi", self.location.clone()),
            ("tanggal", self.date.clone()),
        ])
    }
}

impl FormEntity for UnexpectedEntry {
    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::integer("transaksiId", "ID transaksi").min_value(1.0),
            FieldSpec::decimal("jumlah", "Jumlah").required().min_value(1.0),
            FieldSpec::text("keterangan", "Keterangan").required().min_length(3),
            FieldSpec::text("tanggal", "Tanggal").required(),
        ])
    }

    fn form_values(&self) -> FormValues {
        values([
            ("transaksiId", self.transaction_ref.map(|id| id.to_string()).unwrap_or_default()),
            ("jumlah", format_number(self.amount)),
            ("keterangan", self.description.clone()),
            ("tanggal", self.date.clone()),
        ])
    }
}

impl FormEntity for User {
    /// Skema edit: password boleh kosong (tidak diganti).
    fn schema() -> FormSchema {
        user_schema(false)
    }

    fn form_values(&self) -> FormValues {
        let role = match self.role {
            Role::Admin => "ADMIN",
            Role::Kasir => "KASIR",
        };
        values([
            ("nama", self.name.clone()),
            ("email", self.email.clone()),
            ("role", role.to_string()),
            ("lokasi", opt_text(&self.location)),
            ("password", String::new()),
        ])
    }
}

/// Skema user; saat membuat user baru password wajib.
pub fn user_schema(creating: bool) -> FormSchema {
    let password = FieldSpec::password("password", "Password");
    FormSchema::new(vec![
        FieldSpec::name("nama", "Nama").required(),
        FieldSpec::email("email", "Email").required(),
        FieldSpec::text("role", "Role").required(),
        FieldSpec::text("lokasi", "Lokasi"),
        if creating { password.required() } else { password },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ModalForm, ModalMode, ModalState};
    use serde_json::Value;

    fn input(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn voucher_create_then_edit_prefills_identical_values() {
        let entered = input(&[
            ("brand", "XL"),
            ("nama", "Paket 5GB"),
            ("stok", "10"),
            ("hargaModal", "10000"),
            ("hargaJual", "15000"),
        ]);

        let mut modal = ModalForm::new(Voucher::schema());
        modal.open_create();
        for (k, v) in &entered {
            modal.set_field(k, v);
        }
        let submission = modal.submit().unwrap();
        modal.finish(Ok(()));

        // Server menyimpan payload dan mengembalikan baris dengan id baru
        let mut stored = submission.payload.clone();
        stored.insert("id".into(), Value::from(1));
        let created: Voucher = serde_json::from_value(Value::Object(stored)).unwrap();

        modal.open_edit(created.id, created.form_values());
        match modal.state() {
            ModalState::Open { mode, values, .. } => {
                assert_eq!(*mode, ModalMode::Edit(1));
                for (k, v) in &entered {
                    assert_eq!(&values[k], v, "field {}", k);
                }
                assert_eq!(values["hargaGrosir"], "");
                assert_eq!(values["lokasi"], "");
            }
            other => panic!("unexpected state {:?}", other),
        }

        // Submit ulang tanpa perubahan menghasilkan payload yang sama
        assert_eq!(modal.submit().unwrap().payload, submission.payload);
    }

    #[test]
    fn member_phone_is_validated() {
        let errors = Member::schema()
            .validate(&input(&[("nama", "Budi"), ("noHp", "123")]))
            .unwrap_err();
        assert_eq!(errors["noHp"], "Nomor HP harus 8-15 digit");
    }

    #[test]
    fn user_password_required_only_on_create() {
        let values = input(&[
            ("nama", "Sari"),
            ("email", "sari@konter.id"),
            ("role", "KASIR"),
        ]);
        assert!(user_schema(false).validate(&values).is_ok());
        let errors = user_schema(true).validate(&values).unwrap_err();
        assert_eq!(errors["password"], "Password wajib diisi");

        let mut short = values.clone();
        short.insert("password".into(), "12345".into());
        let errors = user_schema(false).validate(&short).unwrap_err();
        assert_eq!(errors["password"], "Password minimal 6 karakter");
    }

    #[test]
    fn member_name_length_is_checked() {
        let errors = Member::schema()
            .validate(&input(&[("nama", "B"), ("noHp", "081234567890")]))
            .unwrap_err();
        assert_eq!(errors["nama"], "Nama harus 2-100 karakter");
    }
}
