//! Form validation for the add and edit workflows.
//!
//! Every check runs against the submitted form before anything is written,
//! and all failures are collected so the form can show them together.

use contact_store::{ContactFields, ContactStore, StoreResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Name field already held by another contact.
pub const MSG_NAME_TAKEN: &str = "Nama sudah digunakan";
/// Name field left empty.
pub const MSG_NAME_REQUIRED: &str = "Nama wajib diisi!";
/// Phone not an Indonesian mobile number.
pub const MSG_PHONE_INVALID: &str = "No Hp tidak valid!";
/// Email not well formed.
pub const MSG_EMAIL_INVALID: &str = "Email tidak valid!";

/// Indonesian mobile numbers: `+62`, `62` or `0`, then an `8xx` operator prefix.
static PHONE_ID_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?62|0)8(1[1-9]|2[1238]|3[1238]|5[1235-9]|7[78]|9[5-9]|8[1-9])[\s\d]{5,11}$")
        .expect("valid phone regex")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    ))
    .expect("valid email regex")
});

/// Longest email address accepted.
const MAX_EMAIL_LEN: usize = 254;

/// A submitted contact form, as posted by the add and edit pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Target record on edit; absent on add
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(rename = "nama", default)]
    pub name: String,

    #[serde(rename = "nohp", default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    /// Name the record had when the edit form was opened
    #[serde(rename = "oldNama", default)]
    pub old_name: String,
}

impl ContactForm {
    /// The fields written to the store.
    pub fn fields(&self) -> ContactFields {
        ContactFields::new(self.name.clone(), self.phone.clone(), self.email.clone())
    }
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name
    pub param: &'static str,
    pub msg: &'static str,
    /// The submitted value that failed
    pub value: String,
}

/// Every failed check of one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors for a name the store refused as a duplicate.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push("nama", MSG_NAME_TAKEN, name);
        errors
    }

    pub fn push(&mut self, param: &'static str, msg: &'static str, value: impl Into<String>) {
        self.0.push(FieldError {
            param,
            msg,
            value: value.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any error concerns the given field.
    pub fn has(&self, param: &str) -> bool {
        self.0.iter().any(|e| e.param == param)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

/// Which workflow a submission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Add,
    Edit,
}

/// A synchronous per-field rule.
struct Rule {
    param: &'static str,
    msg: &'static str,
    value: fn(&ContactForm) -> &str,
    check: fn(&str) -> bool,
}

const FORMAT_RULES: &[Rule] = &[
    Rule {
        param: "nohp",
        msg: MSG_PHONE_INVALID,
        value: phone_of,
        check: is_mobile_phone,
    },
    Rule {
        param: "email",
        msg: MSG_EMAIL_INVALID,
        value: email_of,
        check: is_email,
    },
];

fn phone_of(form: &ContactForm) -> &str {
    &form.phone
}

fn email_of(form: &ContactForm) -> &str {
    &form.email
}

/// Whether `phone` is an Indonesian mobile number.
pub fn is_mobile_phone(phone: &str) -> bool {
    PHONE_ID_ID.is_match(phone)
}

/// Whether `email` is a well formed address with a top level domain.
pub fn is_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LEN && EMAIL.is_match(email)
}

/// Validate a submission from the add form.
pub async fn validate_add(
    store: &dyn ContactStore,
    form: &ContactForm,
) -> StoreResult<ValidationErrors> {
    validate(store, form, Mode::Add).await
}

/// Validate a submission from the edit form.
///
/// A name match only fails when the submitted name differs from `oldNama`,
/// so saving a record under its own unchanged name is allowed.
pub async fn validate_edit(
    store: &dyn ContactStore,
    form: &ContactForm,
) -> StoreResult<ValidationErrors> {
    validate(store, form, Mode::Edit).await
}

async fn validate(
    store: &dyn ContactStore,
    form: &ContactForm,
    mode: Mode,
) -> StoreResult<ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if form.name.trim().is_empty() {
        errors.push("nama", MSG_NAME_REQUIRED, &form.name);
    } else if name_taken(store, form, mode).await? {
        errors.push("nama", MSG_NAME_TAKEN, &form.name);
    }

    for rule in FORMAT_RULES {
        let value = (rule.value)(form);
        if !(rule.check)(value) {
            errors.push(rule.param, rule.msg, value);
        }
    }

    Ok(errors)
}

async fn name_taken(store: &dyn ContactStore, form: &ContactForm, mode: Mode) -> StoreResult<bool> {
    let existing = store.find_by_name(&form.name).await?;

    Ok(match mode {
        Mode::Add => existing.is_some(),
        Mode::Edit => existing.is_some() && form.name != form.old_name,
    })
}
