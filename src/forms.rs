//! Client-side form validation.
//!
//! Each `validate_*` turns raw form input into the wire request it feeds,
//! or returns every field error in form order. Nothing here touches the
//! network; a form that fails validation never produces a request.

use uuid::Uuid;
use wire::{
    CategoryRequest, ChangePasswordRequest, CreateUserRequest, DancingPackageRequest, DressItemRequest, LoginRequest,
    Role, SignUpRequest, SpecialPackageRequest, UpdateProfileRequest, UpdateUserRequest,
};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_FULL_NAME_LEN: usize = 3;
pub const PHONE_HINT: &str = "Use +94XXXXXXXXX or 0XXXXXXXXX";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered per-field messages from one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", join(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError { field, message: message.to_owned() });
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.errors.is_empty() { Ok(value()) } else { Err(self) }
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message for `field`, the one shown inline under the input.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// FIELD RULES
// =============================================================================

/// Sri Lankan mobile/landline: `+94` or `0` followed by nine digits.
#[must_use]
pub fn is_valid_phone(raw: &str) -> bool {
    let digits = raw.strip_prefix("+94").or_else(|| raw.strip_prefix('0'));
    digits.is_some_and(|d| d.len() == 9 && d.bytes().all(|b| b.is_ascii_digit()))
}

/// `local@domain.tld` with no whitespace and non-empty labels.
#[must_use]
pub fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// =============================================================================
// AUTH FORMS
// =============================================================================

/// # Errors
///
/// Returns the field errors when either input is blank.
pub fn validate_sign_in(email: &str, password: &str) -> Result<LoginRequest, ValidationErrors> {
    let email = email.trim();
    let mut errs = ValidationErrors::default();
    if email.is_empty() {
        errs.push("email", "Email is required");
    }
    if password.is_empty() {
        errs.push("password", "Password is required");
    }
    errs.into_result(|| LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// # Errors
///
/// Returns every failing field in form order.
pub fn validate_sign_up(form: &SignUpForm) -> Result<SignUpRequest, ValidationErrors> {
    let mut errs = ValidationErrors::default();
    if char_len(&form.full_name) < MIN_FULL_NAME_LEN {
        errs.push("fullName", "Full name must be at least 3 characters");
    }
    if !is_valid_phone(&form.phone) {
        errs.push("phone", PHONE_HINT);
    }
    if !is_valid_email(&form.email) {
        errs.push("email", "Invalid email");
    }
    if char_len(&form.password) < MIN_PASSWORD_LEN {
        errs.push("password", "Password must be at least 8 characters");
    }
    errs.into_result(|| SignUpRequest {
        full_name: form.full_name.clone(),
        phone: form.phone.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
    })
}

// =============================================================================
// PROFILE FORMS
// =============================================================================

/// Inputs are trimmed before checking.
///
/// # Errors
///
/// Returns every failing field in form order.
pub fn validate_profile(full_name: &str, phone: &str) -> Result<UpdateProfileRequest, ValidationErrors> {
    let full_name = full_name.trim();
    let phone = phone.trim();
    let mut errs = ValidationErrors::default();
    if full_name.is_empty() {
        errs.push("fullName", "Full name is required!");
    } else if char_len(full_name) < MIN_FULL_NAME_LEN {
        errs.push("fullName", "Full name must be at least 3 characters!");
    }
    if !is_valid_phone(phone) {
        errs.push("phone", PHONE_HINT);
    }
    errs.into_result(|| UpdateProfileRequest { full_name: full_name.to_owned(), phone: phone.to_owned() })
}

/// The match check only runs once every field passes on its own.
///
/// # Errors
///
/// Returns every failing field, or the mismatch on `confirmPassword`.
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<ChangePasswordRequest, ValidationErrors> {
    let mut errs = ValidationErrors::default();
    if current.is_empty() {
        errs.push("currentPassword", "Current password is required!");
    }
    if char_len(new) < MIN_PASSWORD_LEN {
        errs.push("newPassword", "Password must be at least 8 characters!");
    }
    if confirm.is_empty() {
        errs.push("confirmPassword", "Confirm your password!");
    }
    if errs.errors.is_empty() && new != confirm {
        errs.push("confirmPassword", "Passwords do not match!");
    }
    errs.into_result(|| ChangePasswordRequest {
        current_password: current.to_owned(),
        new_password: new.to_owned(),
        confirm_password: confirm.to_owned(),
    })
}

// =============================================================================
// ADMIN FORMS
// =============================================================================

/// # Errors
///
/// Returns an error when the name is blank.
pub fn validate_category(name: &str, description: Option<&str>) -> Result<CategoryRequest, ValidationErrors> {
    let name = name.trim();
    let mut errs = ValidationErrors::default();
    if name.is_empty() {
        errs.push("name", "Category name is required");
    }
    errs.into_result(|| CategoryRequest {
        name: name.to_owned(),
        description: description.map(str::trim).filter(|d| !d.is_empty()).map(str::to_owned),
    })
}

#[derive(Debug, Clone, Default)]
pub struct DressItemForm {
    pub name: String,
    pub description: Option<String>,
    pub quantity_adult: Option<i32>,
    pub quantity_page_boys: Option<i32>,
    pub category_id: Option<Uuid>,
}

/// Missing quantities default to zero.
///
/// # Errors
///
/// Returns one form-level error when the name or category is missing.
pub fn validate_dress_item(form: &DressItemForm) -> Result<DressItemRequest, ValidationErrors> {
    let mut errs = ValidationErrors::default();
    let category_id = match form.category_id {
        Some(id) if !form.name.trim().is_empty() => id,
        _ => {
            errs.push("form", "Dress name and category are required");
            return Err(errs);
        }
    };
    Ok(DressItemRequest {
        dress_item_name: form.name.clone(),
        description: form.description.clone().unwrap_or_default(),
        quantity_adult: form.quantity_adult.unwrap_or(0),
        quantity_page_boys: form.quantity_page_boys.unwrap_or(0),
        category_id,
    })
}

/// # Errors
///
/// Returns every failing field in form order.
pub fn validate_dancing_package(
    name: &str,
    details: &str,
    price: Option<f64>,
) -> Result<DancingPackageRequest, ValidationErrors> {
    let mut errs = ValidationErrors::default();
    if name.trim().is_empty() {
        errs.push("name", "Package name is required!");
    }
    if details.trim().is_empty() {
        errs.push("details", "Package details are required!");
    }
    match price {
        None => errs.push("price", "Price is required"),
        Some(p) if p.is_nan() || p <= 0.0 => errs.push("price", "Price must be greater than 0"),
        Some(_) => {}
    }
    errs.into_result(|| DancingPackageRequest {
        name: name.trim().to_owned(),
        details: details.trim().to_owned(),
        price: price.unwrap_or_default(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct SpecialPackageForm {
    pub name: String,
    pub description: String,
    pub free_of_charge_items: Option<String>,
    pub price: Option<f64>,
    pub discount_percentage: Option<f64>,
}

/// # Errors
///
/// Returns every failing field in form order.
pub fn validate_special_package(form: &SpecialPackageForm) -> Result<SpecialPackageRequest, ValidationErrors> {
    let mut errs = ValidationErrors::default();
    if form.name.trim().is_empty() {
        errs.push("name", "Package name is required!");
    }
    if form.description.trim().is_empty() {
        errs.push("description", "Description is required!");
    }
    match form.price {
        None => errs.push("price", "Price is required in numbers!"),
        Some(p) if p.is_nan() || p <= 0.0 => errs.push("price", "Price must be greater than 0!"),
        Some(_) => {}
    }
    match form.discount_percentage {
        None => errs.push("discountPercentage", "Discount is required in numbers!"),
        Some(d) if d.is_nan() => errs.push("discountPercentage", "Discount is required in numbers!"),
        Some(d) if d < 0.0 => errs.push("discountPercentage", "Discount cannot be negative!"),
        Some(d) if d > 100.0 => errs.push("discountPercentage", "Discount cannot exceed 100!"),
        Some(_) => {}
    }
    errs.into_result(|| SpecialPackageRequest {
        name: form.name.trim().to_owned(),
        description: form.description.trim().to_owned(),
        free_of_charge_items: form
            .free_of_charge_items
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        price: form.price.unwrap_or_default(),
        discount_percentage: form.discount_percentage.unwrap_or_default(),
    })
}

#[derive(Debug, Clone)]
pub struct UserForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Blank means "leave unchanged" on update.
    pub password: Option<String>,
    pub role: Role,
}

fn check_user(form: &UserForm) -> (ValidationErrors, Option<String>) {
    let mut errs = ValidationErrors::default();
    if form.full_name.trim().is_empty() {
        errs.push("fullName", "Full name is required");
    }
    if !is_valid_email(&form.email) {
        errs.push("email", "Invalid email format");
    }
    if !is_valid_phone(&form.phone) {
        errs.push("phone", PHONE_HINT);
    }
    let password = form.password.clone().filter(|p| !p.is_empty());
    if password.as_deref().is_some_and(|p| char_len(p) < MIN_PASSWORD_LEN) {
        errs.push("password", "Password must be at least 8 characters");
    }
    (errs, password)
}

/// New accounts need a password.
///
/// # Errors
///
/// Returns every failing field in form order.
pub fn validate_new_user(form: &UserForm) -> Result<CreateUserRequest, ValidationErrors> {
    let (mut errs, password) = check_user(form);
    if password.is_none() {
        errs.push("password", "Password must be at least 8 characters");
    }
    errs.into_result(|| CreateUserRequest {
        email: form.email.clone(),
        full_name: form.full_name.clone(),
        password: password.unwrap_or_default(),
        phone: form.phone.clone(),
        role: Some(form.role),
    })
}

/// # Errors
///
/// Returns every failing field in form order.
pub fn validate_user_update(form: &UserForm) -> Result<UpdateUserRequest, ValidationErrors> {
    let (errs, password) = check_user(form);
    errs.into_result(|| UpdateUserRequest {
        full_name: form.full_name.clone(),
        phone: form.phone.clone(),
        role: Some(form.role),
        password,
    })
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
