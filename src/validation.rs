//! Client-side form checks. Each validator reports every failing field at once so a form can
//! show all messages together, and callers run them before anything goes over the network.

use crate::models::{LoginCredentials, NewListing, Price, RegisterData};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Field name to message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    fn check(&mut self, ok: bool, field: &'static str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "invalid input ({})", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn chars(value: &str) -> usize {
    value.trim().chars().count()
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

pub fn login(credentials: &LoginCredentials) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.check(is_email(&credentials.email), "email", "Invalid email address");
    errors.check(!credentials.password.is_empty(), "password", "Password is required");
    errors.into_result()
}

pub fn register(data: &RegisterData) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.check(chars(&data.name) >= 2, "name", "Name must be at least 2 characters");
    errors.check(is_email(&data.email), "email", "Invalid email address");
    errors.check(
        data.password.chars().count() >= 6,
        "password",
        "Password must be at least 6 characters",
    );
    errors.check(
        data.password == data.confirm_password,
        "confirmPassword",
        "Passwords don't match",
    );
    errors.into_result()
}

/// Contact form on a listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

fn digits(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

pub fn contact(form: &ContactForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.check(chars(&form.name) >= 2, "name", "Name must be at least 2 characters");
    errors.check(is_email(&form.email), "email", "Invalid email address");
    errors.check(digits(&form.phone) >= 10, "phone", "Phone number must be at least 10 digits");
    errors.check(
        chars(&form.message) >= 10,
        "message",
        "Message must be at least 10 characters",
    );
    errors.into_result()
}

pub fn listing(listing: &NewListing) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.check(chars(&listing.title) >= 5, "title", "Title must be at least 5 characters");

    let price_ok = match &listing.price {
        Price::Amount(amount) => *amount > 0.0,
        Price::Text(text) => match listing.price.amount() {
            Some(amount) => amount > 0.0,
            None => !text.trim().is_empty(),
        },
    };
    errors.check(price_ok, "price", "Enter a price or a price note");

    errors.check(listing.area_sq_ft >= 1.0, "areaSqFt", "Area must be at least 1 sq ft");
    errors.check(
        chars(&listing.address) >= 5,
        "address",
        "Address must be at least 5 characters",
    );
    errors.check(!listing.city.trim().is_empty(), "city", "City is required");
    errors.check(!listing.images.is_empty(), "images", "At least one image is required");
    errors.into_result()
}
