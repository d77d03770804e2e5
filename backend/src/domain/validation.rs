//! Form field validators shared by the booking and RSVP flows.

use once_cell::sync::Lazy;
use regex::Regex;

/// Simple `local@domain.tld` shape; intentionally permissive
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Permissive international phone shape: optional leading `+`, up to two
/// 1-4 digit groups separated by spaces/dashes/dots/parens, then a final
/// 1-9 digit group. Applied after stripping whitespace.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?\(?[0-9]{1,4}\)?[-\s.]?\(?[0-9]{1,4}\)?[-\s.]?[0-9]{1,9}$")
        .expect("phone pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}
