//! Display formatting for prices, areas, dates and contact details.

use crate::models::Price;
use chrono::{DateTime, Datelike, Utc};

pub const TAKA: char = '৳';

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Groups digits the South-Asian way: last three, then pairs (`1,25,00,000`).
pub fn group_lakh(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Groups digits in threes (`1,450`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Taka amount, e.g. `৳1,25,00,000`, or `৳1.3Cr` / `৳12.5L` / `৳45K` when `compact`.
pub fn format_amount(amount: f64, compact: bool) -> String {
    if compact {
        if amount >= CRORE {
            return format!("{TAKA}{:.1}Cr", amount / CRORE);
        }
        if amount >= LAKH {
            return format!("{TAKA}{:.1}L", amount / LAKH);
        }
        if amount >= 1000.0 {
            return format!("{TAKA}{:.0}K", amount / 1000.0);
        }
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{TAKA}{}", group_lakh(amount.abs().round() as u64))
}

/// Listing price. Free-text prices such as "Contact for Price" are shown as written.
pub fn format_price(price: &Price, compact: bool) -> String {
    match (price, price.amount()) {
        (_, Some(amount)) => format_amount(amount, compact),
        (Price::Text(text), None) => text.clone(),
        (Price::Amount(_), None) => String::new(),
    }
}

pub fn format_area(sq_ft: f64) -> String {
    let whole = sq_ft.trunc();
    let fraction = ((sq_ft - whole) * 1000.0).round() as u64;
    let mut out = group_thousands(whole as u64);
    if fraction > 0 {
        let decimals = format!("{fraction:03}");
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    format!("{out} sq ft")
}

/// "Just now", "5m ago", "3h ago", "2d ago", "1w ago"; older dates as "5 Jan" (with the year
/// when it differs from `now`).
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    match seconds {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 604_800 => format!("{}d ago", s / 86_400),
        s if s < 2_592_000 => format!("{}w ago", s / 604_800),
        _ if then.year() != now.year() => then.format("%-d %b %Y").to_string(),
        _ => then.format("%-d %b").to_string(),
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%-d %B %Y").to_string()
}

/// URL slug from a listing title
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        } else if ch.is_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        }
    }
    slug
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head.trim_end())
}

fn span(digits: &str, start: usize, end: usize) -> &str {
    let end = end.min(digits.len());
    let start = start.min(end);
    &digits[start..end]
}

/// Bangladeshi phone numbers: `+880 17 1100 0000` or `0171 100 0000`. Anything else is
/// returned as given.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.starts_with("880") {
        let n = digits.len();
        return format!(
            "+880 {} {} {}",
            span(&digits, 3, 5),
            span(&digits, 5, 9),
            span(&digits, 9, n)
        );
    }
    if digits.starts_with('0') {
        let n = digits.len();
        return format!(
            "{} {} {}",
            span(&digits, 0, 4),
            span(&digits, 4, 7),
            span(&digits, 7, n)
        );
    }
    phone.to_string()
}
