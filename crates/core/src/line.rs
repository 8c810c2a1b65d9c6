use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::bill::{Bill, LineItem};
use crate::money::Rupees;

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// ASCII digits with at most one decimal point, anywhere.
re!(re_plain_amount, r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)$");

/// Turn one free-text bill line into a line item.
///
/// The last whitespace-separated token is the amount; everything before it is
/// the item name. A single leading `₹` and any `,` separators are ignored.
/// Lines whose trailing token is not a plain decimal are rejected.
pub fn parse_line(line: &str) -> Option<LineItem> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (amount_token, item_tokens) = tokens.split_last()?;
    if item_tokens.is_empty() {
        return None;
    }

    let amount = parse_amount_token(amount_token)?;
    LineItem::new(&item_tokens.join(" "), amount).ok()
}

/// Outcome of running [`parse_line`] over many candidate lines.
#[derive(Debug, Clone, Default)]
pub struct LineScan {
    pub bill: Bill,
    /// Non-blank lines that did not parse.
    pub rejected: usize,
}

/// Parse every candidate line, keeping accepted items in input order.
pub fn parse_lines<I, S>(lines: I) -> LineScan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut items = Vec::new();
    let mut rejected = 0;
    for line in lines {
        let line = line.as_ref();
        match parse_line(line) {
            Some(item) => items.push(item),
            None if line.trim().is_empty() => {}
            None => rejected += 1,
        }
    }
    LineScan {
        bill: Bill::new(items),
        rejected,
    }
}

/// Strip currency decoration from a candidate amount and parse it.
pub fn parse_amount_token(token: &str) -> Option<Rupees> {
    let stripped = token.strip_prefix('₹').unwrap_or(token).replace(',', "");
    if !re_plain_amount().is_match(&stripped) {
        return None;
    }

    let digits = stripped.strip_suffix('.').unwrap_or(&stripped);
    let digits = if digits.starts_with('.') {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let dec = Decimal::from_str(&digits).ok()?;
    Rupees::new(dec).ok()
}
