use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money::Rupees;

/// Column headers of the canonical bill table.
pub const ITEM_COLUMN: &str = "Item";
pub const AMOUNT_COLUMN: &str = "Amount (₹)";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillError {
    #[error("Line item has no description")]
    EmptyItem,
    #[error("Negative amount: {0}")]
    NegativeAmount(Decimal),
}

/// One row of a bill. The item is trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLineItem")]
pub struct LineItem {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Amount (₹)")]
    amount: Rupees,
}

#[derive(Deserialize)]
struct RawLineItem {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Amount (₹)")]
    amount: Rupees,
}

impl TryFrom<RawLineItem> for LineItem {
    type Error = BillError;
    fn try_from(raw: RawLineItem) -> Result<Self, Self::Error> {
        LineItem::new(&raw.item, raw.amount)
    }
}

impl LineItem {
    pub fn new(item: &str, amount: Rupees) -> Result<Self, BillError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(BillError::EmptyItem);
        }
        Ok(LineItem {
            item: item.to_string(),
            amount,
        })
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn amount(&self) -> Rupees {
        self.amount
    }

    /// Case-insensitive, unanchored substring test against the item name.
    pub fn mentions(&self, keyword: &str) -> bool {
        self.item.to_lowercase().contains(&keyword.to_lowercase())
    }
}

/// An itemized bill in extraction order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bill {
    items: Vec<LineItem>,
}

impl Bill {
    pub fn new(items: Vec<LineItem>) -> Self {
        Bill { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Rupees {
        self.items.iter().map(LineItem::amount).sum()
    }

    /// Sum of amounts over items whose name contains `keyword`.
    pub fn total_mentioning(&self, keyword: &str) -> Rupees {
        self.items
            .iter()
            .filter(|li| li.mentions(keyword))
            .map(LineItem::amount)
            .sum()
    }

    pub fn any_mentions(&self, keyword: &str) -> bool {
        self.items.iter().any(|li| li.mentions(keyword))
    }
}

impl FromIterator<LineItem> for Bill {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Bill::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Bill {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
