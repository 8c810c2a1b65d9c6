use mediaudit_core::{Bill, LineItem, Rupees};

const SAMPLE_ITEMS: &[(&str, u64)] = &[
    ("Room Rent", 5000),
    ("Doctor Fees", 3000),
    ("Medicine A", 1200),
    ("Medicine B", 800),
    ("Lab Test", 2500),
];

/// The demonstration bill shown when nothing was uploaded.
pub fn sample_bill() -> Bill {
    SAMPLE_ITEMS
        .iter()
        .filter_map(|&(item, amount)| LineItem::new(item, Rupees::from_whole(amount)).ok())
        .collect()
}
