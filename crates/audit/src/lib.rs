pub mod alert;
pub mod rules;
pub mod sample;

pub use alert::{Alert, AlertCategory, AuditResult, ClaimContext};
pub use rules::{audit, DOCTOR_FEES_CAP, MEDICINE_SHARE_LIMIT_PERCENT, ROOM_RENT_CAP};
pub use sample::sample_bill;
