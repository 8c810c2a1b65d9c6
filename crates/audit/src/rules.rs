use mediaudit_core::{Bill, Rupees};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::alert::{Alert, AlertCategory, AuditResult, ClaimContext};

/// Daily room rent ceiling, in rupees.
pub const ROOM_RENT_CAP: u64 = 4000;
/// Doctor fee coverage ceiling, in rupees.
pub const DOCTOR_FEES_CAP: u64 = 2500;
/// Largest share of the bill medicines may take, in percent.
pub const MEDICINE_SHARE_LIMIT_PERCENT: u64 = 40;

/// Items whose name contains `keyword` may not add up to more than `cap`.
struct CapRule {
    category: AlertCategory,
    keyword: &'static str,
    cap: u64,
    reason: &'static str,
}

const CAP_RULES: [CapRule; 2] = [
    CapRule {
        category: AlertCategory::RoomRent,
        keyword: "room",
        cap: ROOM_RENT_CAP,
        reason: "Exceeds daily limit",
    },
    CapRule {
        category: AlertCategory::DoctorFees,
        keyword: "doctor",
        cap: DOCTOR_FEES_CAP,
        reason: "Exceeds coverage cap",
    },
];

impl CapRule {
    fn evaluate(&self, bill: &Bill) -> Option<Alert> {
        if !bill.any_mentions(self.keyword) {
            return None;
        }
        let claimed = bill.total_mentioning(self.keyword);
        let cap = Rupees::from_whole(self.cap);
        (claimed > cap).then(|| {
            Alert::new(
                self.category,
                format!("{} ({cap}): Claimed {claimed}", self.reason),
            )
        })
    }
}

fn medicine_share(bill: &Bill, total: Rupees) -> Option<Alert> {
    let total = total.as_decimal();
    if total <= Decimal::ZERO {
        return None;
    }
    let medicine = bill.total_mentioning("medicine").as_decimal();
    // medicine <= total, so the ratio is at most 1 and scaling it cannot overflow.
    let share = medicine.checked_div(total)? * Decimal::ONE_HUNDRED;

    // Cross-multiplied where it fits, so the boundary at the limit is exact.
    let limit = Decimal::from(MEDICINE_SHARE_LIMIT_PERCENT);
    let exceeds = match (
        medicine.checked_mul(Decimal::ONE_HUNDRED),
        total.checked_mul(limit),
    ) {
        (Some(lhs), Some(rhs)) => lhs > rhs,
        _ => share > limit,
    };
    if !exceeds {
        return None;
    }

    let pct = share
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    Some(Alert::new(
        AlertCategory::MedicineCosts,
        format!("Unusually high: {pct}% of total"),
    ))
}

fn claim_reconciliation(total: Rupees, claim: &ClaimContext) -> Option<Alert> {
    let claimed = claim.active_claim()?;
    (total > claimed).then(|| {
        Alert::new(
            AlertCategory::ClaimAmount,
            format!("Total bill {total} exceeds claimed amount {claimed}"),
        )
    })
}

/// Run every audit rule over `bill`, in fixed order, at most one alert each.
pub fn audit(bill: &Bill, claim: &ClaimContext) -> AuditResult {
    let total = bill.total();

    let alerts: Vec<Alert> = CAP_RULES
        .iter()
        .map(|rule| rule.evaluate(bill))
        .chain([medicine_share(bill, total), claim_reconciliation(total, claim)])
        .flatten()
        .collect();

    for alert in &alerts {
        tracing::debug!(category = %alert.category, "{}", alert.message);
    }

    AuditResult { alerts, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_bill;
    use mediaudit_core::LineItem;
    use rust_decimal_macros::dec;

    fn bill(items: &[(&str, Decimal)]) -> Bill {
        items
            .iter()
            .map(|&(item, amount)| LineItem::new(item, Rupees::new(amount).unwrap()).unwrap())
            .collect()
    }

    fn categories(result: &AuditResult) -> Vec<AlertCategory> {
        result.alerts.iter().map(|a| a.category).collect()
    }

    // ── End-to-end scenarios ─────────────────────────────────────────────────

    #[test]
    fn sample_bill_over_claim() {
        let result = audit(&sample_bill(), &ClaimContext::from_rupees(10_000));
        assert_eq!(result.total.as_decimal(), dec!(12500));
        assert_eq!(
            result.alerts,
            vec![
                Alert::new(AlertCategory::RoomRent, "Exceeds daily limit (₹4000): Claimed ₹5000"),
                Alert::new(AlertCategory::DoctorFees, "Exceeds coverage cap (₹2500): Claimed ₹3000"),
                Alert::new(
                    AlertCategory::ClaimAmount,
                    "Total bill ₹12500 exceeds claimed amount ₹10000"
                ),
            ]
        );
    }

    #[test]
    fn medicine_heavy_bill_without_claim() {
        let b = bill(&[("Medicine X", dec!(5000)), ("Lab Test", dec!(2000))]);
        let result = audit(&b, &ClaimContext::from_rupees(0));
        assert_eq!(result.total.as_decimal(), dec!(7000));
        assert_eq!(
            result.alerts,
            vec![Alert::new(AlertCategory::MedicineCosts, "Unusually high: 71.43% of total")]
        );
    }

    #[test]
    fn consultation_over_claim_only() {
        let b = bill(&[("Consultation", dec!(1000))]);
        let result = audit(&b, &ClaimContext::from_rupees(500));
        assert_eq!(result.total.as_decimal(), dec!(1000));
        assert_eq!(categories(&result), vec![AlertCategory::ClaimAmount]);
    }

    #[test]
    fn overlapping_keywords_count_twice() {
        let b = bill(&[("Private Room Medicine", dec!(4500))]);
        let result = audit(&b, &ClaimContext::from_rupees(5000));
        assert_eq!(result.total.as_decimal(), dec!(4500));
        assert_eq!(
            result.alerts,
            vec![
                Alert::new(AlertCategory::RoomRent, "Exceeds daily limit (₹4000): Claimed ₹4500"),
                Alert::new(AlertCategory::MedicineCosts, "Unusually high: 100% of total"),
            ]
        );
    }

    // ── Boundaries ───────────────────────────────────────────────────────────

    #[test]
    fn room_rent_boundary() {
        let none = ClaimContext::default();
        assert!(!audit(&bill(&[("Room Rent", dec!(4000))]), &none).has(AlertCategory::RoomRent));
        assert!(audit(&bill(&[("Room Rent", dec!(4001))]), &none).has(AlertCategory::RoomRent));
    }

    #[test]
    fn room_rent_sums_duplicate_rows() {
        let b = bill(&[("Room Rent day 1", dec!(2500)), ("room rent day 2", dec!(2500))]);
        let result = audit(&b, &ClaimContext::default());
        assert_eq!(
            result.alerts[0].message,
            "Exceeds daily limit (₹4000): Claimed ₹5000"
        );
    }

    #[test]
    fn doctor_fees_boundary() {
        let none = ClaimContext::default();
        let at = bill(&[("Doctor Fees", dec!(2500)), ("Lab", dec!(10000))]);
        let over = bill(&[("DOCTOR visit", dec!(2501)), ("Lab", dec!(10000))]);
        assert!(audit(&at, &none).alerts.is_empty());
        assert_eq!(categories(&audit(&over, &none)), vec![AlertCategory::DoctorFees]);
    }

    #[test]
    fn medicine_share_boundary() {
        let none = ClaimContext::default();
        let at = bill(&[("Medicine", dec!(4000)), ("Lab", dec!(6000))]);
        let over = bill(&[("Medicine", dec!(4001)), ("Lab", dec!(5999))]);
        assert!(!audit(&at, &none).has(AlertCategory::MedicineCosts));
        let result = audit(&over, &none);
        assert_eq!(
            result.alerts,
            vec![Alert::new(AlertCategory::MedicineCosts, "Unusually high: 40.01% of total")]
        );
    }

    #[test]
    fn claim_boundary() {
        let b = bill(&[("Consultation", dec!(1000))]);
        assert!(audit(&b, &ClaimContext::from_rupees(1000)).alerts.is_empty());
        assert!(audit(&b, &ClaimContext::from_rupees(999)).has(AlertCategory::ClaimAmount));
    }

    #[test]
    fn empty_bill_with_claim_has_no_alerts() {
        let result = audit(&Bill::default(), &ClaimContext::from_rupees(5000));
        assert!(result.total.is_zero());
        assert!(result.alerts.is_empty());
    }

    #[test]
    fn zero_total_never_flags_medicine() {
        let b = bill(&[("Medicine A", dec!(0)), ("Medicine B", dec!(0))]);
        let result = audit(&b, &ClaimContext::default());
        assert!(result.alerts.is_empty());
    }

    #[test]
    fn largest_parseable_amounts_do_not_overflow() {
        let line = mediaudit_core::parse_line("Medicine 1000000000000000000000000000").unwrap();
        let result = audit(&Bill::new(vec![line]), &ClaimContext::default());
        assert_eq!(
            result.alerts,
            vec![Alert::new(AlertCategory::MedicineCosts, "Unusually high: 100% of total")]
        );

        let b = bill(&[
            ("Medicine A", dec!(50000000000000000000000000000)),
            ("Medicine B", dec!(50000000000000000000000000000)),
            ("Lab Test", dec!(1)),
        ]);
        let result = audit(&b, &ClaimContext::from_rupees(10_000));
        assert_eq!(result.total.as_decimal(), Decimal::MAX);
        assert_eq!(
            categories(&result),
            vec![AlertCategory::MedicineCosts, AlertCategory::ClaimAmount]
        );
    }

    // ── Properties ───────────────────────────────────────────────────────────

    #[test]
    fn total_is_exact_sum() {
        let b = bill(&[("A", dec!(0.10)), ("B", dec!(0.20)), ("C", dec!(1234.56))]);
        assert_eq!(audit(&b, &ClaimContext::default()).total.as_decimal(), dec!(1234.86));
    }

    #[test]
    fn no_keyword_means_no_category() {
        let b = bill(&[("Ward charges", dec!(90000)), ("Nursing", dec!(50000))]);
        let result = audit(&b, &ClaimContext::default());
        assert!(result.alerts.is_empty());
    }

    #[test]
    fn audit_is_deterministic() {
        let b = sample_bill();
        let claim = ClaimContext::from_rupees(10_000);
        assert_eq!(audit(&b, &claim), audit(&b, &claim));
    }

    #[test]
    fn fractional_amounts_render_without_trailing_zeros() {
        let b = bill(&[("Room Rent", dec!(4000.50))]);
        let result = audit(&b, &ClaimContext::new(Some(Rupees::new(dec!(4000.25)).unwrap())));
        assert_eq!(
            result.alerts,
            vec![
                Alert::new(AlertCategory::RoomRent, "Exceeds daily limit (₹4000): Claimed ₹4000.5"),
                Alert::new(
                    AlertCategory::ClaimAmount,
                    "Total bill ₹4000.5 exceeds claimed amount ₹4000.25"
                ),
            ]
        );
    }
}
