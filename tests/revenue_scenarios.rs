use backoffice::{
    common::i18n::Locale,
    models::{Booking, PaymentEvent, YearMonth},
    services::revenue_service::{
        calculate_monthly_revenue, evaluate, installment_info, installment_schedule, monthly_revenue,
    },
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn booking(created: (i32, u32, u32), price: &str, down: &str, count: u32) -> Booking {
    Booking {
        created_at: NaiveDate::from_ymd_opt(created.0, created.1, created.2)
            .and_then(|d| d.and_hms_opt(15, 0, 0)),
        travel_price: Decimal::from_str_exact(price).unwrap(),
        down_payment: Decimal::from_str_exact(down).unwrap(),
        installments_count: count,
        ..Default::default()
    }
}

// Todos os meses de 2024 a 2026
fn all_months() -> Vec<YearMonth> {
    (0..36).map(|i| ym(2024, 1).plus_months(i)).collect()
}

fn portfolio() -> Vec<Booking> {
    let mut explicit = booking((2025, 1, 2), "500", "100", 2);
    explicit.first_installment_due_date = NaiveDate::from_ymd_opt(2025, 6, 1);

    vec![
        booking((2025, 1, 10), "1000", "200", 4),
        booking((2025, 3, 5), "900", "0", 0),
        explicit,
        booking((2024, 11, 30), "1000", "0", 3),
        booking((2025, 2, 28), "2499.90", "499.90", 12),
        booking((2025, 5, 1), "0", "0", 6),
    ]
}

#[test]
fn scenario_a_down_payment_then_four_installments() {
    let bookings = vec![booking((2025, 1, 10), "1000", "200", 4)];

    assert_eq!(calculate_monthly_revenue(&bookings, 2025, 1), Decimal::new(200, 0));
    for month in 2..=5 {
        assert_eq!(calculate_monthly_revenue(&bookings, 2025, month), Decimal::new(200, 0));
    }
    assert_eq!(calculate_monthly_revenue(&bookings, 2025, 6), Decimal::ZERO);
    assert_eq!(calculate_monthly_revenue(&bookings, 2024, 12), Decimal::ZERO);
}

#[test]
fn scenario_b_full_payment_in_creation_month_only() {
    let bookings = vec![booking((2025, 3, 5), "900", "0", 0)];

    for period in all_months() {
        let expected = if period == ym(2025, 3) { Decimal::new(900, 0) } else { Decimal::ZERO };
        assert_eq!(monthly_revenue(&bookings, period), expected, "{period}");
    }
}

#[test]
fn scenario_c_explicit_first_installment_ignores_creation() {
    for created in [(2024, 2, 1), (2025, 1, 15), (2025, 9, 9)] {
        let mut b = booking(created, "500", "100", 2);
        b.first_installment_due_date = NaiveDate::from_ymd_opt(2025, 6, 1);

        let installments_only = |period: YearMonth| {
            evaluate(&b, period)
                .events()
                .iter()
                .filter(|e| matches!(e, PaymentEvent::Installment { .. }))
                .map(|e| e.amount())
                .sum::<Decimal>()
        };

        assert_eq!(installments_only(ym(2025, 5)), Decimal::ZERO);
        assert_eq!(installments_only(ym(2025, 6)), Decimal::new(200, 0));
        assert_eq!(installments_only(ym(2025, 7)), Decimal::new(200, 0));
        assert_eq!(installments_only(ym(2025, 8)), Decimal::ZERO);
    }
}

#[test]
fn scenario_d_malformed_due_date_falls_back_to_month_after_creation() {
    let raw = serde_json::json!({
        "createdAt": "2025-01-10T10:00:00Z",
        "travelPrice": 1000,
        "downPayment": 200,
        "installmentsCount": 4,
        "firstInstallmentDueDate": "vence quando der"
    });
    let b: Booking = serde_json::from_value(raw).unwrap();
    assert_eq!(b.first_installment_due_date, None);

    let bookings = vec![b];
    assert_eq!(calculate_monthly_revenue(&bookings, 2025, 1), Decimal::new(200, 0));
    assert_eq!(calculate_monthly_revenue(&bookings, 2025, 2), Decimal::new(200, 0));
    assert_eq!(calculate_monthly_revenue(&bookings, 2025, 6), Decimal::ZERO);
}

#[test]
fn revenue_is_never_negative() {
    let mut bookings = portfolio();
    bookings.push(booking((2025, 1, 1), "100", "400", 3));

    for period in all_months() {
        assert!(monthly_revenue(&bookings, period) >= Decimal::ZERO, "{period}");
    }
}

#[test]
fn revenue_is_additive_over_bookings() {
    let bookings = portfolio();

    for period in all_months() {
        let individual: Decimal = bookings
            .iter()
            .map(|b| monthly_revenue(std::slice::from_ref(b), period))
            .sum();
        assert_eq!(monthly_revenue(&bookings, period), individual, "{period}");
    }
}

#[test]
fn installments_conserve_the_balance() {
    for b in portfolio().into_iter().filter(|b| b.is_installment_plan()) {
        let installments: Decimal = installment_schedule(&b)
            .iter()
            .filter(|s| matches!(s.event, PaymentEvent::Installment { .. }))
            .map(|s| s.event.amount())
            .sum();

        let balance = b.travel_price - b.down_payment;
        assert!(
            (installments - balance).abs() < Decimal::new(1, 20),
            "installments {installments} vs balance {balance}"
        );
    }
}

#[test]
fn non_terminating_division_stays_within_tolerance() {
    let b = booking((2025, 1, 10), "1000", "0", 3);
    let total: Decimal = all_months().into_iter().map(|p| monthly_revenue(std::slice::from_ref(&b), p)).sum();
    assert!((total - Decimal::new(1000, 0)).abs() < Decimal::new(1, 20));
}

#[test]
fn full_payment_lands_in_exactly_one_month() {
    let b = booking((2024, 12, 31), "1750.25", "0", 0);
    let non_zero: Vec<_> = all_months()
        .into_iter()
        .filter(|p| !monthly_revenue(std::slice::from_ref(&b), *p).is_zero())
        .collect();

    assert_eq!(non_zero, vec![ym(2024, 12)]);
}

#[test]
fn label_lookup_agrees_with_allocator() {
    for b in portfolio() {
        for period in all_months() {
            let allocated = monthly_revenue(std::slice::from_ref(&b), period);
            match installment_info(&b, period, Locale::Pt) {
                Some(info) => assert_eq!(info.amount, allocated, "{period}"),
                None => assert!(allocated.is_zero(), "{period}"),
            }
        }
    }
}

#[test]
fn same_inputs_same_output() {
    let bookings = portfolio();
    let before = bookings.clone();

    let first = monthly_revenue(&bookings, ym(2025, 3));
    let second = monthly_revenue(&bookings, ym(2025, 3));

    assert_eq!(first, second);
    assert_eq!(bookings, before);
}
