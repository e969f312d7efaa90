mod common;

use common::{at, empty_session};
use rust_decimal::Decimal;
use wallet_core::{
    core::services::{AlertLevel, BudgetTracker},
    ledger::Direction,
    Amount, LedgerError,
};

#[test]
fn spending_past_the_limit_is_exceeded() {
    let (mut session, _clock) = empty_session();
    session.set_budget_limit("300").unwrap();
    session
        .add_transaction("200", "Food", "", Direction::Expense)
        .unwrap();
    session
        .add_transaction("115", "Bills", "", Direction::Expense)
        .unwrap();

    let status = session.budget_status();
    assert_eq!(status.spent, Amount::from_cents(31_500));
    assert_eq!(status.percent, Decimal::new(105, 0));
    assert_eq!(status.level, AlertLevel::Exceeded);
    assert_eq!(status.remaining, Amount::ZERO);
}

#[test]
fn levels_climb_as_spending_grows() {
    let (mut session, _clock) = empty_session();
    session.set_budget_limit("$1,000").unwrap();
    let steps = [
        ("499.99", AlertLevel::OnTrack),
        ("0.01", AlertLevel::HalfUsed),
        ("250", AlertLevel::Notice75),
        ("150", AlertLevel::Critical90),
        ("100", AlertLevel::Exceeded),
    ];
    for (raw, expected) in steps {
        session
            .add_transaction(raw, "Shopping", "", Direction::Expense)
            .unwrap();
        assert_eq!(session.budget_status().level, expected, "after {raw}");
    }
}

#[test]
fn income_and_other_months_do_not_count() {
    let (mut session, clock) = empty_session();
    session.set_budget_limit("100").unwrap();
    session
        .add_transaction("5000", "Salary", "", Direction::Income)
        .unwrap();
    clock.set(at(2025, 9, 30, 23, 59));
    session
        .add_transaction("90", "Travel", "", Direction::Expense)
        .unwrap();
    clock.set(at(2025, 10, 1, 0, 0));
    session
        .add_transaction("10", "Travel", "", Direction::Expense)
        .unwrap();

    let status = session.budget_status();
    assert_eq!(status.period_key, "2025-10");
    assert_eq!(status.spent, Amount::from_cents(1_000));
    assert_eq!(status.remaining, Amount::from_cents(9_000));
    assert_eq!(status.level, AlertLevel::OnTrack);
}

#[test]
fn invalid_limits_are_rejected() {
    let (mut session, _clock) = empty_session();
    session.set_budget_limit("250").unwrap();
    let before = session.budget_status();

    assert!(matches!(
        session.set_budget_limit("0"),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        session.set_budget_limit("-50"),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        session.set_budget_limit("lots"),
        Err(LedgerError::Parse { .. })
    ));
    assert_eq!(session.budget_status(), before);
}

#[test]
fn messages_cover_every_level() {
    let levels = [
        AlertLevel::Unset,
        AlertLevel::Exceeded,
        AlertLevel::Critical90,
        AlertLevel::Notice75,
        AlertLevel::HalfUsed,
        AlertLevel::OnTrack,
    ];
    for level in levels {
        assert!(!level.message().is_empty(), "{level}");
    }
    assert_eq!(
        AlertLevel::Critical90.message(),
        "WARNING: You have used 90% of your budget."
    );
}

#[test]
fn tracker_starts_unset() {
    let tracker = BudgetTracker::new(common::fixed_clock(2025, 10, 20));
    assert_eq!(tracker.state().monthly_limit, Amount::ZERO);
    assert_eq!(tracker.state().period_key, "2025-10");
    assert_eq!(tracker.current_state().level, AlertLevel::Unset);
}

#[test]
fn oversized_amounts_leave_session_intact() {
    let (mut session, _clock) = empty_session();
    session.set_budget_limit("100").unwrap();
    let before = session.budget_status();

    let huge = session.add_transaction(
        "1000000000000000000000000000",
        "Food",
        "",
        Direction::Expense,
    );
    assert!(matches!(huge, Err(LedgerError::Parse { .. })));
    let huge = session.add_transaction(
        "40000000000000000000000000000",
        "Salary",
        "",
        Direction::Income,
    );
    assert!(matches!(huge, Err(LedgerError::Parse { .. })));
    assert!(session.ledger().is_empty());
    assert_eq!(session.budget_status(), before);

    session
        .add_transaction("92233720368547758.07", "Salary", "", Direction::Income)
        .unwrap();
    let overflow = session.add_transaction("0.01", "Bonus", "", Direction::Income);
    assert!(matches!(overflow, Err(LedgerError::Validation(_))));
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.balance(), Amount::from_cents(i64::MAX));
    assert_eq!(session.summary().transaction_count, 1);

    session
        .add_transaction("92233720368547758.07", "Rent", "", Direction::Expense)
        .unwrap();
    let status = session.budget_status();
    assert_eq!(status.level, AlertLevel::Exceeded);
    assert_eq!(status.spent, Amount::from_cents(i64::MAX));
    assert_eq!(session.balance(), Amount::ZERO);
}

#[test]
fn budget_status_is_idempotent() {
    let (mut session, _clock) = empty_session();
    session.set_budget_limit("200").unwrap();
    session
        .add_transaction("120", "Food", "", Direction::Expense)
        .unwrap();
    let first = session.budget_status();
    let second = session.budget_status();
    assert_eq!(first, second);
    assert_eq!(first.level, AlertLevel::HalfUsed);
    assert_eq!(
        AlertLevel::evaluate(first.limit, first.spent),
        AlertLevel::evaluate(first.limit, first.spent)
    );
}
