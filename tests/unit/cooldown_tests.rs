//! Unit tests for the per-user cooldown ledger.

use std::time::Duration;

use lc_herald::orchestrator::CooldownLedger;

#[test]
fn unarmed_command_is_available() {
    let ledger = CooldownLedger::new(Duration::from_secs(3600));
    assert!(ledger.remaining(1, "daily").is_none());
}

#[test]
fn armed_command_reports_time_remaining() {
    let ledger = CooldownLedger::new(Duration::from_secs(3600));
    ledger.arm(1, "daily");

    let remaining = ledger.remaining(1, "daily").expect("cooldown active");
    assert!(remaining <= Duration::from_secs(3600));
    assert!(remaining > Duration::from_secs(3500));
}

#[test]
fn cooldowns_are_keyed_per_user() {
    let ledger = CooldownLedger::new(Duration::from_secs(3600));
    ledger.arm(1, "daily");

    assert!(ledger.remaining(1, "daily").is_some());
    assert!(ledger.remaining(2, "daily").is_none());
}

#[test]
fn cooldowns_are_keyed_per_command() {
    let ledger = CooldownLedger::new(Duration::from_secs(3600));
    ledger.arm(1, "daily");

    assert!(ledger.remaining(1, "daily").is_some());
    assert!(ledger.remaining(1, "question").is_none());
}

#[test]
fn expired_entry_is_dropped() {
    let ledger = CooldownLedger::new(Duration::ZERO);
    ledger.arm(1, "daily");

    assert!(ledger.remaining(1, "daily").is_none());
}
