//! Property tests for balance aggregation over randomly generated ledgers.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use splitledger_ledger::{BalanceAggregator, aggregate_balances};
use splitledger_types::{Expense, LedgerSnapshot, ParticipantId, SettlementConfig, Share};

proptest! {
    #[test]
    fn balances_sum_to_zero(
        seed in any::<u64>(),
        participant_count in 1usize..=8,
        expense_count in 0usize..=40,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let snapshot = LedgerSnapshot::dummy_random(&mut rng, participant_count, expense_count);

        let balances = BalanceAggregator::new(SettlementConfig::strict())
            .aggregate_snapshot(&snapshot)
            .expect("consistent ledger must aggregate");

        prop_assert_eq!(balances.len(), participant_count);
        prop_assert_eq!(balances.net_total(), Some(Decimal::ZERO));
    }
}

proptest! {
    #[test]
    fn pending_expenses_never_move_balances(
        seed in any::<u64>(),
        participant_count in 1usize..=6,
        expense_count in 0usize..=30,
        extra_cents in 1i64..=1_000_000,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let snapshot = LedgerSnapshot::dummy_random(&mut rng, participant_count, expense_count);
        let participants: Vec<ParticipantId> = snapshot.participant_ids().collect();

        let baseline = aggregate_balances(&participants, &snapshot.expenses).unwrap();

        // A pending bill with a payer outside the group and lopsided shares.
        let mut noisy = snapshot.expenses.clone();
        let mut bill = Expense::pending(
            Decimal::new(extra_cents, 2),
            vec![Share::new(participants[0], Decimal::new(extra_cents * 3, 2))],
        );
        bill.payer_id = Some(ParticipantId(u64::MAX));
        noisy.push(bill);

        let with_pending = aggregate_balances(&participants, &noisy).unwrap();
        prop_assert_eq!(baseline, with_pending);
    }
}

#[test]
fn balance_map_json_matches_upstream_shape() {
    let a = ParticipantId(1);
    let b = ParticipantId(2);
    let expense = Expense::dummy_even_split(a, Decimal::new(10, 0), &[a, b]);
    let balances = aggregate_balances(&[a, b], &[expense]).unwrap();
    let json = serde_json::to_value(&balances).unwrap();
    let object = json.as_object().expect("balances serialize as an object");
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["1", "2"]);
    let owed: Decimal = object["1"].as_str().unwrap().parse().unwrap();
    let owing: Decimal = object["2"].as_str().unwrap().parse().unwrap();
    assert_eq!(owed, Decimal::new(5, 0));
    assert_eq!(owing, Decimal::new(-5, 0));
}
