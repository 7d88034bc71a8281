//! Settlement engine
//!
//! Turns a list of expenses into the transfers that settle them. Each distinct
//! payer owes an equal share of the total; whoever paid less than their share
//! is a debtor, whoever paid more is a creditor. Debtors are processed in the
//! order they first appear in the expense list:
//!
//! 1. If the debtor's declared partner is still owed money, the debtor pays
//!    the partner first.
//! 2. Any remaining debt goes to the creditors in their current order, each
//!    one absorbing as much as it is owed.
//!
//! Participants who recorded no expense at all take no part in the split.
//!
//! Amounts are whole cents. The share `total / n` is allocated with the
//! leftover cents going to the first payers, so balances always sum to zero
//! and a fully paid debt or credit is exactly zero.

use std::cmp::min;

use tracing::debug;

use crate::models::{distinct_payers, Expense, Money, PartnerMap, Transfer};

/// One participant's position before settlement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub participant: String,
    /// Sum of this participant's expenses
    pub paid: Money,
    /// Portion of the total this participant must cover
    pub share: Money,
    /// `share - paid`: positive owes money, negative is owed money
    pub net: Money,
}

impl Balance {
    pub fn is_debtor(&self) -> bool {
        self.net.is_positive()
    }

    pub fn is_creditor(&self) -> bool {
        self.net.is_negative()
    }
}

/// Full result of settling an expense list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub balances: Vec<Balance>,
    pub transfers: Vec<Transfer>,
    pub total: Money,
    pub average_share: Money,
}

impl Settlement {
    /// Nothing to settle: no transfers were needed
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn participant_count(&self) -> usize {
        self.balances.len()
    }
}

/// Stateless settlement calculator, optionally biased by declared partners
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    partners: PartnerMap,
}

impl SettlementEngine {
    /// Engine that settles purely greedily
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that settles each debtor's partner first
    pub fn with_partners(partners: PartnerMap) -> Self {
        Self { partners }
    }

    pub fn partners(&self) -> &PartnerMap {
        &self.partners
    }

    /// Per-payer balances, in order of first appearance
    pub fn balances(&self, expenses: &[Expense]) -> Vec<Balance> {
        let payers = distinct_payers(expenses);
        let paid: Vec<Money> = payers
            .iter()
            .map(|payer| {
                expenses
                    .iter()
                    .filter(|e| &e.payer == payer)
                    .map(|e| e.amount)
                    .sum()
            })
            .collect();

        let total: Money = paid.iter().sum();
        let shares = total.allocate(payers.len());

        payers
            .into_iter()
            .zip(paid)
            .zip(shares)
            .map(|((participant, paid), share)| Balance {
                participant,
                paid,
                share,
                net: share - paid,
            })
            .collect()
    }

    /// Transfers that zero out every balance
    pub fn settle(&self, expenses: &[Expense]) -> Vec<Transfer> {
        self.compute(expenses).transfers
    }

    /// Balances, transfers and summary totals in one pass
    pub fn compute(&self, expenses: &[Expense]) -> Settlement {
        let balances = self.balances(expenses);
        let total: Money = balances.iter().map(|b| b.paid).sum();
        let average_share = total.div_round(balances.len());
        let transfers = self.settle_balances(&balances);

        debug!(
            payers = balances.len(),
            total_cents = total.cents(),
            partners = self.partners.len(),
            transfers = transfers.len(),
            "settled expense list"
        );

        Settlement {
            balances,
            transfers,
            total,
            average_share,
        }
    }

    fn settle_balances(&self, balances: &[Balance]) -> Vec<Transfer> {
        debug_assert!(balances.iter().map(|b| b.net).sum::<Money>().is_zero());

        let debtors: Vec<(&str, Money)> = balances
            .iter()
            .filter(|b| b.is_debtor())
            .map(|b| (b.participant.as_str(), b.net))
            .collect();
        let mut creditors: Vec<(&str, Money)> = balances
            .iter()
            .filter(|b| b.is_creditor())
            .map(|b| (b.participant.as_str(), -b.net))
            .collect();

        let mut transfers = Vec::new();

        for (debtor, mut debt) in debtors {
            if let Some(partner) = self.partners.partner_of(debtor) {
                if let Some(pos) = creditors.iter().position(|(name, _)| *name == partner) {
                    let (creditor, credit) = &mut creditors[pos];
                    let pay = min(debt, *credit);
                    transfers.push(Transfer::new(debtor, *creditor, pay));
                    debt -= pay;
                    *credit -= pay;
                    if credit.is_zero() {
                        creditors.remove(pos);
                    }
                }
            }

            let mut i = 0;
            while debt.is_positive() && i < creditors.len() {
                let (creditor, credit) = &mut creditors[i];
                let pay = min(debt, *credit);
                transfers.push(Transfer::new(debtor, *creditor, pay));
                debt -= pay;
                *credit -= pay;
                if credit.is_zero() {
                    creditors.remove(i);
                } else {
                    i += 1;
                }
            }
        }

        transfers
    }
}

/// Settle `expenses`, paying declared partners first
pub fn settle(expenses: &[Expense], partners: &PartnerMap) -> Vec<Transfer> {
    SettlementEngine::with_partners(partners.clone()).settle(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(payer: &str, euros: i64) -> Expense {
        Expense::new(payer, "", Money::from_units_cents(euros, 0))
    }

    fn transfer(debtor: &str, creditor: &str, euros: i64) -> Transfer {
        Transfer::new(debtor, creditor, Money::from_units_cents(euros, 0))
    }

    #[test]
    fn test_single_creditor() {
        let expenses = vec![expense("A", 40), expense("B", 20), expense("C", 0)];
        let transfers = settle(&expenses, &PartnerMap::new());
        assert_eq!(transfers, vec![transfer("C", "A", 20)]);
    }

    #[test]
    fn test_single_payer_has_nothing_to_settle() {
        let transfers = settle(&[expense("A", 100)], &PartnerMap::new());
        assert!(transfers.is_empty());
    }

    #[test]
    fn test_partner_pays_partner() {
        let mut partners = PartnerMap::new();
        partners.insert("A", "B");
        let expenses = vec![expense("A", 0), expense("B", 100)];

        assert_eq!(settle(&expenses, &partners), vec![transfer("A", "B", 50)]);
    }

    #[test]
    fn test_debtors_in_first_appearance_order() {
        let expenses = vec![expense("A", 90), expense("B", 30), expense("C", 0)];
        let transfers = settle(&expenses, &PartnerMap::new());
        assert_eq!(
            transfers,
            vec![transfer("B", "A", 10), transfer("C", "A", 40)]
        );
    }

    #[test]
    fn test_empty_expense_list() {
        assert!(settle(&[], &PartnerMap::new()).is_empty());
        let settlement = SettlementEngine::new().compute(&[]);
        assert!(settlement.is_empty());
        assert_eq!(settlement.total, Money::zero());
        assert_eq!(settlement.average_share, Money::zero());
    }

    #[test]
    fn test_zero_total_has_nothing_to_settle() {
        let expenses = vec![expense("A", 0), expense("B", 0)];
        assert!(settle(&expenses, &PartnerMap::new()).is_empty());
    }

    #[test]
    fn test_everyone_paid_fair_share() {
        let expenses = vec![expense("A", 25), expense("B", 25), expense("C", 25)];
        assert!(settle(&expenses, &PartnerMap::new()).is_empty());
    }

    #[test]
    fn test_multiple_expenses_per_payer_are_grouped() {
        let expenses = vec![
            expense("A", 30),
            expense("B", 10),
            expense("A", 20),
            expense("B", 0),
        ];
        // total 60, share 30: A paid 50, B paid 10
        assert_eq!(
            settle(&expenses, &PartnerMap::new()),
            vec![transfer("B", "A", 20)]
        );
    }

    #[test]
    fn test_partner_jumps_ahead_of_earlier_creditor() {
        // total 120, share 30: A and B owed 30 each, C and D owe 30 each
        let expenses = vec![
            expense("A", 60),
            expense("B", 60),
            expense("C", 0),
            expense("D", 0),
        ];

        let greedy = settle(&expenses, &PartnerMap::new());
        assert_eq!(greedy, vec![transfer("C", "A", 30), transfer("D", "B", 30)]);

        let mut partners = PartnerMap::new();
        partners.insert("C", "B");
        partners.insert("B", "C");
        let biased = settle(&expenses, &partners);
        assert_eq!(biased, vec![transfer("C", "B", 30), transfer("D", "A", 30)]);
    }

    #[test]
    fn test_partner_covers_part_then_greedy_takes_the_rest() {
        // total 150, share 50: A owed 40, B owed 10, C owes 50
        let expenses = vec![expense("A", 90), expense("B", 60), expense("C", 0)];
        let mut partners = PartnerMap::new();
        partners.insert("C", "B");

        assert_eq!(
            settle(&expenses, &partners),
            vec![transfer("C", "B", 10), transfer("C", "A", 40)]
        );
    }

    #[test]
    fn test_partner_who_is_not_a_creditor_is_ignored() {
        let expenses = vec![expense("A", 90), expense("B", 30), expense("C", 0)];
        let mut partners = PartnerMap::new();
        partners.insert("B", "C");
        partners.insert("C", "Nobody");

        assert_eq!(
            settle(&expenses, &partners),
            vec![transfer("B", "A", 10), transfer("C", "A", 40)]
        );
    }

    #[test]
    fn test_partner_already_paid_off_falls_back_to_greedy() {
        // total 160, share 40: A owed 50, B owed 10, C owes 40, D owes 20
        let expenses = vec![
            expense("A", 90),
            expense("B", 50),
            expense("C", 0),
            expense("D", 20),
        ];
        let mut partners = PartnerMap::new();
        partners.insert("C", "B");
        partners.insert("D", "B");

        assert_eq!(
            settle(&expenses, &partners),
            vec![
                transfer("C", "B", 10),
                transfer("C", "A", 30),
                transfer("D", "A", 20),
            ]
        );
    }

    #[test]
    fn test_uneven_split_allocates_leftover_cents() {
        let expenses = vec![
            Expense::new("A", "", Money::from_cents(100)),
            Expense::new("B", "", Money::zero()),
            Expense::new("C", "", Money::zero()),
        ];
        let engine = SettlementEngine::new();

        let balances = engine.balances(&expenses);
        let shares: Vec<i64> = balances.iter().map(|b| b.share.cents()).collect();
        assert_eq!(shares, vec![34, 33, 33]);

        let transfers = engine.settle(&expenses);
        assert_eq!(
            transfers,
            vec![
                Transfer::new("B", "A", Money::from_cents(33)),
                Transfer::new("C", "A", Money::from_cents(33)),
            ]
        );
    }

    #[test]
    fn test_balances() {
        let expenses = vec![expense("A", 90), expense("B", 30), expense("C", 0)];
        let balances = SettlementEngine::new().balances(&expenses);

        assert_eq!(balances.len(), 3);
        assert_eq!(balances[0].participant, "A");
        assert_eq!(balances[0].net, Money::from_units_cents(-50, 0));
        assert!(balances[0].is_creditor());
        assert!(balances[1].is_debtor());
        assert_eq!(balances[2].net, Money::from_units_cents(40, 0));
    }

    #[test]
    fn test_compute_summary() {
        let expenses = vec![expense("A", 90), expense("B", 30), expense("C", 0)];
        let settlement = SettlementEngine::new().compute(&expenses);

        assert_eq!(settlement.total, Money::from_units_cents(120, 0));
        assert_eq!(settlement.average_share, Money::from_units_cents(40, 0));
        assert_eq!(settlement.participant_count(), 3);
        assert_eq!(settlement.transfers.len(), 2);
    }
}
