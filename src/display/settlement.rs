//! Settlement display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, Transfer};
use crate::services::settlement::{Balance, Settlement};

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Participant")]
    participant: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Balance")]
    net: String,
}

/// Balances table: what each payer paid, owes, and their position
///
/// Positive balance means the participant is owed money.
pub fn format_balances(balances: &[Balance], symbol: &str) -> String {
    if balances.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows = balances.iter().map(|b| BalanceRow {
        participant: b.participant.clone(),
        paid: b.paid.format_with_symbol(symbol),
        share: b.share.format_with_symbol(symbol),
        net: signed((-b.net).format_with_symbol(symbol), -b.net.cents()),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

fn signed(formatted: String, cents: i64) -> String {
    if cents > 0 {
        format!("+{}", formatted)
    } else {
        formatted
    }
}

/// One line per transfer, or "Nothing to settle"
pub fn format_transfers(transfers: &[Transfer], symbol: &str) -> String {
    if transfers.is_empty() {
        return "Nothing to settle".to_string();
    }

    let width = transfers
        .iter()
        .map(|t| t.debtor.chars().count())
        .max()
        .unwrap_or(0);

    transfers
        .iter()
        .map(|t| {
            format!(
                "{:<width$} -> {}: {}",
                t.debtor,
                t.creditor,
                t.amount.format_with_symbol(symbol),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full settlement report: summary line, balances and transfers
pub fn format_settlement(settlement: &Settlement, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total: {}  |  Participants: {}  |  Share: {}\n\n",
        settlement.total.format_with_symbol(symbol),
        settlement.participant_count(),
        settlement.average_share.format_with_symbol(symbol),
    ));
    output.push_str(&format_balances(&settlement.balances, symbol));
    output.push_str("\n\nTransfers:\n");
    output.push_str(&format_transfers(&settlement.transfers, symbol));
    output.push('\n');

    output
}

/// Numbered expense list
pub fn format_expenses(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let payer_width = expenses
        .iter()
        .map(|e| e.payer.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = format!("{:>3}  {:<payer_width$}  {:>12}  Concept\n", "#", "Payer", "Amount");
    for (idx, expense) in expenses.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<payer_width$}  {:>12}  {}\n",
            idx + 1,
            expense.payer,
            expense.amount.format_with_symbol(symbol),
            expense.concept,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::settlement::SettlementEngine;

    fn expenses() -> Vec<Expense> {
        vec![
            Expense::new("A", "Carne", Money::from_cents(4000)),
            Expense::new("B", "Pan", Money::from_cents(2000)),
            Expense::new("C", "", Money::zero()),
        ]
    }

    #[test]
    fn test_nothing_to_settle() {
        assert_eq!(format_transfers(&[], "€"), "Nothing to settle");
    }

    #[test]
    fn test_transfer_lines() {
        let transfers = vec![
            Transfer::new("C", "A", Money::from_cents(2000)),
            Transfer::new("Bea", "A", Money::from_cents(150)),
        ];
        let text = format_transfers(&transfers, "€");
        assert_eq!(text, "C   -> A: 20.00 €\nBea -> A: 1.50 €");
    }

    #[test]
    fn test_balances_table() {
        let balances = SettlementEngine::new().balances(&expenses());
        let table = format_balances(&balances, "€");

        assert!(table.contains("Participant"));
        assert!(table.contains("+20.00 €"));
        assert!(table.contains("-20.00 €"));
    }

    #[test]
    fn test_settlement_report() {
        let settlement = SettlementEngine::new().compute(&expenses());
        let report = format_settlement(&settlement, "€");

        assert!(report.contains("Total: 60.00 €"));
        assert!(report.contains("Participants: 3"));
        assert!(report.contains("C -> A: 20.00 €"));
    }

    #[test]
    fn test_expense_list() {
        let text = format_expenses(&expenses(), "€");
        assert!(text.contains("Carne"));
        assert_eq!(text.lines().count(), 4);
        assert_eq!(format_expenses(&[], "€"), "No expenses recorded.");
    }
}
