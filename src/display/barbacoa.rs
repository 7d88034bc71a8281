//! Barbacoa display formatting
//!
//! Formats settled events for terminal output in list and detail views.

use crate::models::Barbacoa;

use super::settlement::{format_expenses, format_transfers};

/// Format a list of events as a table
pub fn format_barbacoa_list(barbacoas: &[Barbacoa], symbol: &str, date_format: &str) -> String {
    if barbacoas.is_empty() {
        return "No barbacoas saved.".to_string();
    }

    let name_width = barbacoas
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let dates: Vec<String> = barbacoas
        .iter()
        .map(|b| b.date.format(date_format).to_string())
        .collect();
    let date_width = dates.iter().map(|d| d.chars().count()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<date_width$}  {:>12}  {:>6}  {:>9}\n",
        "Name", "Date", "Total", "People", "Transfers",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<date_width$}  {:->12}  {:->6}  {:->9}\n",
        "", "", "", "", "",
    ));

    for (barbacoa, date) in barbacoas.iter().zip(&dates) {
        output.push_str(&format!(
            "{:<name_width$}  {:<date_width$}  {:>12}  {:>6}  {:>9}\n",
            barbacoa.name,
            date,
            barbacoa.total_amount.format_with_symbol(symbol),
            barbacoa.participants.len(),
            barbacoa.transfers.len(),
        ));
    }

    output
}

/// Format one event with its expenses and transfers
pub fn format_barbacoa_details(barbacoa: &Barbacoa, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Barbacoa: {}\n", barbacoa.name));
    output.push_str(&format!("  ID:           {}\n", barbacoa.id));
    output.push_str(&format!("  Date:         {}\n", barbacoa.date.format(date_format)));
    output.push_str(&format!(
        "  Total:        {}\n",
        barbacoa.total_amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Share:        {}\n",
        barbacoa.average_share.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Participants: {}\n",
        barbacoa.participants.join(", ")
    ));

    output.push_str("\nExpenses:\n");
    output.push_str(&format_expenses(&barbacoa.expenses, symbol));
    output.push_str("\nTransfers:\n");
    output.push_str(&format_transfers(&barbacoa.transfers, symbol));
    output.push('\n');

    output
}
