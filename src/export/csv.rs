//! CSV export of a settled event
//!
//! Amounts are plain decimals with two places and no currency symbol, so
//! spreadsheets read them as numbers.

use std::io::Write;

use crate::error::{BarbacoaError, BarbacoaResult};
use crate::models::{Barbacoa, Money};

fn csv_err(e: csv::Error) -> BarbacoaError {
    BarbacoaError::Export(e.to_string())
}

fn plain(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.units().abs(), amount.cents_part())
}

/// Write the transfers as `debtor,creditor,amount`
pub fn export_transfers_csv<W: Write>(barbacoa: &Barbacoa, writer: W) -> BarbacoaResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["debtor", "creditor", "amount"])
        .map_err(csv_err)?;
    for transfer in &barbacoa.transfers {
        csv.write_record([
            transfer.debtor.as_str(),
            transfer.creditor.as_str(),
            plain(transfer.amount).as_str(),
        ])
        .map_err(csv_err)?;
    }

    csv.flush().map_err(|e| BarbacoaError::Export(e.to_string()))
}

/// Write the expenses as `payer,concept,amount`
///
/// The output can be fed back to expense import.
pub fn export_expenses_csv<W: Write>(barbacoa: &Barbacoa, writer: W) -> BarbacoaResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["payer", "concept", "amount"])
        .map_err(csv_err)?;
    for expense in &barbacoa.expenses {
        csv.write_record([
            expense.payer.as_str(),
            expense.concept.as_str(),
            plain(expense.amount).as_str(),
        ])
        .map_err(csv_err)?;
    }

    csv.flush().map_err(|e| BarbacoaError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Transfer};
    use crate::services::import::parse_csv;

    fn sample() -> Barbacoa {
        Barbacoa::new(
            "Playa",
            vec![
                Expense::new("Ana", "Carne, pan", Money::from_cents(3050)),
                Expense::new("Luis", "", Money::from_cents(5)),
            ],
            vec![Transfer::new("Luis", "Ana", Money::from_cents(1523))],
        )
    }

    #[test]
    fn test_transfers_csv() {
        let mut out = Vec::new();
        export_transfers_csv(&sample(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "debtor,creditor,amount\nLuis,Ana,15.23\n"
        );
    }

    #[test]
    fn test_expenses_csv_can_be_imported_again() {
        let mut out = Vec::new();
        export_expenses_csv(&sample(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Carne, pan\""));
        assert!(text.contains("Luis,,0.05"));

        let imported = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(imported, sample().expenses);
    }
}
