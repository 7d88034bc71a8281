//! Settle and save CLI commands
//!
//! Both take the expense list either as repeated `-e PAYER:AMOUNT[:CONCEPT]`
//! entries or from a JSON/CSV file.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::format_settlement;
use crate::error::{BarbacoaError, BarbacoaResult};
use crate::models::{Barbacoa, PartnerMap};
use crate::services::{load_expenses, ExpenseSheet, RosterService, SettlementBackend, SettlementEngine};
use crate::storage::Storage;

/// Where the expense list comes from
#[derive(Args, Debug, Clone)]
pub struct ExpenseInput {
    /// Expense as PAYER:AMOUNT[:CONCEPT] (repeatable)
    #[arg(short = 'e', long = "expense", value_name = "PAYER:AMOUNT[:CONCEPT]", conflicts_with = "file")]
    pub expenses: Vec<String>,

    /// Read expenses from a .json or .csv file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Ignore declared partners and settle purely greedily
    #[arg(long)]
    pub no_partners: bool,
}

/// Arguments of `barbacoa settle`
#[derive(Args, Debug)]
pub struct SettleArgs {
    #[command(flatten)]
    pub input: ExpenseInput,
}

/// Arguments of `barbacoa save`
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Unique name for the event
    pub name: String,

    #[command(flatten)]
    pub input: ExpenseInput,
}

/// Build the expense sheet from `-e` entries or a file
pub fn collect_expenses(storage: &Storage, input: &ExpenseInput) -> BarbacoaResult<ExpenseSheet> {
    let roster = RosterService::new(storage).list()?;
    let mut sheet = ExpenseSheet::with_roster(roster.into_iter().map(|p| p.name));

    if let Some(path) = &input.file {
        for expense in load_expenses(path)? {
            sheet.push(expense)?;
        }
    } else {
        for entry in &input.expenses {
            sheet.add_entry(entry)?;
        }
    }

    if sheet.is_empty() {
        return Err(BarbacoaError::Validation(
            "No expenses given; use -e PAYER:AMOUNT or -f FILE".into(),
        ));
    }

    Ok(sheet)
}

/// Partner map to settle with: the roster's, unless disabled
pub fn partners_for(
    storage: &Storage,
    settings: &Settings,
    no_partners: bool,
) -> BarbacoaResult<PartnerMap> {
    if no_partners || !settings.partner_priority {
        return Ok(PartnerMap::new());
    }
    RosterService::new(storage).partner_map()
}

/// Handle `barbacoa settle`
pub fn handle_settle_command(
    backend: &dyn SettlementBackend,
    storage: &Storage,
    settings: &Settings,
    args: SettleArgs,
) -> BarbacoaResult<()> {
    let sheet = collect_expenses(storage, &args.input)?;
    let partners = partners_for(storage, settings, args.input.no_partners)?;
    let expenses = sheet.snapshot();

    // Balances are always computed locally; only the transfers come from the backend
    let mut settlement = SettlementEngine::new().compute(&expenses);
    settlement.transfers = backend.settle(&expenses, &partners)?;

    print!("{}", format_settlement(&settlement, &settings.currency_symbol));

    let missing = sheet.remaining_participants();
    if !missing.is_empty() {
        println!();
        println!("Not in this split: {}", missing.join(", "));
    }

    Ok(())
}

/// Handle `barbacoa save`
pub fn handle_save_command(
    backend: &dyn SettlementBackend,
    storage: &Storage,
    settings: &Settings,
    args: SaveArgs,
) -> BarbacoaResult<()> {
    let sheet = collect_expenses(storage, &args.input)?;
    let partners = partners_for(storage, settings, args.input.no_partners)?;
    let expenses = sheet.snapshot();

    let transfers = backend.settle(&expenses, &partners)?;
    let barbacoa = Barbacoa::new(args.name.trim(), expenses, transfers);
    barbacoa
        .validate()
        .map_err(|e| BarbacoaError::Validation(e.to_string()))?;

    backend.save(&barbacoa)?;

    println!("Saved barbacoa: {}", barbacoa.name);
    println!(
        "  Total: {}  |  Participants: {}  |  Transfers: {}",
        barbacoa.total_amount.format_with_symbol(&settings.currency_symbol),
        barbacoa.participants.len(),
        barbacoa.transfers.len()
    );

    Ok(())
}
