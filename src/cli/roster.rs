//! Roster ("cuadrilla") CLI commands

use clap::Subcommand;

use crate::display::format_roster;
use crate::error::BarbacoaResult;
use crate::services::RosterService;
use crate::storage::Storage;

/// Roster subcommands
#[derive(Subcommand, Debug)]
pub enum RosterCommands {
    /// List all participants
    List,
    /// Add a participant
    Add {
        /// Participant name
        name: String,
        /// Existing participant to pair with
        #[arg(short, long)]
        partner: Option<String>,
        /// UI colour as #rrggbb
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove a participant
    Remove {
        /// Participant name
        name: String,
    },
    /// Declare two participants as partners
    Pair {
        a: String,
        b: String,
    },
    /// Clear a participant's partner
    Unpair {
        name: String,
    },
}

/// Handle a roster command
pub fn handle_roster_command(storage: &Storage, cmd: RosterCommands) -> BarbacoaResult<()> {
    let service = RosterService::new(storage);

    match cmd {
        RosterCommands::List => {
            let participants = service.list()?;
            print!("{}", format_roster(&participants));
            if !participants.is_empty() {
                println!("\nTotal: {} participants", participants.len());
            } else {
                println!();
            }
        }

        RosterCommands::Add {
            name,
            partner,
            color,
        } => {
            let participant = service.add(&name, partner.as_deref(), color.as_deref())?;
            match &participant.partner {
                Some(partner) => println!("Added {} (partner: {})", participant.name, partner),
                None => println!("Added {}", participant.name),
            }
        }

        RosterCommands::Remove { name } => {
            let removed = service.remove(&name)?;
            println!("Removed {}", removed.name);
        }

        RosterCommands::Pair { a, b } => {
            let (a, b) = service.pair(&a, &b)?;
            println!("Paired {} <-> {}", a.name, b.name);
        }

        RosterCommands::Unpair { name } => {
            let participant = service.unpair(&name)?;
            println!("{} no longer has a partner", participant.name);
        }
    }

    Ok(())
}
