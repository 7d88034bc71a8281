use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use barbacoa_cli::api::RemoteClient;
use barbacoa_cli::cli::{
    handle_audit_command, handle_delete_command, handle_export_command, handle_list_command,
    handle_roster_command, handle_save_command, handle_serve_command, handle_settle_command,
    handle_show_command, ExportArgs, RosterCommands, SaveArgs, SettleArgs,
};
use barbacoa_cli::config::{BarbacoaPaths, Settings};
use barbacoa_cli::services::{LocalBackend, SettlementBackend};
use barbacoa_cli::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "barbacoa",
    version,
    about = "Split shared barbecue expenses and settle them",
    long_about = "barbacoa records who paid what at a group event and works out the \
                  transfers that leave everyone even, settling declared partners first. \
                  Events can be saved locally or on a barbacoa server."
)]
struct Cli {
    /// Use a barbacoa server instead of local storage (bare flag uses the configured URL)
    #[arg(
        long,
        global = true,
        value_name = "URL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = ""
    )]
    remote: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Work out the transfers for an expense list
    Settle(SettleArgs),

    /// Settle an expense list and store it as a named barbacoa
    Save(SaveArgs),

    /// List saved barbacoas
    #[command(alias = "ls")]
    List,

    /// Show a saved barbacoa
    Show {
        /// Barbacoa name
        name: String,
    },

    /// Delete a saved barbacoa
    Delete {
        /// Barbacoa name
        name: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Export a saved barbacoa
    Export(ExportArgs),

    /// Roster ("cuadrilla") management
    #[command(subcommand, alias = "cuadrilla")]
    Roster(RosterCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Run the HTTP backend
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Initialize settings and data files
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(serving: bool) {
    let default_filter = if serving {
        "barbacoa_cli=debug,tower_http=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Some(Commands::Serve { .. })));

    // Initialize paths and settings
    let paths = BarbacoaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let remote = match cli.remote.as_deref() {
        Some("") => Some(RemoteClient::new(&settings.backend_url)?),
        Some(url) => Some(RemoteClient::new(url)?),
        None => None,
    };
    let local = LocalBackend::new(&storage);
    let backend: &dyn SettlementBackend = match &remote {
        Some(client) => client,
        None => &local,
    };

    match cli.command {
        Some(Commands::Settle(args)) => {
            handle_settle_command(backend, &storage, &settings, args)?;
        }
        Some(Commands::Save(args)) => {
            handle_save_command(backend, &storage, &settings, args)?;
        }
        Some(Commands::List) => {
            handle_list_command(backend, &settings)?;
        }
        Some(Commands::Show { name }) => {
            handle_show_command(backend, &settings, &name)?;
        }
        Some(Commands::Delete { name, force }) => {
            handle_delete_command(backend, &name, force)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(backend, args)?;
        }
        Some(Commands::Roster(cmd)) => {
            handle_roster_command(&storage, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Serve { host, port }) => {
            handle_serve_command(storage, &settings, host, port)?;
        }
        Some(Commands::Init) => {
            println!("Initializing barbacoa at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Add the cuadrilla with 'barbacoa roster add NAME [--partner OTHER]',");
            println!("then split a barbacoa with 'barbacoa settle -e NAME:AMOUNT ...'.");
        }
        Some(Commands::Config) => {
            println!("barbacoa configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Partner priority: {}", settings.partner_priority);
            println!(
                "  Server address:   {}:{}",
                settings.server.host, settings.server.port
            );
            println!("  Backend URL:      {}", settings.backend_url);
        }
        None => {
            println!("barbacoa - split shared expenses and settle them");
            println!();
            println!("Run 'barbacoa --help' for usage information.");
        }
    }

    Ok(())
}
