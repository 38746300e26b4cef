use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use courses_cli::{OutputFormat, SessionArgs, commands, parse_datetime};

#[derive(Parser)]
#[command(name = "courses")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Replay a previous Monoprix grocery order and book a delivery slot",
    long_about = "courses drives Chrome on the Monoprix groceries site: it logs in, puts the \
                  still-available items of a previous order back in the basket, reports the \
                  ones that can no longer be bought, and books a delivery slot."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Refill the basket from a previous order and book a delivery slot
    Order {
        #[command(flatten)]
        session: SessionArgs,

        /// Which previous order to replay (1 = most recent)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        previous: u32,

        /// Delivery date and time to book, e.g. "2026-10-22 09:00"
        #[arg(long, value_parser = parse_datetime)]
        delivery: Option<NaiveDateTime>,

        /// Keep what is already in the basket instead of emptying it first
        #[arg(long)]
        keep_basket: bool,
    },

    /// Show the current basket
    Basket {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Remove everything from the basket
    Empty {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Show the delivery slot grid
    Slots {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Check a delivery date against the booking window, without opening the shop
    CheckDate {
        /// Delivery date and time, e.g. "2026-10-22 09:00"
        #[arg(value_name = "DATETIME", value_parser = parse_datetime)]
        at: NaiveDateTime,

        /// Reference time instead of the current time
        #[arg(long, hide = true, value_parser = parse_datetime)]
        now: Option<NaiveDateTime>,
    },

    /// Manage saved Chrome profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List saved profiles
    List,

    /// Delete a saved profile
    Delete {
        /// Profile name
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Order {
            session,
            previous,
            delivery,
            keep_basket,
        } => commands::order::execute(
            &session,
            previous as usize,
            delivery,
            keep_basket,
            cli.format,
        ),
        Commands::Basket { session } => commands::basket::execute(&session, cli.format),
        Commands::Empty { session } => commands::empty::execute(&session, cli.format),
        Commands::Slots { session } => commands::slots::execute(&session, cli.format),
        Commands::CheckDate { at, now } => commands::check_date::execute(at, now, cli.format),
        Commands::Profile { action } => match action {
            ProfileAction::List => commands::profile::list(),
            ProfileAction::Delete { name, force } => commands::profile::delete(&name, force),
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            commands::completion::execute(shell, &mut cmd)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("courses=debug,courses_cli=debug,courses_browser=debug,courses_core=debug")
    } else {
        EnvFilter::new("courses=info,courses_cli=info,courses_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
