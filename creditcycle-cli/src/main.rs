use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use creditcycle_core::{CardField, CardSession, JsonFileStore, SessionError};
use tracing_subscriber::EnvFilter;

mod clock;
mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "creditcycle",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CREDITCYCLE_BUILD_SHA"), ")"),
    about = "Know exactly when and how much to pay on your credit card"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the saved card form
    Show,

    /// Edit card fields; every change is saved immediately
    Set {
        /// Card nickname, e.g. "Chase Sapphire"
        #[arg(long)]
        nickname: Option<String>,

        /// Credit limit
        #[arg(long, value_parser = parse_amount)]
        limit: Option<String>,

        /// Current balance
        #[arg(long, value_parser = parse_amount)]
        balance: Option<String>,

        /// Statement closing day of month (1-31)
        #[arg(long, value_parser = parse_day)]
        statement: Option<String>,

        /// Payment due day of month (1-31)
        #[arg(long, value_parser = parse_day)]
        due: Option<String>,

        /// Target utilization percent (1-100)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        target: Option<u32>,
    },

    /// Compute utilization, target balance, required payment and the monthly strip
    Calculate {
        /// Day of month to treat as today (default: from the clock)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
        today: Option<u32>,
    },

    /// Restore the default card and delete the saved one
    Reset,

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,

    /// Print where config and card data live
    Path,
}

fn parse_amount(s: &str) -> Result<String, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("'{s}' must be zero or more"));
    }
    Ok(s.trim().to_string())
}

fn parse_day(s: &str) -> Result<String, String> {
    let d: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a day of month"))?;
    if !(1..=31).contains(&d) {
        return Err(format!("'{s}' must be between 1 and 31"));
    }
    Ok(d.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CREDITCYCLE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = config::load_config()?;
    let data_dir = cfg.data_dir()?;
    tracing::debug!(dir = %data_dir.display(), "using card store");

    match cli.command {
        Command::Show => {
            let session = CardSession::open(JsonFileStore::in_dir(&data_dir));
            print!("{}", render::render_form(session.record()));
        }

        Command::Set {
            nickname,
            limit,
            balance,
            statement,
            due,
            target,
        } => {
            let edits = [
                (CardField::Nickname, nickname),
                (CardField::Limit, limit),
                (CardField::CurrentBalance, balance),
                (CardField::StatementDate, statement),
                (CardField::DueDate, due),
                (CardField::UtilTarget, target.map(|t| t.to_string())),
            ];
            if edits.iter().all(|(_, v)| v.is_none()) {
                bail!("nothing to set (see: creditcycle set --help)");
            }

            let mut session = CardSession::open(JsonFileStore::in_dir(&data_dir));
            for (field, value) in edits {
                if let Some(value) = value {
                    session
                        .set(field, &value)
                        .with_context(|| format!("set {}", field.label()))?;
                }
            }
            print!("{}", render::render_form(session.record()));
        }

        Command::Calculate { today } => {
            let today = match today {
                Some(d) => d,
                None => clock::day_of_month(chrono::Utc::now(), cfg.clock.timezone.as_deref())?,
            };
            let session = CardSession::open(JsonFileStore::in_dir(&data_dir));
            match session.calculate(today) {
                Ok(report) => print!("{}", render::render_report(&report)),
                Err(SessionError::Incomplete { missing }) => {
                    let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
                    bail!(
                        "Fill in {} first (creditcycle set --help)",
                        names.join(", ")
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        Command::Reset => {
            let mut session = CardSession::open(JsonFileStore::in_dir(&data_dir));
            session.reset().context("reset card")?;
            println!("Card reset to defaults.");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Path => {
                println!("config: {}", config::config_path()?.display());
                println!("card:   {}", JsonFileStore::in_dir(&data_dir).path().display());
            }
        },
    }

    Ok(())
}
