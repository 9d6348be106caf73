use crate::form::{DEFAULT_CATEGORY, EntryForm, PatchForm};

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Summary card and the 5 most recent entries (default)
    Home,
    /// Every entry, in the order the service returns them
    Entries,
    /// A single entry by id
    Show { id: u64 },
    /// Add an entry, then show the refreshed home screen
    Add(AddArgs),
    /// Change some fields of an entry
    Update(UpdateArgs),
    /// Remove an entry
    Delete { id: u64 },
    /// Monthly trend, category distribution and insights
    Analytics,
    /// Map placeholder
    Map,
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    /// What caused the emission (e.g. "Car commute", "Flight")
    #[arg(long, default_value = "")]
    pub activity: String,

    /// Category (e.g. transport, home, travel, food, other)
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    pub category: String,

    /// Carbon amount in kg CO₂
    #[arg(long, default_value = "")]
    pub amount: String,

    #[arg(long, default_value = "")]
    pub location: String,
}

impl AddArgs {
    pub fn to_form(&self) -> EntryForm {
        EntryForm {
            activity: self.activity.clone(),
            category: self.category.clone(),
            carbon_amount: self.amount.clone(),
            location: self.location.clone(),
        }
    }
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct UpdateArgs {
    pub id: u64,
    #[arg(long)]
    pub activity: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Carbon amount in kg CO₂
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
}

impl UpdateArgs {
    pub fn to_form(&self) -> PatchForm {
        PatchForm {
            activity: self.activity.clone(),
            category: self.category.clone(),
            carbon_amount: self.amount.clone(),
            location: self.location.clone(),
        }
    }
}

#[derive(clap::Parser, Debug)]
#[command(name = "green-ledger", version, about = "Personal carbon footprint tracker")]
pub struct Args {
    /// Base URL of the carbon entry service (default http://localhost:8080/api)
    #[arg(long, global = true, env = "GREEN_LEDGER_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds; unset or 0 waits indefinitely
    #[arg(long, global = true, env = "GREEN_LEDGER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Config file path. Defaults to <config dir>/green-ledger/config.json
    #[arg(long, global = true, env = "GREEN_LEDGER_CONFIG")]
    pub config: Option<String>,

    /// Emit JSON instead of colored text
    #[arg(long, global = true)]
    pub json: bool,

    /// Use exact palette colors (or set GREEN_LEDGER_TRUECOLOR=1)
    #[arg(long, global = true)]
    pub truecolor: bool,

    /// Log requests and responses to stderr
    #[arg(long, global = true, env = "GREEN_LEDGER_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Home)
    }
}
