//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use emergence_model::{Configuration, Topology};

/// Plot linear vs. connected risk for multi-agent systems.
#[derive(Debug, Parser)]
#[command(name = "emergence", version, about)]
pub struct Cli {
    /// Agent count (1-200)
    #[arg(short = 'n', long = "agents", global = true, allow_negative_numbers = true)]
    pub agents: Option<i64>,

    /// Autonomy score (1-10)
    #[arg(short = 'a', long, global = true, allow_negative_numbers = true)]
    pub autonomy: Option<i64>,

    /// Connection cap per joining agent (0 to agents - 1)
    #[arg(short = 'k', long = "cap", global = true, allow_negative_numbers = true)]
    pub cap: Option<i64>,

    /// Topology: bounded, mesh, hub or pipeline
    #[arg(short = 't', long, global = true)]
    pub topology: Option<Topology>,

    /// Start from a share link or query string instead of the defaults
    #[arg(long, global = true, value_name = "URL_OR_QUERY")]
    pub share: Option<String>,

    /// Pin a comparison scenario (repeatable, at most 8 are kept)
    #[arg(long = "compare", global = true, value_name = "N:A:K:TOPOLOGY[:NAME]")]
    pub compare: Vec<CompareArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Primary configuration with command-line overrides applied on top of `base`.
    pub fn primary(&self, base: &Configuration) -> Configuration {
        Configuration::clamped(
            self.agents.unwrap_or(base.agents() as i64),
            self.autonomy.unwrap_or(base.autonomy() as i64),
            self.cap.unwrap_or(base.cap() as i64),
            self.topology.unwrap_or(base.topology()),
        )
    }
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print headline numbers (default)
    Summary {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the series row by row
    Table {
        /// Only print every Nth agent count (the last row is always printed)
        #[arg(long, default_value_t = 1)]
        every: u32,
        /// Emit the chart rows as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write the series as CSV
    Export {
        /// Output path
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Print a share link for the current state
    Share,
    /// Manage saved scenarios
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
}

/// Saved-scenario actions.
#[derive(Debug, Subcommand)]
pub enum SavedAction {
    /// List saved scenarios, newest first
    List,
    /// Save the current configuration
    Save {
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a saved scenario
    Delete { id: String },
    /// Rename a saved scenario
    Rename { id: String, name: String },
    /// Load a saved scenario as the primary configuration and summarize it
    Apply { id: String },
    /// Pin a saved scenario for comparison and print the share link
    Compare { id: String },
}

/// A comparison scenario given as `N:A:K:TOPOLOGY[:NAME]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareArg {
    pub config: Configuration,
    pub name: Option<String>,
}

impl FromStr for CompareArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(5, ':');
        let mut int = |label: &str| -> Result<i64, String> {
            let part = parts.next().ok_or_else(|| format!("missing {label}"))?;
            part.trim()
                .parse()
                .map_err(|_| format!("{label} must be an integer, got {part:?}"))
        };
        let agents = int("agent count")?;
        let autonomy = int("autonomy")?;
        let cap = int("cap")?;

        let topology = parts
            .next()
            .ok_or_else(|| "missing topology".to_string())?
            .parse::<Topology>()
            .map_err(|e| e.to_string())?;
        let name = parts
            .next()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            config: Configuration::clamped(agents, autonomy, cap, topology),
            name,
        })
    }
}
