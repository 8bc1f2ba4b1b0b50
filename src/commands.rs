//! Command-line commands

use clap::Subcommand;

/// Operations on the project's applications
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create `.studio/config.toml` with commented defaults
    Init,

    /// List applications
    List,

    /// Check that a name is not used by another application
    CheckName {
        /// Application id (need not exist yet)
        id: String,
        /// Candidate name
        name: String,
    },

    /// Insert a filter at its ordered position in the chain
    AddFilter {
        id: String,
        /// Filter type (e.g. `ThrottlingFilter`)
        filter_type: String,
        /// Filter settings as a JSON object
        #[arg(long, value_name = "JSON")]
        config: Option<String>,
    },

    /// Toggle capture sliders, then save
    Capture {
        id: String,
        /// Slider to flip: inboundRequest, inboundResponse, outboundRequest, outboundResponse
        #[arg(long = "toggle", value_name = "NAME")]
        toggles: Vec<String>,
        /// Show the resulting form without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Open the duplicate form for an application
    Duplicate { id: String },

    /// Print the generated route configuration
    Export { id: String },

    /// Deploy an application's route
    Deploy { id: String },

    /// Remove an application's route from the gateway
    Undeploy { id: String },

    /// Delete an application
    Delete { id: String },
}

impl Command {
    /// Name used in `operation_finished` events
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::List => "list",
            Command::CheckName { .. } => "check_name",
            Command::AddFilter { .. } => "add_filter",
            Command::Capture { .. } => "capture",
            Command::Duplicate { .. } => "duplicate",
            Command::Export { .. } => "export",
            Command::Deploy { .. } => "deploy",
            Command::Undeploy { .. } => "undeploy",
            Command::Delete { .. } => "delete",
        }
    }
}
