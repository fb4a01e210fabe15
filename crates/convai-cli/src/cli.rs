//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};

/// convai - Keep conversational agent configs in sync with the platform
#[derive(Parser, Debug)]
#[command(name = "convai")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Environment tag used by bulk deletes
    #[arg(long = "env", global = true, env = "ELEVENLABS_ENV")]
    pub environment: Option<String>,

    /// Data residency region (us, global, eu-residency, in-residency)
    #[arg(long, global = true, env = "ELEVENLABS_RESIDENCY")]
    pub residency: Option<String>,

    /// API key; only needed for commands that reach the platform
    #[arg(long, global = true, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a project: index files, config directories, .env.example
    ///
    /// Examples:
    ///   convai init              # Initialize in current directory
    ///   convai init my-project   # Create and initialize my-project/
    Init {
        /// Project directory (created if missing)
        #[arg(default_value = ".")]
        path: String,

        /// Rewrite index files and .env.example even if they exist
        #[arg(long = "override")]
        overwrite: bool,
    },

    /// Manage agents
    Agents {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Manage tools
    Tools {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Manage tests
    Tests {
        #[command(subcommand)]
        action: ResourceAction,
    },
}

/// Agent subcommands: the shared set plus running attached tests and
/// printing an embed snippet
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AgentAction {
    #[command(flatten)]
    Common(ResourceAction),

    /// Run the tests attached to an agent and wait for the results
    Test {
        /// Remote id of the agent
        agent_id: String,
    },

    /// Print the HTML snippet that embeds an agent's widget in a web page
    Widget {
        /// Remote id of the agent, as recorded in agents.json
        agent_id: String,
    },
}

/// Subcommands shared by every resource kind
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ResourceAction {
    /// Fetch resources from the platform into local files
    ///
    /// Examples:
    ///   convai agents pull            # Add remote agents missing locally
    ///   convai agents pull --update   # Refresh agents already tracked
    ///   convai agents pull --all -y   # Both, without prompting
    Pull(PullArgs),

    /// Send local configs to the platform
    Push(PushArgs),

    /// Delete resources remotely and locally
    Delete(DeleteArgs),

    /// Show local state of every tracked resource
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List tracked resources
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PullArgs {
    /// Pull only the resource with this remote id
    #[arg(long)]
    pub id: Option<String>,

    /// Directory for newly created config files
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Preview changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Only refresh resources already tracked locally
    #[arg(long, conflicts_with = "all")]
    pub update: bool,

    /// Add new resources and refresh tracked ones
    #[arg(long)]
    pub all: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PushArgs {
    /// Push only the resource with this remote id
    #[arg(long)]
    pub id: Option<String>,

    /// Preview changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Description recorded with the new agent version
    #[arg(long)]
    pub version_description: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DeleteArgs {
    /// Remote id of the resource to delete
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub id: Option<String>,

    /// Delete every resource in the current environment
    #[arg(long)]
    pub all: bool,

    /// Preview changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
