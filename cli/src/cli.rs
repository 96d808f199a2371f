use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "sphere-admin")]
#[command(about = "Admin console for ReactoSphere", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL, e.g. https://chat.reactosphere.app/api
    #[arg(long, global = true, env = "SPHERE_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Run the auth gate for a panel path, e.g. /dashboard/users
    Open {
        path: String,
    },
    /// Show system statistics
    Stats,
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
    /// List assignable roles
    Roles,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// Print one page of users
    List {
        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,
    },
    /// Show a user's details
    View {
        id: i64,
    },
    /// Register a new user (missing fields are prompted)
    Create(CreateUserArgs),
    /// Page through users interactively
    Browse,
}

#[derive(Args, Default)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Initial password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub role_id: Option<i64>,
    /// Profile picture to upload
    #[arg(long)]
    pub picture: Option<PathBuf>,
    /// Fail instead of prompting for missing fields
    #[arg(long)]
    pub no_input: bool,
}
