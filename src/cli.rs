use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;
use wire::Role;

use crate::listing::StatusFilter;

#[derive(Parser, Debug)]
#[command(name = "rajawarama", about = "Rajawarama wedding services client")]
pub struct Cli {
    #[arg(long, env = "RAJAWARAMA_API_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session.
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RAJAWARAMA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register a customer account.
    Signup(SignUpArgs),
    Signout,
    /// Show who the stored session belongs to.
    Whoami,
    /// Navigate to a route, running its guard.
    Open { path: String },
    Profile(ProfileCommand),
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
pub struct SignUpArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "RAJAWARAMA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

// =============================================================================
// PROFILE
// =============================================================================

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        phone: String,
    },
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    Delete {
        /// Required; deletion cannot be undone.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

// =============================================================================
// ADMIN
// =============================================================================

#[derive(Args, Debug)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    Categories(CategoryCommand),
    DressItems(DressItemCommand),
    DancingPackages(DancingCommand),
    SpecialPackages(SpecialCommand),
    Users(UserCommand),
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Args, Debug)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CategorySubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Args, Debug)]
pub struct DressItemCommand {
    #[command(subcommand)]
    pub command: DressItemSubcommand,
}

#[derive(Args, Debug)]
pub struct DressItemArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub quantity_adult: Option<i32>,
    #[arg(long)]
    pub quantity_page_boys: Option<i32>,
    #[arg(long)]
    pub category: Option<Uuid>,
    /// Image file to upload with the item.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum DressItemSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        category: Option<Uuid>,
    },
    Create(DressItemArgs),
    Update {
        id: Uuid,
        #[command(flatten)]
        item: DressItemArgs,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Args, Debug)]
pub struct DancingCommand {
    #[command(subcommand)]
    pub command: DancingSubcommand,
}

#[derive(Args, Debug)]
pub struct DancingArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub details: String,
    #[arg(long)]
    pub price: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum DancingSubcommand {
    List,
    Create(DancingArgs),
    Update {
        id: Uuid,
        #[command(flatten)]
        package: DancingArgs,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Args, Debug)]
pub struct SpecialCommand {
    #[command(subcommand)]
    pub command: SpecialSubcommand,
}

#[derive(Args, Debug)]
pub struct SpecialArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub free_items: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub discount: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum SpecialSubcommand {
    List,
    Create(SpecialArgs),
    Update {
        id: Uuid,
        #[command(flatten)]
        package: SpecialArgs,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Args, Debug)]
pub struct UserArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, env = "RAJAWARAMA_USER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, value_parser = parse_role, default_value = "CUSTOMER")]
    pub role: Role,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
    },
    Create(UserArgs),
    Update {
        id: Uuid,
        #[command(flatten)]
        user: UserArgs,
    },
    /// Soft delete: the account stays listed as deactivated.
    Deactivate {
        id: Uuid,
    },
    /// Permanent delete.
    Purge {
        id: Uuid,
    },
}

fn parse_role(raw: &str) -> Result<Role, wire::RoleParseError> {
    raw.to_ascii_uppercase().parse()
}
