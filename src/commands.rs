//! Dispatch from parsed commands to services.
//!
//! Screens behind a guard (profile, admin) are entered through the router
//! first, so a guest or customer is bounced exactly like a browser would be.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use session::{Viewer, nav};
use uuid::Uuid;

use crate::cli::{
    AdminCommand, AdminSubcommand, CategorySubcommand, Command, DancingSubcommand, DressItemArgs,
    DressItemSubcommand, ProfileSubcommand, SignUpArgs, SpecialArgs, SpecialSubcommand, UserArgs, UserSubcommand,
};
use crate::error::AppError;
use crate::forms::{DressItemForm, SignUpForm, SpecialPackageForm, UserForm};
use crate::listing::{self, UserFilter};
use crate::notice::Notice;
use crate::services::{auth, catalog, packages, profile, users};
use crate::state::AppState;

/// Upper bound on waiting for the background logout call before exiting.
const LOGOUT_GRACE: Duration = Duration::from_secs(3);

const OPERATION_FAILED: &str = "Operation failed";
const DELETE_FAILED: &str = "Delete failed";

impl Command {
    /// Notice text when a failure carries no server message.
    #[must_use]
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::Signin { .. } => auth::SIGN_IN_FAILED,
            Self::Signup(_) => auth::SIGN_UP_FAILED,
            Self::Signout | Self::Whoami | Self::Open { .. } => OPERATION_FAILED,
            Self::Profile(cmd) => match cmd.command {
                ProfileSubcommand::Show => "Failed to load profile",
                ProfileSubcommand::Update { .. } => profile::UPDATE_FAILED,
                ProfileSubcommand::Password { .. } => profile::PASSWORD_FAILED,
                ProfileSubcommand::Delete { .. } => profile::DELETE_FAILED,
            },
            Self::Admin(cmd) => admin_fallback(cmd),
        }
    }
}

fn admin_fallback(cmd: &AdminCommand) -> &'static str {
    match &cmd.command {
        AdminSubcommand::Categories(c) => match c.command {
            CategorySubcommand::List { .. } => catalog::CATEGORIES_LOAD_FAILED,
            CategorySubcommand::Delete { .. } => DELETE_FAILED,
            _ => OPERATION_FAILED,
        },
        AdminSubcommand::DressItems(c) => match c.command {
            DressItemSubcommand::List { .. } => catalog::DRESS_ITEMS_LOAD_FAILED,
            DressItemSubcommand::Delete { .. } => DELETE_FAILED,
            _ => catalog::DRESS_ITEM_SAVE_FAILED,
        },
        AdminSubcommand::DancingPackages(c) => match c.command {
            DancingSubcommand::List => packages::DANCING_LOAD_FAILED,
            DancingSubcommand::Delete { .. } => packages::DANCING_DELETE_FAILED,
            _ => OPERATION_FAILED,
        },
        AdminSubcommand::SpecialPackages(c) => match c.command {
            SpecialSubcommand::List => packages::SPECIAL_LOAD_FAILED,
            SpecialSubcommand::Delete { .. } => DELETE_FAILED,
            _ => OPERATION_FAILED,
        },
        AdminSubcommand::Users(c) => match c.command {
            UserSubcommand::List { .. } => users::LOAD_FAILED,
            UserSubcommand::Deactivate { .. } => users::SOFT_DELETE_FAILED,
            UserSubcommand::Purge { .. } => users::HARD_DELETE_FAILED,
            _ => OPERATION_FAILED,
        },
    }
}

/// # Errors
///
/// Returns the first failure; the caller turns it into a notice and exit code.
pub async fn run(state: &AppState, command: Command) -> Result<(), AppError> {
    match command {
        Command::Signin { email, password } => run_sign_in(state, &email, &password).await,
        Command::Signup(args) => run_sign_up(state, args).await,
        Command::Signout => run_sign_out(state).await,
        Command::Whoami => {
            println!("{}", describe_viewer(state));
            Ok(())
        }
        Command::Open { path } => {
            let page = state.router.navigate(&path);
            println!("{} ({})", page.title(), state.navigator.current().path);
            Ok(())
        }
        Command::Profile(cmd) => run_profile(state, cmd.command).await,
        Command::Admin(cmd) => run_admin(state, cmd).await,
    }
}

async fn run_sign_in(state: &AppState, email: &str, password: &str) -> Result<(), AppError> {
    let snapshot = auth::sign_in(state, email, password).await?;
    let landing = state.router.after_sign_in();
    tracing::info!(viewer = ?snapshot.viewer(), "signed in");
    println!("{}", Notice::success(format!("Welcome, {}", snapshot.full_name.unwrap_or_default())));
    println!("{}", Notice::info(format!("Continue at {}", landing.title())));
    Ok(())
}

async fn run_sign_up(state: &AppState, args: SignUpArgs) -> Result<(), AppError> {
    let form = SignUpForm { full_name: args.full_name, phone: args.phone, email: args.email, password: args.password };
    println!("{}", auth::sign_up(state, &form).await?);
    Ok(())
}

async fn run_sign_out(state: &AppState) -> Result<(), AppError> {
    let notify = auth::sign_out(state)?;
    if let Some(handle) = notify {
        match tokio::time::timeout(LOGOUT_GRACE, handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "logout task did not complete"),
            Err(_) => tracing::warn!("server logout still pending; abandoning it"),
        }
    }
    state.navigator.navigate(nav::HOME_PATH);
    println!("{}", Notice::success("Signed out"));
    Ok(())
}

fn describe_viewer(state: &AppState) -> String {
    let snapshot = state.session.snapshot();
    if snapshot.viewer() == Viewer::Guest {
        return "guest".to_owned();
    }
    let kind = if snapshot.is_admin() { "admin" } else { "customer" };
    format!(
        "{} <{}> ({kind})",
        snapshot.full_name.unwrap_or_default(),
        snapshot.email.unwrap_or_default(),
    )
}

/// Enter `path` through its guard.
///
/// # Errors
///
/// Returns [`AppError::Redirected`] when the guard sends the visitor away.
pub fn enter(state: &AppState, path: &str) -> Result<(), AppError> {
    let wanted = session::router::resolve(path).0;
    if state.router.navigate(path) == wanted {
        return Ok(());
    }
    Err(AppError::Redirected { to: state.navigator.current().path })
}

// =============================================================================
// PROFILE
// =============================================================================

async fn run_profile(state: &AppState, command: ProfileSubcommand) -> Result<(), AppError> {
    enter(state, "/profile")?;
    match command {
        ProfileSubcommand::Show => print_json(&profile::fetch(state).await?),
        ProfileSubcommand::Update { full_name, phone } => {
            println!("{}", profile::update(state, &full_name, &phone).await?);
            Ok(())
        }
        ProfileSubcommand::Password { current, new, confirm } => {
            println!("{}", profile::change_password(state, &current, &new, &confirm).await?);
            Ok(())
        }
        ProfileSubcommand::Delete { yes: false } => {
            println!("{}", Notice::info("Pass --yes to delete your account permanently"));
            Ok(())
        }
        ProfileSubcommand::Delete { yes: true } => {
            println!("{}", profile::delete_account(state).await?);
            Ok(())
        }
    }
}

// =============================================================================
// ADMIN
// =============================================================================

async fn run_admin(state: &AppState, admin: AdminCommand) -> Result<(), AppError> {
    let notice = match admin.command {
        AdminSubcommand::Categories(cmd) => {
            enter(state, "/admin/categories")?;
            match cmd.command {
                CategorySubcommand::List { page, search } => {
                    let all = listing::filter_categories(catalog::list_categories(state).await?, search.as_deref());
                    return print_page(&all, page.page, listing::CATEGORIES_PER_PAGE);
                }
                CategorySubcommand::Create { name, description } => {
                    catalog::save_category(state, None, &name, description.as_deref()).await?
                }
                CategorySubcommand::Update { id, name, description } => {
                    catalog::save_category(state, Some(id), &name, description.as_deref()).await?
                }
                CategorySubcommand::Delete { id } => catalog::delete_category(state, id).await?,
            }
        }
        AdminSubcommand::DressItems(cmd) => {
            enter(state, "/admin/dress-items")?;
            match cmd.command {
                DressItemSubcommand::List { page, category } => {
                    let all = listing::filter_dress_items(catalog::list_dress_items(state).await?, category);
                    return print_page(&all, page.page, listing::DRESS_ITEMS_PER_PAGE);
                }
                DressItemSubcommand::Create(item) => save_dress_item(state, None, item).await?,
                DressItemSubcommand::Update { id, item } => save_dress_item(state, Some(id), item).await?,
                DressItemSubcommand::Delete { id } => catalog::delete_dress_item(state, id).await?,
            }
        }
        AdminSubcommand::DancingPackages(cmd) => {
            enter(state, "/admin/dancing-packages")?;
            match cmd.command {
                DancingSubcommand::List => return print_json(&packages::list_dancing(state).await?),
                DancingSubcommand::Create(p) => packages::save_dancing(state, None, &p.name, &p.details, p.price).await?,
                DancingSubcommand::Update { id, package: p } => {
                    packages::save_dancing(state, Some(id), &p.name, &p.details, p.price).await?
                }
                DancingSubcommand::Delete { id } => packages::delete_dancing(state, id).await?,
            }
        }
        AdminSubcommand::SpecialPackages(cmd) => {
            enter(state, "/admin/special-packages")?;
            match cmd.command {
                SpecialSubcommand::List => return print_json(&packages::list_special(state).await?),
                SpecialSubcommand::Create(p) => packages::save_special(state, None, &special_form(p)).await?,
                SpecialSubcommand::Update { id, package } => {
                    packages::save_special(state, Some(id), &special_form(package)).await?
                }
                SpecialSubcommand::Delete { id } => packages::delete_special(state, id).await?,
            }
        }
        AdminSubcommand::Users(cmd) => {
            enter(state, "/admin/users")?;
            match cmd.command {
                UserSubcommand::List { page, search, role, status } => {
                    let filter = UserFilter { search, role, status };
                    let all = filter.apply(users::list(state).await?);
                    return print_page(&all, page.page, listing::USERS_PER_PAGE);
                }
                UserSubcommand::Create(u) => users::create(state, &user_form(u)).await?,
                UserSubcommand::Update { id, user } => users::update(state, id, &user_form(user)).await?,
                UserSubcommand::Deactivate { id } => users::deactivate(state, id).await?,
                UserSubcommand::Purge { id } => users::purge(state, id).await?,
            }
        }
    };
    println!("{notice}");
    Ok(())
}

async fn save_dress_item(state: &AppState, id: Option<Uuid>, args: DressItemArgs) -> Result<Notice, AppError> {
    let image = match &args.image {
        Some(path) => Some(read_image(path).await?),
        None => None,
    };
    let form = DressItemForm {
        name: args.name,
        description: args.description,
        quantity_adult: args.quantity_adult,
        quantity_page_boys: args.quantity_page_boys,
        category_id: args.category,
    };
    catalog::save_dress_item(state, id, &form, image).await
}

async fn read_image(path: &Path) -> Result<catalog::ImageUpload, AppError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
    Ok(catalog::ImageUpload::new(&file_name, bytes))
}

fn special_form(args: SpecialArgs) -> SpecialPackageForm {
    SpecialPackageForm {
        name: args.name,
        description: args.description,
        free_of_charge_items: args.free_items,
        price: args.price,
        discount_percentage: args.discount,
    }
}

fn user_form(args: UserArgs) -> UserForm {
    UserForm {
        full_name: args.full_name,
        email: args.email,
        phone: args.phone,
        password: args.password,
        role: args.role,
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageView<'a, T> {
    page: usize,
    total_pages: usize,
    total_items: usize,
    has_prev: bool,
    has_next: bool,
    items: &'a [T],
}

fn print_page<T: Serialize>(items: &[T], page: usize, per_page: usize) -> Result<(), AppError> {
    let slice = listing::paginate(items, page, per_page);
    print_json(&PageView {
        page: slice.page,
        total_pages: slice.total_pages,
        total_items: slice.total_items,
        has_prev: slice.has_prev(),
        has_next: slice.has_next(),
        items: slice.items,
    })
}

fn print_json(value: &impl Serialize) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
