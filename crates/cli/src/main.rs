//! Promarket CLI - command-line front end for the marketplace API
//!
//! Each subcommand is one call site: it forwards its arguments to the RPC
//! client and renders the result to the terminal.

mod session;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use promarket_protocol::types::{
    AdminListParams, AdminUpdateUserParams, AdminUserRow, Profile, RegisterParams, SearchCard,
    SearchParams, UpdateProfileParams,
};
use promarket_sdk::ApiClient;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8080/api";

#[derive(Parser)]
#[command(name = "promarket")]
#[command(about = "Promarket marketplace CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC endpoint URL
    #[arg(long, env = "PROMARKET_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        /// Display name shown in listings
        #[arg(short, long)]
        name: String,

        /// Offered service (e.g., Tutor, Lawyer)
        #[arg(short, long)]
        service: String,

        /// Years of experience
        #[arg(short, long)]
        experience: i64,

        /// Price in rubles
        #[arg(long)]
        price: i64,

        /// Free-form description
        #[arg(short, long, default_value = "")]
        about: String,
    },

    /// Log in with an existing account
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Search provider listings
    Search {
        /// Substring match on the display name
        #[arg(long)]
        name: Option<String>,

        /// Exact service filter
        #[arg(long)]
        service: Option<String>,

        #[arg(long)]
        experience_min: Option<i64>,

        #[arg(long)]
        experience_max: Option<i64>,

        #[arg(long)]
        price_min: Option<i64>,

        #[arg(long)]
        price_max: Option<i64>,

        #[arg(short, long, default_value = "1")]
        page: i64,
    },

    /// Show a profile (your own when USER_ID is omitted)
    Profile {
        user_id: Option<i64>,
    },

    /// Update fields of your profile
    Update {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        service: Option<String>,

        #[arg(short, long)]
        experience: Option<i64>,

        #[arg(long)]
        price: Option<i64>,

        #[arg(short, long)]
        about: Option<String>,
    },

    /// Hide your listing from search
    Hide,

    /// Make your listing visible again
    Unhide,

    /// Delete your account permanently
    DeleteAccount {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Administration (requires an admin session)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// List every account, hidden and admin ones included
    Users {
        #[arg(short, long, default_value = "1")]
        page: i64,

        #[arg(long, default_value = "10")]
        per_page: i64,
    },

    /// Update any account
    UpdateUser {
        user_id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        service: Option<String>,

        #[arg(short, long)]
        experience: Option<i64>,

        #[arg(long)]
        price: Option<i64>,

        #[arg(short, long)]
        about: Option<String>,

        /// Hide or unhide the listing
        #[arg(long)]
        hidden: Option<bool>,

        /// Grant or revoke admin rights
        #[arg(long)]
        admin: Option<bool>,
    },

    /// Delete any account
    DeleteUser {
        user_id: i64,
    },
}

#[derive(Tabled)]
struct SearchTableRow {
    id: i64,
    name: String,
    service: String,
    #[tabled(rename = "exp (years)")]
    experience: i64,
    #[tabled(rename = "price (rub)")]
    price: i64,
    about: String,
}

impl From<SearchCard> for SearchTableRow {
    fn from(card: SearchCard) -> Self {
        Self {
            id: card.id,
            name: card.name,
            service: card.service_type,
            experience: card.experience,
            price: card.price,
            about: card.about.unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct AdminTableRow {
    id: i64,
    username: String,
    name: String,
    service: String,
    hidden: bool,
    admin: bool,
}

impl From<AdminUserRow> for AdminTableRow {
    fn from(row: AdminUserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            name: row.name,
            service: row.service_type,
            hidden: row.is_hidden,
            admin: row.is_admin,
        }
    }
}

fn print_profile(profile: &Profile) {
    println!("  {} {}", "ID:".bold(), profile.id);
    println!("  {} {}", "Username:".bold(), profile.username);
    println!("  {} {}", "Name:".bold(), profile.name);
    println!("  {} {}", "Service:".bold(), profile.service_type);
    println!("  {} {} years", "Experience:".bold(), profile.experience);
    println!("  {} {} rub", "Price:".bold(), profile.price);
    println!(
        "  {} {}",
        "About:".bold(),
        profile.about.as_deref().unwrap_or("-")
    );
    if profile.is_hidden {
        println!("  {}", "Listing is hidden from search".yellow());
    }
    if profile.is_admin {
        println!("  {}", "Administrator account".cyan());
    }
}

fn print_pagination(page: i64, total_pages: i64, has_prev: bool, has_next: bool) {
    let mut footer = format!("Page {} of {}", page, total_pages);
    if has_prev {
        footer.push_str(&format!("  (previous: --page {})", page - 1));
    }
    if has_next {
        footer.push_str(&format!("  (next: --page {})", page + 1));
    }
    println!("{}", footer.dimmed());
}

/// Bring the session file in step with the client's cookie: the server
/// rotates it on register/login, may refresh it on any authenticated call,
/// and clears it on logout and account deletion.
async fn persist_session(client: &ApiClient) -> Result<()> {
    match client.session_token().await {
        Some(token) => session::store(&token).context("failed to persist session")?,
        None => session::clear(),
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let client = ApiClient::new(&cli.rpc_url)?;
    if let Some(token) = session::load() {
        client.restore_session(token).await;
    }

    match cli.command {
        Commands::Register {
            username,
            password,
            name,
            service,
            experience,
            price,
            about,
        } => {
            let result = client
                .register(RegisterParams {
                    username,
                    password,
                    name,
                    service_type: service,
                    experience,
                    price,
                    about,
                })
                .await?;

            println!(
                "{}",
                format!("✓ Registered and logged in (user {})", result.user_id)
                    .green()
                    .bold()
            );
        }

        Commands::Login { username, password } => {
            let result = client.login(&username, &password).await?;

            println!(
                "{}",
                format!("✓ Logged in as {} (user {})", username, result.user_id)
                    .green()
                    .bold()
            );
        }

        Commands::Logout => {
            client.logout().await?;
            println!("{}", "✓ Logged out".green().bold());
        }

        Commands::Search {
            name,
            service,
            experience_min,
            experience_max,
            price_min,
            price_max,
            page,
        } => {
            let result = client
                .search(SearchParams {
                    name: name.unwrap_or_default(),
                    service_type: service.unwrap_or_default(),
                    experience_min,
                    experience_max,
                    price_min,
                    price_max,
                    page,
                })
                .await?;

            if result.users.is_empty() {
                println!("{}", "Nothing found".yellow());
            } else {
                let rows: Vec<SearchTableRow> =
                    result.users.iter().cloned().map(Into::into).collect();
                println!("{}", Table::new(rows));
            }
            print_pagination(
                result.page,
                result.total_pages,
                result.has_prev_page(),
                result.has_next_page(),
            );
        }

        Commands::Profile { user_id } => {
            let profile = match user_id {
                Some(id) => client.get_profile(id).await?,
                None => client.my_profile().await?,
            };
            print_profile(&profile);
        }

        Commands::Update {
            name,
            service,
            experience,
            price,
            about,
        } => {
            let params = UpdateProfileParams {
                name,
                service_type: service,
                experience,
                price,
                about,
            };
            if params == UpdateProfileParams::default() {
                bail!("nothing to update; pass at least one field flag");
            }

            client.update_profile(params).await?;
            println!("{}", "✓ Profile updated".green().bold());
        }

        Commands::Hide => {
            client.hide_profile(true).await?;
            println!("{}", "✓ Listing hidden from search".green().bold());
        }

        Commands::Unhide => {
            client.hide_profile(false).await?;
            println!("{}", "✓ Listing visible in search".green().bold());
        }

        Commands::DeleteAccount { yes } => {
            if !yes {
                bail!("this permanently deletes your account; re-run with --yes to confirm");
            }

            client.delete_account().await?;
            println!("{}", "✓ Account deleted".green().bold());
        }

        Commands::Admin { command } => match command {
            AdminCommands::Users { page, per_page } => {
                let result = client
                    .admin_get_all_users(AdminListParams { page, per_page })
                    .await?;

                if result.users.is_empty() {
                    println!("{}", "No accounts on this page".yellow());
                } else {
                    let rows: Vec<AdminTableRow> =
                        result.users.iter().cloned().map(Into::into).collect();
                    println!("{}", Table::new(rows));
                }
                print_pagination(
                    result.page,
                    result.total_pages,
                    result.page > 1,
                    result.page < result.total_pages,
                );
                println!("{}", format!("{} accounts total", result.total_users).dimmed());
            }

            AdminCommands::UpdateUser {
                user_id,
                name,
                service,
                experience,
                price,
                about,
                hidden,
                admin,
            } => {
                let params = AdminUpdateUserParams {
                    name,
                    service_type: service,
                    experience,
                    price,
                    about,
                    is_hidden: hidden,
                    is_admin: admin,
                    ..AdminUpdateUserParams::for_user(user_id)
                };
                if params == AdminUpdateUserParams::for_user(user_id) {
                    bail!("nothing to update; pass at least one field flag");
                }

                client.admin_update_user(params).await?;
                println!("{}", format!("✓ User {} updated", user_id).green().bold());
            }

            AdminCommands::DeleteUser { user_id } => {
                client.admin_delete_user(user_id).await?;
                println!("{}", format!("✓ User {} deleted", user_id).green().bold());
            }
        },
    }

    persist_session(&client).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("promarket=warn"))
        .expect("Failed to create env filter");
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    /// A session cookie rotated on any authenticated command must reach the
    /// session file, not only the one set by login/register.
    #[tokio::test]
    async fn rotated_session_cookie_is_persisted_after_any_command() {
        // Point the session file at a scratch directory.
        let data_dir = std::env::temp_dir().join(format!(
            "promarket-cli-session-test-{}",
            std::process::id()
        ));
        std::env::set_var("XDG_DATA_HOME", &data_dir);

        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_header("cookie", "session=old-token")
            .match_body(Matcher::PartialJson(json!({
                "method": "user.hide_profile",
                "params": {"hide": true},
            })))
            .with_status(200)
            .with_header("set-cookie", "session=rotated-token; HttpOnly; Path=/")
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "result": {"success": true, "is_hidden": true},
                    "id": 1,
                })
                .to_string(),
            )
            .create_async()
            .await;

        session::store("old-token").unwrap();

        let cli = Cli {
            command: Commands::Hide,
            rpc_url: server.url(),
        };
        run(cli).await.unwrap();

        assert_eq!(session::load().as_deref(), Some("rotated-token"));
        let _ = std::fs::remove_dir_all(&data_dir);
    }
}
