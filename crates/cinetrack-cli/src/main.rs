use std::process;

use cinetrack_auth::Role;
use cinetrack_cli::accounts;
use cinetrack_db::{PgStore, init_db_pool, run_migrations};
use cinetrack_models::User;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "cinetrack-cli")]
#[command(about = "Cinetrack CLI - Administrative tools for Cinetrack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Change the role of an existing account
    SetRole {
        #[arg(short = 'e', long)]
        email: String,

        /// USER, STAFF or ADMIN
        #[arg(short = 'r', long)]
        role: Role,
    },
    /// Block an account
    Block {
        #[arg(short = 'e', long)]
        email: String,
    },
    /// Unblock an account
    Unblock {
        #[arg(short = 'e', long)]
        email: String,
    },
    /// Apply pending database migrations
    Migrate,
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {context}: {err}");
    process::exit(1);
}

fn report(action: &str, user: User) {
    println!("\n✅ {action}");
    println!("   Email: {}", user.email);
    println!("   Role: {}", user.role);
    println!("   Blocked: {}", user.blocked);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => fail("Configuration error", "DATABASE_URL must be set"),
    };

    let pool = match init_db_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => fail("Failed to connect to database", e),
    };

    let cli = Cli::parse();

    if let Err(e) = run_migrations(&pool).await {
        fail("Failed to run migrations", e);
    }

    let store = PgStore::new(pool);

    match cli.command {
        Commands::CreateAdmin {
            email,
            name,
            password,
        } => handle_create_admin(&store, email, name, password).await,
        Commands::SetRole { email, role } => match accounts::set_role(&store, &email, role).await {
            Ok(user) => report("Role updated", user.into()),
            Err(e) => fail("Error updating role", e),
        },
        Commands::Block { email } => match accounts::set_blocked(&store, &email, true).await {
            Ok(user) => report("Account blocked", user.into()),
            Err(e) => fail("Error blocking account", e),
        },
        Commands::Unblock { email } => match accounts::set_blocked(&store, &email, false).await {
            Ok(user) => report("Account unblocked", user.into()),
            Err(e) => fail("Error unblocking account", e),
        },
        Commands::Migrate => println!("✅ Migrations are up to date"),
    }
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail("Failed to read input", e))
}

async fn handle_create_admin(
    store: &PgStore,
    email: Option<String>,
    name: Option<String>,
    password: Option<String>,
) {
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let name = name.unwrap_or_else(|| prompt("Display name"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    match accounts::create_admin(store, &email, &name, &password).await {
        Ok(user) => report("Admin created successfully!", user.into()),
        Err(e) => fail("Error creating admin", e),
    }
}
