use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use gatehouse::cli::create_super_admin;
use gatehouse_config::{AppConfig, DefaultAdminConfig};
use gatehouse_db::init_user_store;

#[derive(Parser)]
#[command(name = "gatehouse-cli")]
#[command(about = "Gatehouse CLI - Administrative tools for Gatehouse", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the super administrator account
    CreateSuperAdmin {
        /// Login name
        #[arg(short = 'u', long)]
        username: String,

        /// Password
        #[arg(short = 'p', long)]
        password: String,

        /// Email address (defaults to <username>@localhost)
        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(short = 'f', long, default_value = "Super")]
        first_name: String,

        #[arg(short = 'l', long, default_value = "Admin")]
        last_name: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    if config.database.url.is_none() {
        eprintln!("DATABASE_URL must be set; the in-memory store does not outlive this command");
        std::process::exit(1);
    }

    match cli.command {
        Commands::CreateSuperAdmin {
            username,
            password,
            email,
            first_name,
            last_name,
        } => {
            let admin = DefaultAdminConfig {
                email: email.unwrap_or_else(|| format!("{}@localhost", username)),
                username,
                password,
                first_name,
                last_name,
            };
            handle_create_super_admin(&config, &admin).await
        }
    }
}

async fn handle_create_super_admin(config: &AppConfig, admin: &DefaultAdminConfig) {
    let store = match init_user_store(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match create_super_admin(store.as_ref(), admin, &config.password).await {
        Ok(user) => {
            println!("Super admin created successfully!");
            println!("   Username: {}", user.username);
            println!("   Email: {}", user.email);
        }
        Err(e) => {
            eprintln!("Error creating super admin: {}", e);
            std::process::exit(1);
        }
    }
}
