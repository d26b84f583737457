// gigcli/src/main.rs
//! Command-line client for the marketplace API
//!
//! One subcommand per backend endpoint, plus the Igbo dictionary lookup that
//! talks to its API directly. The stored token drives everything: `login`
//! saves it, every authenticated command sends it, `logout` deletes it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

mod api;
mod auth;
mod dictionary;
mod guard;
mod token_store;

use api::ApiClient;
use guard::GuardDecision;

#[derive(Parser)]
#[command(name = "gigcli", about = "Client for the freelance marketplace API", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a local account
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Discard the stored token
    Logout,
    /// Show the authenticated account
    Whoami,
    /// List all users (admin only)
    Users,
    /// Browse and post jobs
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Initialize and verify payments
    #[command(subcommand)]
    Pay(PayCommand),
    /// Translate text into a target language
    Translate {
        text: String,
        #[arg(long = "to")]
        target: String,
    },
    /// Look up an Igbo word
    Dict { term: String },
    /// Finish an OAuth login from the redirect URL
    AuthCallback { url: String },
}

#[derive(Subcommand)]
enum JobsCommand {
    /// List open jobs
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show one job
    Show { id: String },
    /// Post a new job
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        budget_min: Option<i64>,
        #[arg(long)]
        budget_max: Option<i64>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Subcommand)]
enum PayCommand {
    /// Initialize a payment and get the checkout URL
    Init {
        /// Amount in minor units (kobo)
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "NGN")]
        currency: String,
        #[arg(long)]
        job_id: Option<String>,
    },
    /// Verify a payment by its reference
    Verify { reference: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::from_env()?;

    match cli.command {
        Commands::Register {
            full_name,
            email,
            password,
        } => {
            let body = client.register(&full_name, &email, &password).await?;
            println!("Registered and logged in.");
            print_json(&body["user"]);
        }
        Commands::Login { email, password } => {
            let body = client.login(&email, &password).await?;
            println!("Logged in.");
            print_json(&body["user"]);
        }
        Commands::Logout => {
            client.logout().await?;
            println!("Logged out.");
        }
        Commands::Whoami => {
            let body = client.me().await?;
            print_json(&body["user"]);
        }
        Commands::Users => {
            // Client-side gate only; the server enforces the role again
            let token = client.tokens().load();
            match guard::check_role(token.as_deref(), "admin") {
                GuardDecision::Login => {
                    println!("You are not logged in. Run `gigcli login` first.");
                }
                GuardDecision::Denied { role } => {
                    println!("Access denied: the user list needs the admin role (you are '{}').", role);
                    println!("Showing open jobs instead.");
                    let body = client.list_jobs(1, 20).await?;
                    print_json(&body);
                }
                GuardDecision::Allow => {
                    let body = client.list_users().await?;
                    print_json(&body);
                }
            }
        }
        Commands::Jobs(command) => match command {
            JobsCommand::List { page, limit } => {
                let body = client.list_jobs(page, limit).await?;
                print_json(&body);
            }
            JobsCommand::Show { id } => {
                let body = client.get_job(&id).await?;
                print_json(&body);
            }
            JobsCommand::Create {
                title,
                description,
                category,
                budget_min,
                budget_max,
                location,
            } => {
                let payload = json!({
                    "title": title,
                    "description": description,
                    "category": category,
                    "budget_min": budget_min,
                    "budget_max": budget_max,
                    "location": location,
                });
                let body = client.create_job(payload).await?;
                println!("Job created.");
                print_json(&body);
            }
        },
        Commands::Pay(command) => match command {
            PayCommand::Init {
                amount,
                currency,
                job_id,
            } => {
                let body = client
                    .init_payment(amount, &currency, job_id.as_deref())
                    .await?;
                println!("Payment initialized. Complete checkout at:");
                if let Some(url) = body["authorization_url"].as_str() {
                    println!("  {}", url);
                }
                print_json(&body);
            }
            PayCommand::Verify { reference } => {
                let body = client.verify_payment(&reference).await?;
                print_json(&body);
            }
        },
        Commands::Translate { text, target } => {
            let body = client.translate(&text, &target).await?;
            match body["translation"].as_str() {
                Some(translation) => println!("{}", translation),
                None => print_json(&body),
            }
        }
        Commands::Dict { term } => {
            let entry = dictionary::DictionaryClient::from_env().lookup(&term).await;
            if entry.is_not_found() {
                println!("Not found");
            } else {
                println!("{}", entry.word);
                for definition in &entry.definitions {
                    println!("  - {}", definition);
                }
            }
        }
        Commands::AuthCallback { url } => match auth::extract_token(&url) {
            Some(token) => {
                client.tokens().save(&token)?;
                println!("Login complete.");
            }
            None => {
                println!("No token found in the callback URL. Please log in again.");
            }
        },
    }

    Ok(())
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(_) => println!("{}", value),
    }
}
