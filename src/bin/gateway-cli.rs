use clap::{Parser, Subcommand};
use gateway_sdk::{GatewayClient, Resolved};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Inspect a running GitHub gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway status
    Health,
    /// Fetch an upstream path through the gateway
    Fetch { path: String },
    /// Resolve a user's avatar URL
    Profile { username: String },
    /// Resolve a repository's language tags
    Languages { owner: String, repo: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.url);

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            println!(
                "{} v{} (credential configured: {})",
                health.status, health.version, health.credential_configured
            );
        }
        Commands::Fetch { path } => {
            let json = client.fetch(&path).await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Profile { username } => {
            print_resolved(client.profile_image(&username).await);
        }
        Commands::Languages { owner, repo } => {
            let tags = client.repo_languages(&owner, &repo).await;
            let fallback = tags.is_fallback();
            let joined = tags.into_inner().join(", ");
            print_resolved(if fallback {
                Resolved::Fallback(joined)
            } else {
                Resolved::Primary(joined)
            });
        }
    }

    Ok(())
}

fn print_resolved(value: Resolved<String>) {
    match value {
        Resolved::Primary(v) => println!("{v}"),
        Resolved::Fallback(v) => println!("{v} (fallback)"),
    }
}
