use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Query CLI for the Catalog API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Identity sent as X-User-Id.
    #[arg(short = 'U', long)]
    user: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page of products
    Products {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Use the authenticated route (/user/products)
        #[arg(long)]
        authenticated: bool,
    },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(user) = cli.user {
        headers.insert("x-user-id", HeaderValue::from_str(&user.to_string())?);
    }

    match cli.command {
        Commands::Products {
            page,
            authenticated,
        } => {
            let path = if authenticated {
                "/user/products"
            } else {
                "/products"
            };
            let res = client
                .get(format!("{}{}?page={}", cli.url, path, page))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client
                .get(format!("{}/health", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
