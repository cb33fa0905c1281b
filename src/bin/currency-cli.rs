use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "currency-cli")]
#[command(about = "Management CLI for the currency exchange service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered currencies
    Currencies,
    /// List stored exchange rates
    Rates,
    /// Convert an amount between two currencies
    Convert {
        from: String,
        to: String,
        amount: f64,
    },
    /// Register a currency by its 3-letter code
    AddCurrency {
        code: String,
        /// Display name; the built-in catalog name is used when omitted
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Currencies => {
            let res = client
                .get(format!("{}/currencies", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Rates => {
            let res = client
                .get(format!("{}/exchangeRates", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Convert { from, to, amount } => {
            let amount = amount.to_string();
            let res = client
                .get(format!("{}/convert", cli.url))
                .query(&[
                    ("from", from.as_str()),
                    ("to", to.as_str()),
                    ("amount", amount.as_str()),
                ])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::AddCurrency { code, name } => {
            let mut form = vec![("code", code)];
            if let Some(name) = name {
                form.push(("name", name));
            }
            let res = client
                .post(format!("{}/currencies", cli.url))
                .form(&form)
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
