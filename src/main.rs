use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use soap_relay::client::{IcuTechClient, NewCustomer};
use soap_relay::config::Config;
use soap_relay::http::Exchange;
use soap_relay::http::client::HttpExchange;
use soap_relay::proxy::ProxyRelay;
use soap_relay::render::format_entity_details;
use soap_relay::soap::RemoteResult;

#[derive(Debug, Parser)]
#[command(name = "soap-relay", version, about = "ICUTech SOAP client relayed through public proxies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in with an existing account
    Login {
        #[arg(long)]
        user: String,
        #[arg(long, env = "SOAP_RELAY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a throwaway account for testing logins
    RegisterTest,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load()?;

    let exchange = HttpExchange::new(cfg.connect_timeout())?;
    let client = IcuTechClient::new(ProxyRelay::from_config(exchange, &cfg)?);

    tokio::select! {
        res = run(&client, cli.command) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Cancelled, request abandoned");
        }
    }

    Ok(())
}

async fn run<E: Exchange>(client: &IcuTechClient<E>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { user, password } => match client.login(&user, &password).await {
            Ok(RemoteResult::Success { payload }) => {
                println!("Login successful\n\nEntity details:\n{}", format_entity_details(&payload));
            }
            Ok(RemoteResult::Failure { message, .. }) => {
                println!("Login failed: {message}");
            }
            Err(e) => {
                println!("Network error: {e}\nPlease check your connection and try again.");
            }
        },

        Command::RegisterTest => {
            let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
            let customer = NewCustomer::test_account(stamp);

            println!("Creating test account...");
            match client.register_account(&customer).await {
                Ok(RemoteResult::Success { .. }) => {
                    println!(
                        "Test account created\n  Email: {}\n  Password: {}\nUse these credentials to test login.",
                        customer.email, customer.password
                    );
                }
                Ok(RemoteResult::Failure { message, .. }) => {
                    println!("Registration failed: {message}");
                }
                Err(e) => {
                    println!("Registration error: {e}");
                }
            }
        }
    }

    Ok(())
}
