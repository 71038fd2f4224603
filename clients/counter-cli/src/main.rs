//! Demo CLI for the counter program
//!
//! One-shot commands against a local (or other) cluster: submit an
//! increment or decrement, decode a counter account, list every account the
//! program owns, or create a fresh data account. When no payer keypair is
//! given, an ephemeral keypair is generated and funded by airdrop, which
//! only works on a test cluster.

use std::{path::PathBuf, thread, time::Duration};

use clap::{Parser, Subcommand};
use counter_client::{CounterClient, CounterInstruction};
use eyre::{eyre, Result};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[arg(
        long,
        default_value = "http://127.0.0.1:8899",
        help = "RPC endpoint of the target cluster"
    )]
    url: String,

    #[arg(
        long,
        default_value_t = counter_client::id(),
        help = "Counter program id"
    )]
    program_id: Pubkey,

    #[arg(
        long,
        help = "Path to the fee payer keypair (an airdrop-funded ephemeral keypair when omitted)"
    )]
    payer: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add an amount to a counter account
    Increment {
        #[arg(long, help = "The counter data account")]
        account: Pubkey,
        #[arg(help = "Amount to add (must fit in 32 bits)")]
        amount: u64,
    },
    /// Subtract an amount from a counter account
    Decrement {
        #[arg(long, help = "The counter data account")]
        account: Pubkey,
        #[arg(help = "Amount to subtract (must fit in 32 bits)")]
        amount: u64,
    },
    /// Fetch a counter account and print its decoded count
    Show {
        #[arg(long, help = "The counter data account")]
        account: Pubkey,
    },
    /// List every account owned by the counter program
    Accounts,
    /// Create an empty counter data account owned by the program
    CreateAccount,
    /// Check cluster connectivity
    Ping,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Cli {
        url,
        program_id,
        payer,
        command,
    } = Cli::parse();

    let client = CounterClient::new(&url, program_id);

    match command {
        Command::Increment { account, amount } => {
            let instruction = CounterInstruction::increment(amount)?;
            let payer = load_payer(&url, payer.as_deref())?;
            let signature = client.submit(&payer, &account, &instruction)?;
            println!("Incremented {account} by {amount}");
            println!("Signature: {signature}");
        }
        Command::Decrement { account, amount } => {
            let instruction = CounterInstruction::decrement(amount)?;
            let payer = load_payer(&url, payer.as_deref())?;
            let signature = client.submit(&payer, &account, &instruction)?;
            println!("Decremented {account} by {amount}");
            println!("Signature: {signature}");
        }
        Command::Show { account } => {
            let counter = client.fetch_counter(&account)?;
            println!("Account: {account}");
            println!("Count: {}", counter.count);
        }
        Command::Accounts => {
            let accounts = client.program_accounts()?;
            if accounts.is_empty() {
                println!("No accounts owned by {program_id}");
            }
            for (i, summary) in accounts.iter().enumerate() {
                println!("Account {}:", i + 1);
                println!("  Pubkey: {}", summary.pubkey);
                println!(
                    "  Balance: {} SOL",
                    summary.lamports as f64 / LAMPORTS_PER_SOL as f64
                );
                println!("  Data ({} bytes): {:?}", summary.data.len(), summary.data);
            }
        }
        Command::CreateAccount => {
            let payer = load_payer(&url, payer.as_deref())?;
            let data_account = Keypair::new();
            let signature = client.create_counter_account(&payer, &data_account)?;
            println!("Created counter account {}", data_account.pubkey());
            println!("Signature: {signature}");
        }
        Command::Ping => {
            let version = client.check_connection()?;
            println!("Connected to {url} (solana-core {version})");
        }
    }

    Ok(())
}

/// Read the payer keypair, or generate and airdrop-fund an ephemeral one
fn load_payer(url: &str, path: Option<&std::path::Path>) -> Result<Keypair> {
    match path {
        Some(path) => read_keypair_file(path)
            .map_err(|err| eyre!("failed to read keypair file {}: {err}", path.display())),
        None => {
            let payer = Keypair::new();
            airdrop(url, &payer, 2 * LAMPORTS_PER_SOL)?;
            Ok(payer)
        }
    }
}

/// Fund an ephemeral payer on a test cluster and wait until spendable
fn airdrop(url: &str, payer: &Keypair, lamports: u64) -> Result<()> {
    let rpc = RpcClient::new_with_commitment(url.to_string(), CommitmentConfig::confirmed());
    let signature = rpc.request_airdrop(&payer.pubkey(), lamports)?;
    while !rpc.confirm_transaction(&signature)? {
        thread::sleep(Duration::from_millis(200));
    }
    Ok(())
}
