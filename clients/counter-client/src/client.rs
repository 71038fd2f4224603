//! RPC client wrapper for the counter program
//!
//! A thin blocking wrapper over [`RpcClient`] that submits counter
//! transactions and inspects program accounts. Requests are issued
//! sequentially, one at a time; retries and fee policy stay with the RPC
//! layer and the cluster.

use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_instruction,
    transaction::Transaction,
};
use tracing::{debug, info};

use crate::errors::ClientError;
use crate::instruction::CounterInstruction;
use crate::state::CounterAccount;

/// One account owned by the counter program, as returned by
/// [`CounterClient::program_accounts`]
#[derive(Debug, Clone)]
pub struct ProgramAccountSummary {
    /// The account's address
    pub pubkey: Pubkey,
    /// The account's balance in lamports
    pub lamports: u64,
    /// The account's raw data
    pub data: Vec<u8>,
}

/// Blocking client for one counter program on one cluster
pub struct CounterClient {
    rpc: RpcClient,
    program_id: Pubkey,
}

impl CounterClient {
    /// Connect with confirmed commitment
    ///
    /// # Arguments
    /// * `url` - RPC endpoint, e.g. `http://127.0.0.1:8899`
    /// * `program_id` - The deployed counter program
    pub fn new(url: impl ToString, program_id: Pubkey) -> Self {
        Self::new_with_commitment(url, program_id, CommitmentConfig::confirmed())
    }

    /// Connect with an explicit commitment level
    pub fn new_with_commitment(
        url: impl ToString,
        program_id: Pubkey,
        commitment: CommitmentConfig,
    ) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.to_string(), commitment),
            program_id,
        }
    }

    /// The program id this client targets
    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Probe the cluster and return its software version
    pub fn check_connection(&self) -> Result<String, ClientError> {
        let version = self.rpc.get_version()?;
        debug!(version = %version.solana_core, "cluster reachable");
        Ok(version.solana_core)
    }

    /// Create an empty counter data account owned by the program
    ///
    /// Allocates exactly [`CounterAccount::size_of_default`] bytes and funds
    /// the account with the rent-exempt minimum for that size. Both the
    /// payer and the new account must sign.
    ///
    /// # Arguments
    /// * `payer` - Funds the rent and the transaction fee
    /// * `new_account` - Keypair of the account to create
    ///
    /// # Returns
    /// * `Result<Signature, ClientError>` - Signature of the confirmed
    ///   transaction
    pub fn create_counter_account(
        &self,
        payer: &Keypair,
        new_account: &Keypair,
    ) -> Result<Signature, ClientError> {
        let space = CounterAccount::size_of_default();
        let lamports = self.rpc.get_minimum_balance_for_rent_exemption(space)?;
        let instruction = system_instruction::create_account(
            &payer.pubkey(),
            &new_account.pubkey(),
            lamports,
            space as u64,
            &self.program_id,
        );

        let blockhash = self.rpc.get_latest_blockhash()?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&payer.pubkey()),
            &[payer, new_account],
            blockhash,
        );
        let signature = self.rpc.send_and_confirm_transaction(&transaction)?;

        info!(
            account = %new_account.pubkey(),
            lamports,
            space,
            "counter account created"
        );
        Ok(signature)
    }

    /// Submit a counter instruction and wait for confirmation
    ///
    /// # Arguments
    /// * `payer` - Signs the transaction and pays the fee
    /// * `counter_account` - The data account to mutate
    /// * `instruction` - The operation to perform
    ///
    /// # Returns
    /// * `Result<Signature, ClientError>` - Signature of the confirmed
    ///   transaction
    pub fn submit(
        &self,
        payer: &Keypair,
        counter_account: &Pubkey,
        instruction: &CounterInstruction,
    ) -> Result<Signature, ClientError> {
        let ix = instruction.build_instruction(&self.program_id, counter_account);
        debug!(
            account = %counter_account,
            data = ?ix.data,
            "sending counter transaction"
        );

        let blockhash = self.rpc.get_latest_blockhash()?;
        let transaction = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        let signature = self.rpc.send_and_confirm_transaction(&transaction)?;

        info!(%signature, "transaction confirmed");
        Ok(signature)
    }

    /// Fetch a counter account and decode its state
    ///
    /// # Arguments
    /// * `account` - The data account to read
    ///
    /// # Returns
    /// * `Result<CounterAccount, ClientError>` - The decoded state,
    ///   [`ClientError::AccountNotFound`] if the account does not exist, or
    ///   a decoding error if its data does not match the expected layout
    pub fn fetch_counter(&self, account: &Pubkey) -> Result<CounterAccount, ClientError> {
        let response = self
            .rpc
            .get_account_with_commitment(account, self.rpc.commitment())?;
        let fetched = response
            .value
            .ok_or(ClientError::AccountNotFound(*account))?;
        Ok(CounterAccount::unpack(&fetched.data)?)
    }

    /// List every account owned by the counter program
    pub fn program_accounts(&self) -> Result<Vec<ProgramAccountSummary>, ClientError> {
        let accounts = self.rpc.get_program_accounts(&self.program_id)?;
        debug!(count = accounts.len(), "fetched program accounts");
        Ok(accounts
            .into_iter()
            .map(|(pubkey, account)| ProgramAccountSummary {
                pubkey,
                lamports: account.lamports,
                data: account.data,
            })
            .collect())
    }
}
