// Yield Source Adapter - share accounting over an external interest-bearing vault
// Architecture: one program, many instances created by a factory, each bound once to a vault

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod vault;

use instructions::*;

declare_id!("YSRCaD4pTe7vQd9wM3nHfLxJk2sGbRcZuE8yNPqTh5A");

#[program]
pub mod yield_source_adapter {
    use super::*;

    /// Create the factory singleton
    pub fn initialize_factory(ctx: Context<InitializeFactory>) -> Result<()> {
        instructions::initialize_factory::handler(ctx)
    }

    /// Create a new uninitialized adapter instance and return its address
    pub fn create_instance(ctx: Context<CreateInstance>) -> Result<Pubkey> {
        instructions::create_instance::handler(ctx)
    }

    /// Bind an instance to its external vault
    ///
    /// Security considerations:
    /// - One-shot: fails with AlreadyInitialized on any later call
    /// - Vault must parse as a vault account and match the supplied mints
    /// - Caller becomes owner
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Deposit tokens and credit the resulting shares to `holder`
    ///
    /// Security considerations:
    /// - Shares priced from vault state read before the deposit
    /// - Checked math for share conversion and minting
    /// - Emits event for tracking
    pub fn supply_token_to(ctx: Context<SupplyTokenTo>, amount: u64, holder: Pubkey) -> Result<()> {
        instructions::supply_token_to::handler(ctx, amount, holder)
    }

    /// Burn the caller's shares and return the tokens they were worth
    pub fn redeem_token(ctx: Context<RedeemToken>, shares: u64) -> Result<u64> {
        instructions::redeem_token::handler(ctx, shares)
    }

    /// Deposit tokens without minting shares
    pub fn sponsor(ctx: Context<Sponsor>, amount: u64) -> Result<()> {
        instructions::sponsor::handler(ctx, amount)
    }

    /// Token value of `holder`'s shares at the current vault rate
    pub fn balance_of_token(ctx: Context<BalanceOfToken>, holder: Pubkey) -> Result<u64> {
        instructions::balance_of_token::handler(ctx, holder)
    }

    /// Sweep a stray asset out of the adapter
    ///
    /// Security considerations:
    /// - Owner or operator only
    /// - The vault share token is always rejected
    pub fn transfer_incidental_asset(
        ctx: Context<TransferIncidentalAsset>,
        asset: Pubkey,
        amount: u64,
    ) -> Result<()> {
        instructions::transfer_incidental_asset::handler(ctx, asset, amount)
    }

    /// Owner-only: replace or revoke the operator
    pub fn set_operator(ctx: Context<SetOperator>, operator: Pubkey) -> Result<()> {
        instructions::set_operator::handler(ctx, operator)
    }

    /// Owner-only: hand the owner role to `new_owner`
    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        instructions::transfer_ownership::handler(ctx, new_owner)
    }
}
