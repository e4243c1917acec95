use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{
    constants::*,
    errors::*,
    state::*,
    vault::{ExternalVaultState, VaultSnapshot},
};

/// Read-only token value of a holder's shares
#[derive(Accounts)]
pub struct BalanceOfToken<'info> {
    #[account(
        seeds = [YIELD_SOURCE_SEED, yield_source.factory.as_ref(), &yield_source.index.to_le_bytes()],
        bump = yield_source.bump,
        constraint = yield_source.initialized @ YieldSourceError::NotInitialized,
    )]
    pub yield_source: Account<'info, YieldSource>,

    /// CHECK: Pinned to the recorded vault, parsed by `ExternalVaultState::load`
    #[account(address = yield_source.external_vault @ YieldSourceError::InvalidVault)]
    pub external_vault: UncheckedAccount<'info>,

    /// Adapter authority PDA
    /// CHECK: PDA owning the adapter token accounts, validated by seeds
    #[account(
        seeds = [YIELD_SOURCE_AUTHORITY_SEED, yield_source.key().as_ref()],
        bump = yield_source.authority_bump,
    )]
    pub yield_source_authority: UncheckedAccount<'info>,

    /// Adapter account for vault shares
    #[account(
        constraint = adapter_share_account.mint == yield_source.vault_share_mint @ YieldSourceError::InvalidMint,
        constraint = adapter_share_account.owner == yield_source_authority.key() @ YieldSourceError::InvalidOwner,
    )]
    pub adapter_share_account: Account<'info, TokenAccount>,

    /// Holder's balance; absent means zero shares
    pub share_balance: Option<Account<'info, ShareBalance>>,
}

pub fn handler(ctx: Context<BalanceOfToken>, holder: Pubkey) -> Result<u64> {
    let yield_source = &ctx.accounts.yield_source;

    let shares = match &ctx.accounts.share_balance {
        Some(balance) => {
            require_keys_eq!(balance.yield_source, yield_source.key(), YieldSourceError::InvalidOwner);
            require_keys_eq!(balance.holder, holder, YieldSourceError::InvalidOwner);
            balance.shares
        }
        None => 0,
    };

    let vault = ExternalVaultState::load(
        &ctx.accounts.external_vault.to_account_info(),
        Some(&yield_source.external_vault_program),
    )?;
    let snapshot = VaultSnapshot::new(&vault, ctx.accounts.adapter_share_account.amount);

    yield_source.shares_to_tokens(shares, &snapshot)
}
