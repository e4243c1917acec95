use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*, vault::ExternalVaultState};

/// Bind an instance to its external vault, exactly once
///
/// Callable by anyone; the caller becomes the owner.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Initializer, becomes owner
    #[account(mut)]
    pub initializer: Signer<'info>,

    /// Instance being initialized
    /// Security: rejected if already initialized
    #[account(
        mut,
        seeds = [YIELD_SOURCE_SEED, yield_source.factory.as_ref(), &yield_source.index.to_le_bytes()],
        bump = yield_source.bump,
        constraint = !yield_source.initialized @ YieldSourceError::AlreadyInitialized,
    )]
    pub yield_source: Account<'info, YieldSource>,

    /// Adapter authority PDA
    /// CHECK: PDA used as token authority, validated by seeds
    #[account(
        seeds = [YIELD_SOURCE_AUTHORITY_SEED, yield_source.key().as_ref()],
        bump
    )]
    pub yield_source_authority: UncheckedAccount<'info>,

    /// External vault state
    /// CHECK: Parsed and validated in the handler
    pub external_vault: UncheckedAccount<'info>,

    /// Deposit asset mint, must match the vault's asset mint
    pub deposit_mint: Box<Account<'info, Mint>>,

    /// Vault share mint, must match the vault's share mint
    pub vault_share_mint: Box<Account<'info, Mint>>,

    /// Adapter account for the deposit asset
    #[account(
        init_if_needed,
        payer = initializer,
        associated_token::mint = deposit_mint,
        associated_token::authority = yield_source_authority,
    )]
    pub adapter_deposit_account: Box<Account<'info, TokenAccount>>,

    /// Adapter account for vault shares
    #[account(
        init_if_needed,
        payer = initializer,
        associated_token::mint = vault_share_mint,
        associated_token::authority = yield_source_authority,
    )]
    pub adapter_share_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    // CHECKS: the vault must parse and agree with the supplied mints
    let vault_info = ctx.accounts.external_vault.to_account_info();
    let vault = ExternalVaultState::load(&vault_info, None)?;
    require_keys_eq!(
        vault.asset_mint,
        ctx.accounts.deposit_mint.key(),
        YieldSourceError::InvalidVault
    );
    require_keys_eq!(
        vault.share_mint,
        ctx.accounts.vault_share_mint.key(),
        YieldSourceError::InvalidVault
    );

    // EFFECTS
    let yield_source = &mut ctx.accounts.yield_source;
    yield_source.initialize(
        InitializeParams {
            owner: ctx.accounts.initializer.key(),
            external_vault: vault_info.key(),
            external_vault_program: *vault_info.owner,
            authority_bump: ctx.bumps.yield_source_authority,
        },
        &vault,
    )?;

    emit!(YieldSourceInitialized {
        yield_source: yield_source.key(),
        owner: yield_source.owner,
        external_vault: yield_source.external_vault,
        deposit_mint: yield_source.deposit_mint,
        vault_share_mint: yield_source.vault_share_mint,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
