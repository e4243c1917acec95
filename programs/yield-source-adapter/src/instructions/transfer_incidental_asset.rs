use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Sweep an asset that was sent to the adapter by mistake
///
/// Owner or operator only. The external vault's share token backs every
/// holder's claim and can never leave through this path.
#[derive(Accounts)]
pub struct TransferIncidentalAsset<'info> {
    /// Owner or operator
    pub caller: Signer<'info>,

    #[account(
        seeds = [YIELD_SOURCE_SEED, yield_source.factory.as_ref(), &yield_source.index.to_le_bytes()],
        bump = yield_source.bump,
        constraint = yield_source.initialized @ YieldSourceError::NotInitialized,
    )]
    pub yield_source: Account<'info, YieldSource>,

    /// Adapter authority PDA
    /// CHECK: PDA used as token authority, validated by seeds
    #[account(
        seeds = [YIELD_SOURCE_AUTHORITY_SEED, yield_source.key().as_ref()],
        bump = yield_source.authority_bump,
    )]
    pub yield_source_authority: UncheckedAccount<'info>,

    /// Adapter-held account of the stray asset (source)
    #[account(
        mut,
        constraint = source_token_account.owner == yield_source_authority.key() @ YieldSourceError::InvalidOwner,
    )]
    pub source_token_account: Account<'info, TokenAccount>,

    /// Recipient account (destination)
    #[account(mut)]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<TransferIncidentalAsset>, asset: Pubkey, amount: u64) -> Result<()> {
    // CHECKS: forbidden asset first, then role
    let yield_source = &ctx.accounts.yield_source;
    yield_source.check_incidental_transfer(&ctx.accounts.caller.key(), &asset)?;

    require_keys_eq!(
        ctx.accounts.source_token_account.mint,
        asset,
        YieldSourceError::InvalidMint
    );
    require_keys_eq!(
        ctx.accounts.recipient_token_account.mint,
        asset,
        YieldSourceError::InvalidMint
    );

    // INTERACTIONS
    let yield_source_key = yield_source.key();
    let authority_seeds: &[&[u8]] = &[
        YIELD_SOURCE_AUTHORITY_SEED,
        yield_source_key.as_ref(),
        &[yield_source.authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let transfer_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.source_token_account.to_account_info(),
            to: ctx.accounts.recipient_token_account.to_account_info(),
            authority: ctx.accounts.yield_source_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)?;

    emit!(TransferredIncidentalAsset {
        yield_source: yield_source_key,
        caller: ctx.accounts.caller.key(),
        asset,
        recipient: ctx.accounts.recipient_token_account.owner,
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
