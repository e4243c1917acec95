use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::{
    errors::*,
    events::*,
    vault::*,
};

/// Deposit tokens into the external vault without minting shares
///
/// The donation raises the token value of every existing share and cannot
/// be claimed back by the sponsor.
#[derive(Accounts)]
pub struct Sponsor<'info> {
    pub vault: VaultAccounts<'info>,

    /// Sponsor paying the tokens
    #[account(mut)]
    pub sponsor: Signer<'info>,

    /// Sponsor's deposit-asset account (source)
    #[account(
        mut,
        constraint = sponsor_token_account.mint == vault.yield_source.deposit_mint @ YieldSourceError::InvalidMint,
        constraint = sponsor_token_account.owner == sponsor.key() @ YieldSourceError::InvalidOwner,
    )]
    pub sponsor_token_account: Box<Account<'info, TokenAccount>>,
}

pub fn handler(ctx: Context<Sponsor>, amount: u64) -> Result<()> {
    if amount > 0 {
        let transfer_ctx = CpiContext::new(
            ctx.accounts.vault.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.sponsor_token_account.to_account_info(),
                to: ctx.accounts.vault.adapter_deposit_account.to_account_info(),
                authority: ctx.accounts.sponsor.to_account_info(),
            },
        );
        token::transfer(transfer_ctx, amount)?;
    }

    ctx.accounts.vault.deposit(amount)?;

    emit!(Sponsored {
        yield_source: ctx.accounts.vault.yield_source.key(),
        from: ctx.accounts.sponsor.key(),
        amount,
        total_shares: ctx.accounts.vault.yield_source.total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
