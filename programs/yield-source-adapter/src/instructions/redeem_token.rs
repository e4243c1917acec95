use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::*,
    events::*,
    state::*,
    vault::*,
};

/// Redeem the caller's own shares for tokens
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Only the holder can burn their shares
/// ✅ 6. MATH SAFETY: Tokens priced at the pre-redemption rate, rounded down
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Destination mint checked
/// ✅ 8. BUSINESS LOGIC: Burn fails with InsufficientBalance before any transfer,
///       and the payout is what the vault delivered, never stray adapter funds
#[derive(Accounts)]
pub struct RedeemToken<'info> {
    pub vault: VaultAccounts<'info>,

    /// Holder redeeming shares
    #[account(mut)]
    pub redeemer: Signer<'info>,

    /// Redeemer's deposit-asset account (destination)
    #[account(
        mut,
        constraint = redeemer_token_account.mint == vault.yield_source.deposit_mint @ YieldSourceError::InvalidMint,
    )]
    pub redeemer_token_account: Box<Account<'info, TokenAccount>>,

    /// Redeemer's share balance
    /// Created empty when missing so that a zero balance fails as InsufficientBalance
    #[account(
        init_if_needed,
        payer = redeemer,
        space = SHARE_BALANCE_SIZE,
        seeds = [SHARE_BALANCE_SEED, vault.yield_source.key().as_ref(), redeemer.key().as_ref()],
        bump
    )]
    pub share_balance: Account<'info, ShareBalance>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RedeemToken>, shares: u64) -> Result<u64> {
    let snapshot = ctx.accounts.vault.snapshot()?;

    // EFFECTS: burn first, priced at the current rate
    let yield_source_key = ctx.accounts.vault.yield_source.key();
    let redeemer = ctx.accounts.redeemer.key();
    let share_balance = &mut ctx.accounts.share_balance;
    share_balance.bind(yield_source_key, redeemer, ctx.bumps.share_balance)?;

    let yield_source = &mut ctx.accounts.vault.yield_source;
    let requested = yield_source.record_redeem(share_balance, shares, &snapshot)?;
    let total_shares = yield_source.total_shares;
    let authority_bump = yield_source.authority_bump;

    // INTERACTIONS: pay out only what the vault actually delivered
    let amount = ctx.accounts.vault.withdraw(requested)?;

    if amount > 0 {
        let authority_seeds: &[&[u8]] = &[
            YIELD_SOURCE_AUTHORITY_SEED,
            yield_source_key.as_ref(),
            &[authority_bump],
        ];
        let signer_seeds = &[&authority_seeds[..]];

        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.vault.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.adapter_deposit_account.to_account_info(),
                to: ctx.accounts.redeemer_token_account.to_account_info(),
                authority: ctx.accounts.vault.yield_source_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, amount)?;
    }

    emit!(RedeemedToken {
        yield_source: yield_source_key,
        holder: redeemer,
        shares_burned: shares,
        amount,
        total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(amount)
}
