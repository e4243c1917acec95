use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::*,
    events::*,
    state::*,
    vault::*,
};

/// Deposit the caller's tokens into the external vault and credit shares to `holder`
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Depositor must sign the pull transfer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault accounts pinned to the initialized instance
/// ✅ 6. MATH SAFETY: Checked share conversion and minting
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Depositor account mint and owner checked
/// ✅ 8. BUSINESS LOGIC: Rate taken from the pre-deposit vault snapshot
#[derive(Accounts)]
#[instruction(amount: u64, holder: Pubkey)]
pub struct SupplyTokenTo<'info> {
    pub vault: VaultAccounts<'info>,

    /// Depositor paying the tokens
    #[account(mut)]
    pub depositor: Signer<'info>,

    /// Depositor's deposit-asset account (source)
    #[account(
        mut,
        constraint = depositor_token_account.mint == vault.yield_source.deposit_mint @ YieldSourceError::InvalidMint,
        constraint = depositor_token_account.owner == depositor.key() @ YieldSourceError::InvalidOwner,
    )]
    pub depositor_token_account: Box<Account<'info, TokenAccount>>,

    /// Holder's share balance, created on first deposit
    #[account(
        init_if_needed,
        payer = depositor,
        space = SHARE_BALANCE_SIZE,
        seeds = [SHARE_BALANCE_SEED, vault.yield_source.key().as_ref(), holder.as_ref()],
        bump
    )]
    pub share_balance: Account<'info, ShareBalance>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<SupplyTokenTo>, amount: u64, holder: Pubkey) -> Result<()> {
    // CHECKS: rate must come from the vault as it is before this deposit lands
    let snapshot = ctx.accounts.vault.snapshot()?;

    // EFFECTS: mint shares to the holder
    let yield_source_key = ctx.accounts.vault.yield_source.key();
    let share_balance = &mut ctx.accounts.share_balance;
    share_balance.bind(yield_source_key, holder, ctx.bumps.share_balance)?;

    let yield_source = &mut ctx.accounts.vault.yield_source;
    let shares_minted = yield_source.record_supply(share_balance, amount, &snapshot)?;
    let total_shares = yield_source.total_shares;

    // INTERACTIONS: pull tokens in, then push them into the vault
    if amount > 0 {
        let transfer_ctx = CpiContext::new(
            ctx.accounts.vault.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                to: ctx.accounts.vault.adapter_deposit_account.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        );
        token::transfer(transfer_ctx, amount)?;
    }

    ctx.accounts.vault.deposit(amount)?;

    emit!(SuppliedTokenTo {
        yield_source: yield_source_key,
        from: ctx.accounts.depositor.key(),
        holder,
        amount,
        shares_minted,
        total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
