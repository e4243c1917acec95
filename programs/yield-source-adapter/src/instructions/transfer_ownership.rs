use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Hand the owner role to another key
#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    /// Must be the current owner
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [YIELD_SOURCE_SEED, yield_source.factory.as_ref(), &yield_source.index.to_le_bytes()],
        bump = yield_source.bump,
        constraint = yield_source.initialized @ YieldSourceError::NotInitialized,
    )]
    pub yield_source: Account<'info, YieldSource>,
}

pub fn handler(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
    let yield_source = &mut ctx.accounts.yield_source;
    let previous_owner = yield_source.owner;

    yield_source.transfer_ownership(&ctx.accounts.owner.key(), new_owner)?;

    emit!(OwnershipTransferred {
        yield_source: yield_source.key(),
        previous_owner,
        new_owner,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
