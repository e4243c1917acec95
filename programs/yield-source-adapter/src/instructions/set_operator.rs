use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Replace the operator; passing `Pubkey::default()` revokes it
#[derive(Accounts)]
pub struct SetOperator<'info> {
    /// Must be the owner
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [YIELD_SOURCE_SEED, yield_source.factory.as_ref(), &yield_source.index.to_le_bytes()],
        bump = yield_source.bump,
        constraint = yield_source.initialized @ YieldSourceError::NotInitialized,
    )]
    pub yield_source: Account<'info, YieldSource>,
}

pub fn handler(ctx: Context<SetOperator>, operator: Pubkey) -> Result<()> {
    let yield_source = &mut ctx.accounts.yield_source;
    let previous_operator = yield_source.operator;

    yield_source.set_operator(&ctx.accounts.owner.key(), operator)?;

    emit!(OperatorSet {
        yield_source: yield_source.key(),
        previous_operator,
        new_operator: operator,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
