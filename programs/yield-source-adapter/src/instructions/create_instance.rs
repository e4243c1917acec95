use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

/// Create a new, uninitialized adapter instance
///
/// Anyone may call this. The instance gets its own storage at
/// `[YIELD_SOURCE_SEED, factory, index]` and stays `Uninitialized` until
/// `initialize` binds it to an external vault.
#[derive(Accounts)]
pub struct CreateInstance<'info> {
    /// Pays rent for the new instance
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Factory PDA
    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, YieldSourceFactory>,

    /// New instance, addressed by the factory's next index
    #[account(
        init,
        payer = payer,
        space = YIELD_SOURCE_SIZE,
        seeds = [YIELD_SOURCE_SEED, factory.key().as_ref(), &factory.instance_count.to_le_bytes()],
        bump
    )]
    pub yield_source: Account<'info, YieldSource>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateInstance>) -> Result<Pubkey> {
    let factory = &mut ctx.accounts.factory;
    let index = factory.next_instance()?;

    let yield_source = &mut ctx.accounts.yield_source;
    yield_source.set_inner(YieldSource::new_instance(
        factory.key(),
        index,
        ctx.bumps.yield_source,
    ));

    emit!(InstanceCreated {
        factory: factory.key(),
        yield_source: yield_source.key(),
        index,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(yield_source.key())
}
