use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

/// Create the factory singleton that hands out adapter instances
#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    /// Payer and recorded factory authority
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Factory PDA
    /// Security: `init` fails if the factory already exists
    #[account(
        init,
        payer = authority,
        space = FACTORY_SIZE,
        seeds = [FACTORY_SEED],
        bump
    )]
    pub factory: Account<'info, YieldSourceFactory>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeFactory>) -> Result<()> {
    let factory = &mut ctx.accounts.factory;

    factory.authority = ctx.accounts.authority.key();
    factory.instance_count = 0;
    factory.bump = ctx.bumps.factory;
    factory._reserved = [0; 64];

    emit!(FactoryInitialized {
        factory: factory.key(),
        authority: factory.authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
