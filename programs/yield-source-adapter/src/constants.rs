// Constants for the Yield Source Adapter program

/// Seed for the factory singleton PDA
pub const FACTORY_SEED: &[u8] = b"factory";

/// Seed for adapter instance PDAs (followed by factory key and instance index)
pub const YIELD_SOURCE_SEED: &[u8] = b"yield_source";

/// Seed for the adapter authority PDA that owns the adapter token accounts
pub const YIELD_SOURCE_AUTHORITY_SEED: &[u8] = b"yield_source_authority";

/// Seed for per-holder share balance PDAs
pub const SHARE_BALANCE_SEED: &[u8] = b"share_balance";

/// Allowance value treated as unlimited by the approve-to-exact-amount pattern
pub const MAX_ALLOWANCE: u64 = u64::MAX;

/// Space for YieldSourceFactory (8 discriminator + 32 authority +
/// 8 instance_count + 1 bump + 64 padding)
pub const FACTORY_SIZE: usize = 8 + 32 + 8 + 1 + 64;

/// Space for YieldSource (8 discriminator + 32 factory + 8 index + 1 initialized +
/// 32 owner + 32 operator + 32 external_vault + 32 external_vault_program +
/// 32 deposit_mint + 32 vault_share_mint + 8 total_shares + 1 bump +
/// 1 authority_bump + 128 padding)
pub const YIELD_SOURCE_SIZE: usize =
    8 + 32 + 8 + 1 + 32 + 32 + 32 + 32 + 32 + 32 + 8 + 1 + 1 + 128;

/// Space for ShareBalance (8 discriminator + 32 yield_source + 32 holder +
/// 8 shares + 1 bump)
pub const SHARE_BALANCE_SIZE: usize = 8 + 32 + 32 + 8 + 1;
