use anchor_lang::prelude::*;

/// Event emitted when the factory is created
#[event]
pub struct FactoryInitialized {
    pub factory: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the factory creates a new instance
#[event]
pub struct InstanceCreated {
    pub factory: Pubkey,
    pub yield_source: Pubkey,
    pub index: u64,
    pub timestamp: i64,
}

/// Event emitted when an instance is bound to its external vault
#[event]
pub struct YieldSourceInitialized {
    pub yield_source: Pubkey,
    pub owner: Pubkey,
    pub external_vault: Pubkey,
    pub deposit_mint: Pubkey,
    pub vault_share_mint: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when tokens are supplied on behalf of a holder
#[event]
pub struct SuppliedTokenTo {
    pub yield_source: Pubkey,
    pub from: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when a holder redeems shares
#[event]
pub struct RedeemedToken {
    pub yield_source: Pubkey,
    pub holder: Pubkey,
    pub shares_burned: u64,
    pub amount: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when tokens are donated without minting shares
#[event]
pub struct Sponsored {
    pub yield_source: Pubkey,
    pub from: Pubkey,
    pub amount: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when a stray asset is swept out of the adapter
#[event]
pub struct TransferredIncidentalAsset {
    pub yield_source: Pubkey,
    pub caller: Pubkey,
    pub asset: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct OperatorSet {
    pub yield_source: Pubkey,
    pub previous_operator: Pubkey,
    pub new_operator: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct OwnershipTransferred {
    pub yield_source: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
    pub timestamp: i64,
}
