use anchor_lang::prelude::*;

use crate::{constants::*, errors::YieldSourceError, vault::ExternalVaultState};

/// Factory that hands out adapter instances
///
/// Every instance shares this program's logic but lives in its own
/// `YieldSource` account, addressed by the factory key and a running index.
#[account]
pub struct YieldSourceFactory {
    /// Account that created the factory
    pub authority: Pubkey,          // 32 bytes

    /// Number of instances created so far (also the next instance index)
    pub instance_count: u64,        // 8 bytes

    /// Bump seed for factory PDA
    pub bump: u8,                   // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 64],        // 64 bytes
}

impl YieldSourceFactory {
    /// Reserve the next instance index
    pub fn next_instance(&mut self) -> Result<u64> {
        let index = self.instance_count;
        self.instance_count = self
            .instance_count
            .checked_add(1)
            .ok_or(error!(YieldSourceError::ArithmeticOverflow))?;
        Ok(index)
    }
}

/// One adapter instance
///
/// Created `Uninitialized` by the factory and moved to `Initialized` exactly
/// once. Roles, the external vault binding and the share total live here;
/// per-holder balances live in `ShareBalance` accounts.
#[account]
pub struct YieldSource {
    /// Factory that created this instance
    pub factory: Pubkey,                // 32 bytes

    /// Index of this instance within the factory
    pub index: u64,                     // 8 bytes

    /// Set once by `initialize`
    pub initialized: bool,              // 1 byte

    /// Primary authority
    pub owner: Pubkey,                  // 32 bytes

    /// Optional delegate, `Pubkey::default()` when unset
    pub operator: Pubkey,               // 32 bytes

    /// External vault state account
    pub external_vault: Pubkey,         // 32 bytes

    /// Program that owns the external vault state account
    pub external_vault_program: Pubkey, // 32 bytes

    /// Asset deposited into the external vault
    pub deposit_mint: Pubkey,           // 32 bytes

    /// Share token of the external vault (never sweepable)
    pub vault_share_mint: Pubkey,       // 32 bytes

    /// Adapter shares outstanding across all holders
    pub total_shares: u64,              // 8 bytes

    /// Bump seed for yield source PDA
    pub bump: u8,                       // 1 byte

    /// Bump seed for yield source authority PDA
    pub authority_bump: u8,             // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 128],           // 128 bytes
}

/// Per-holder entry of the share ledger
#[account]
pub struct ShareBalance {
    /// Yield source this balance belongs to
    pub yield_source: Pubkey,       // 32 bytes

    /// Holder owning the shares
    pub holder: Pubkey,             // 32 bytes

    /// Adapter shares held
    pub shares: u64,                // 8 bytes

    /// Bump seed for PDA
    pub bump: u8,                   // 1 byte
}

impl ShareBalance {
    /// Bind a freshly created balance account to its yield source and holder,
    /// or check that an existing one already belongs to them
    pub fn bind(&mut self, yield_source: Pubkey, holder: Pubkey, bump: u8) -> Result<()> {
        if self.yield_source == Pubkey::default() {
            self.yield_source = yield_source;
            self.holder = holder;
            self.shares = 0;
            self.bump = bump;
            return Ok(());
        }
        require_keys_eq!(self.yield_source, yield_source, YieldSourceError::InvalidOwner);
        require_keys_eq!(self.holder, holder, YieldSourceError::InvalidOwner);
        Ok(())
    }
}

/// Parameters recorded when an instance is initialized
pub struct InitializeParams {
    pub owner: Pubkey,
    pub external_vault: Pubkey,
    pub external_vault_program: Pubkey,
    pub authority_bump: u8,
}

impl YieldSource {
    /// Fresh, uninitialized instance as produced by the factory
    pub fn new_instance(factory: Pubkey, index: u64, bump: u8) -> Self {
        Self {
            factory,
            index,
            initialized: false,
            owner: Pubkey::default(),
            operator: Pubkey::default(),
            external_vault: Pubkey::default(),
            external_vault_program: Pubkey::default(),
            deposit_mint: Pubkey::default(),
            vault_share_mint: Pubkey::default(),
            total_shares: 0,
            bump,
            authority_bump: 0,
            _reserved: [0; 128],
        }
    }

    /// One-shot transition from `Uninitialized` to `Initialized`
    ///
    /// Fails with `AlreadyInitialized` on any second call regardless of
    /// arguments, and with `InvalidVault` for a null vault address.
    pub fn initialize(&mut self, params: InitializeParams, vault: &ExternalVaultState) -> Result<()> {
        require!(!self.initialized, YieldSourceError::AlreadyInitialized);
        require!(
            params.external_vault != Pubkey::default(),
            YieldSourceError::InvalidVault
        );
        require!(
            vault.asset_mint != Pubkey::default() && vault.share_mint != Pubkey::default(),
            YieldSourceError::InvalidVault
        );

        self.initialized = true;
        self.owner = params.owner;
        self.operator = Pubkey::default();
        self.external_vault = params.external_vault;
        self.external_vault_program = params.external_vault_program;
        self.deposit_mint = vault.asset_mint;
        self.vault_share_mint = vault.share_mint;
        self.total_shares = 0;
        self.authority_bump = params.authority_bump;
        Ok(())
    }

    pub fn require_initialized(&self) -> Result<()> {
        require!(self.initialized, YieldSourceError::NotInitialized);
        Ok(())
    }

    pub fn is_owner(&self, caller: &Pubkey) -> bool {
        self.initialized && self.owner == *caller
    }

    /// Operator only counts while set to a non-null key
    pub fn is_owner_or_operator(&self, caller: &Pubkey) -> bool {
        self.is_owner(caller)
            || (self.initialized && self.operator != Pubkey::default() && self.operator == *caller)
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        self.require_initialized()?;
        require!(self.is_owner(caller), YieldSourceError::Unauthorized);
        Ok(())
    }

    pub fn require_owner_or_operator(&self, caller: &Pubkey) -> Result<()> {
        self.require_initialized()?;
        require!(
            self.is_owner_or_operator(caller),
            YieldSourceError::Unauthorized
        );
        Ok(())
    }

    /// Replace the operator; `Pubkey::default()` revokes it
    pub fn set_operator(&mut self, caller: &Pubkey, operator: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        self.operator = operator;
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        require!(
            new_owner != Pubkey::default(),
            YieldSourceError::InvalidOwnerAddress
        );
        self.owner = new_owner;
        Ok(())
    }

    /// Guard for sweeping a stray asset out of the adapter
    ///
    /// The vault share mint is rejected before the caller is even looked at.
    pub fn check_incidental_transfer(&self, caller: &Pubkey, asset: &Pubkey) -> Result<()> {
        self.require_initialized()?;
        require!(
            *asset != self.vault_share_mint,
            YieldSourceError::ForbiddenAsset
        );
        require!(
            self.is_owner_or_operator(caller),
            YieldSourceError::Unauthorized
        );
        Ok(())
    }

    /// Signer seeds for the yield source authority PDA
    pub fn authority_seeds<'a>(&self, yield_source: &'a Pubkey, bump: &'a [u8; 1]) -> [&'a [u8]; 3] {
        [YIELD_SOURCE_AUTHORITY_SEED, yield_source.as_ref(), bump]
    }
}
