use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
    program_option::COption,
};
use solana_sha256_hasher::hash;
use anchor_spl::token::{self, Approve, Mint, Revoke, Token, TokenAccount};

use crate::{constants::*, errors::YieldSourceError, state::YieldSource};

/// Narrow view of the external vault used by the adapter
///
/// Asset movement goes through `deposit`/`withdraw`, both in deposit-asset
/// units. Reads are gathered into a `VaultSnapshot`. `withdraw` returns what
/// actually arrived in the adapter, which can be less than requested.
pub trait ExternalVault {
    fn snapshot(&self) -> Result<VaultSnapshot>;
    fn deposit(&self, amount: u64) -> Result<()>;
    fn withdraw(&mut self, amount: u64) -> Result<u64>;
}

/// External vault state as laid out by the vault program
///
/// 8-byte Anchor discriminator for `VaultState`, then the fields below. Any
/// trailing data (bumps, padding) is ignored.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ExternalVaultState {
    pub authority: Pubkey,
    pub asset_mint: Pubkey,
    pub share_mint: Pubkey,
    pub total_assets: u64,
    pub total_shares: u64,
}

impl ExternalVaultState {
    pub fn discriminator() -> [u8; 8] {
        sighash("account", "VaultState")
    }

    /// Parse raw account data; anything that does not look like a vault is `InvalidVault`
    pub fn try_from_data(data: &[u8]) -> Result<Self> {
        require!(data.len() > 8, YieldSourceError::InvalidVault);
        require!(
            data[..8] == Self::discriminator(),
            YieldSourceError::InvalidVault
        );
        let mut body = &data[8..];
        Self::deserialize(&mut body).map_err(|_| error!(YieldSourceError::InvalidVault))
    }

    /// Load from an account, checking the owning program when one is expected
    pub fn load(info: &AccountInfo, expected_program: Option<&Pubkey>) -> Result<Self> {
        require!(
            *info.key != Pubkey::default(),
            YieldSourceError::InvalidVault
        );
        if let Some(program) = expected_program {
            require_keys_eq!(*info.owner, *program, YieldSourceError::InvalidVault);
        }
        let data = info.try_borrow_data()?;
        Self::try_from_data(&data)
    }
}

/// Vault figures read at one point in time
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VaultSnapshot {
    /// Deposit asset held by the whole vault
    pub total_balance: u64,

    /// Vault shares outstanding across all vault depositors
    pub total_share_supply: u64,

    /// Vault shares held by this adapter
    pub adapter_vault_shares: u64,
}

impl VaultSnapshot {
    pub fn new(vault: &ExternalVaultState, adapter_vault_shares: u64) -> Self {
        Self {
            total_balance: vault.total_assets,
            total_share_supply: vault.total_shares,
            adapter_vault_shares,
        }
    }

    /// Deposit asset the adapter could withdraw, at the vault's price per share
    pub fn attributable_balance(&self) -> Result<u64> {
        if self.total_share_supply == 0 {
            return Ok(0);
        }
        let value = (self.adapter_vault_shares as u128)
            .checked_mul(self.total_balance as u128)
            .ok_or(error!(YieldSourceError::ArithmeticOverflow))?
            / (self.total_share_supply as u128);
        u64::try_from(value).map_err(|_| error!(YieldSourceError::ArithmeticOverflow))
    }
}

/// What to do with the vault's allowance before a deposit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllowancePlan {
    Sufficient,
    Approve,
    ResetThenApprove,
}

impl AllowancePlan {
    /// Approve-to-exact-amount; a nonzero short allowance is reset first
    pub fn for_deposit(current: u64, needed: u64) -> Self {
        if current == MAX_ALLOWANCE || current >= needed {
            AllowancePlan::Sufficient
        } else if current == 0 {
            AllowancePlan::Approve
        } else {
            AllowancePlan::ResetThenApprove
        }
    }

    pub fn resets_first(&self) -> bool {
        matches!(self, AllowancePlan::ResetThenApprove)
    }

    pub fn approves(&self) -> bool {
        !matches!(self, AllowancePlan::Sufficient)
    }
}

/// Allowance a token account grants `spender` given its delegate fields
pub fn allowance_for(delegate: &COption<Pubkey>, delegated_amount: u64, spender: &Pubkey) -> u64 {
    match delegate {
        COption::Some(delegate) if delegate == spender => delegated_amount,
        _ => 0,
    }
}

/// Allowance granted to `spender` on a token account
pub fn current_allowance(account: &TokenAccount, spender: &Pubkey) -> u64 {
    allowance_for(&account.delegate, account.delegated_amount, spender)
}

/// Tokens that arrived in an account between two balance reads
pub fn received_amount(before: u64, after: u64) -> Result<u64> {
    after
        .checked_sub(before)
        .ok_or(error!(YieldSourceError::ExternalCallFailure))
}

/// Anchor-style 8-byte selector for `namespace:name`
pub fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{}:{}", namespace, name);
    let mut selector = [0u8; 8];
    selector.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    selector
}

pub fn vault_instruction_data(name: &str, amount: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(16);
    data.extend_from_slice(&sighash("global", name));
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

/// Accounts needed to talk to the external vault on behalf of an instance
///
/// Shared by every instruction that moves assets through the vault.
#[derive(Accounts)]
pub struct VaultAccounts<'info> {
    /// Adapter instance
    /// Security: Must be initialized, all vault accounts are pinned to it
    #[account(
        mut,
        seeds = [YIELD_SOURCE_SEED, yield_source.factory.as_ref(), &yield_source.index.to_le_bytes()],
        bump = yield_source.bump,
        constraint = yield_source.initialized @ YieldSourceError::NotInitialized,
    )]
    pub yield_source: Box<Account<'info, YieldSource>>,

    /// Adapter authority PDA
    /// CHECK: PDA used as token authority and CPI signer, validated by seeds
    #[account(
        seeds = [YIELD_SOURCE_AUTHORITY_SEED, yield_source.key().as_ref()],
        bump = yield_source.authority_bump,
    )]
    pub yield_source_authority: UncheckedAccount<'info>,

    /// External vault state
    /// CHECK: Pinned to the recorded vault, parsed by `ExternalVaultState::load`
    #[account(
        mut,
        address = yield_source.external_vault @ YieldSourceError::InvalidVault,
    )]
    pub external_vault: UncheckedAccount<'info>,

    /// External vault program
    /// CHECK: Pinned to the program that owned the vault at initialization
    #[account(
        executable,
        address = yield_source.external_vault_program @ YieldSourceError::InvalidVault,
    )]
    pub external_vault_program: UncheckedAccount<'info>,

    /// Vault account that pulls delegated deposits
    /// CHECK: Validated by the external vault program
    pub vault_spender: UncheckedAccount<'info>,

    /// Vault reserve holding the deposit asset
    /// CHECK: Validated by the external vault program
    #[account(mut)]
    pub vault_reserve: UncheckedAccount<'info>,

    /// External vault share mint
    #[account(
        mut,
        address = yield_source.vault_share_mint @ YieldSourceError::InvalidMint,
    )]
    pub vault_share_mint: Box<Account<'info, Mint>>,

    /// Adapter account for the deposit asset
    #[account(
        mut,
        constraint = adapter_deposit_account.mint == yield_source.deposit_mint @ YieldSourceError::InvalidMint,
        constraint = adapter_deposit_account.owner == yield_source_authority.key() @ YieldSourceError::InvalidOwner,
    )]
    pub adapter_deposit_account: Box<Account<'info, TokenAccount>>,

    /// Adapter account for vault shares
    #[account(
        mut,
        constraint = adapter_share_account.mint == yield_source.vault_share_mint @ YieldSourceError::InvalidMint,
        constraint = adapter_share_account.owner == yield_source_authority.key() @ YieldSourceError::InvalidOwner,
    )]
    pub adapter_share_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> VaultAccounts<'info> {
    fn invoke_vault(&self, name: &str, amount: u64) -> Result<()> {
        let yield_source_key = self.yield_source.key();
        let bump = [self.yield_source.authority_bump];
        let seeds = self.yield_source.authority_seeds(&yield_source_key, &bump);

        let ix = Instruction {
            program_id: self.external_vault_program.key(),
            accounts: vec![
                AccountMeta::new(self.external_vault.key(), false),
                AccountMeta::new_readonly(self.yield_source_authority.key(), true),
                AccountMeta::new(self.adapter_deposit_account.key(), false),
                AccountMeta::new(self.adapter_share_account.key(), false),
                AccountMeta::new_readonly(self.vault_spender.key(), false),
                AccountMeta::new(self.vault_reserve.key(), false),
                AccountMeta::new(self.vault_share_mint.key(), false),
                AccountMeta::new_readonly(self.token_program.key(), false),
            ],
            data: vault_instruction_data(name, amount),
        };

        invoke_signed(
            &ix,
            &[
                self.external_vault.to_account_info(),
                self.yield_source_authority.to_account_info(),
                self.adapter_deposit_account.to_account_info(),
                self.adapter_share_account.to_account_info(),
                self.vault_spender.to_account_info(),
                self.vault_reserve.to_account_info(),
                self.vault_share_mint.to_account_info(),
                self.token_program.to_account_info(),
                self.external_vault_program.to_account_info(),
            ],
            &[&seeds[..]],
        )
        .map_err(|err| {
            msg!("external vault {} of {} failed: {:?}", name, amount, err);
            error!(YieldSourceError::ExternalCallFailure)
        })
    }

    fn approve_vault(&self, amount: u64) -> Result<()> {
        let yield_source_key = self.yield_source.key();
        let bump = [self.yield_source.authority_bump];
        let seeds = self.yield_source.authority_seeds(&yield_source_key, &bump);
        let signer_seeds = &[&seeds[..]];

        let current = current_allowance(&self.adapter_deposit_account, &self.vault_spender.key());
        let plan = AllowancePlan::for_deposit(current, amount);
        if !plan.approves() {
            return Ok(());
        }
        if plan.resets_first() {
            let revoke_ctx = CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Revoke {
                    source: self.adapter_deposit_account.to_account_info(),
                    authority: self.yield_source_authority.to_account_info(),
                },
                signer_seeds,
            );
            token::revoke(revoke_ctx)?;
        }

        let approve_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            Approve {
                to: self.adapter_deposit_account.to_account_info(),
                delegate: self.vault_spender.to_account_info(),
                authority: self.yield_source_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::approve(approve_ctx, amount)
    }
}

impl<'info> ExternalVault for VaultAccounts<'info> {
    fn snapshot(&self) -> Result<VaultSnapshot> {
        let vault = ExternalVaultState::load(
            &self.external_vault.to_account_info(),
            Some(&self.yield_source.external_vault_program),
        )?;
        Ok(VaultSnapshot::new(&vault, self.adapter_share_account.amount))
    }

    fn deposit(&self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        self.approve_vault(amount)?;
        self.invoke_vault("deposit", amount)
    }

    fn withdraw(&mut self, amount: u64) -> Result<u64> {
        if amount == 0 {
            return Ok(0);
        }
        let before = self.adapter_deposit_account.amount;
        self.invoke_vault("withdraw", amount)?;
        self.adapter_deposit_account.reload()?;
        received_amount(before, self.adapter_deposit_account.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(state: &ExternalVaultState) -> Vec<u8> {
        let mut data = ExternalVaultState::discriminator().to_vec();
        state.serialize(&mut data).unwrap();
        // trailing bumps and padding
        data.extend_from_slice(&[0u8; 131]);
        data
    }

    fn sample_state() -> ExternalVaultState {
        ExternalVaultState {
            authority: Pubkey::new_unique(),
            asset_mint: Pubkey::new_unique(),
            share_mint: Pubkey::new_unique(),
            total_assets: 2000,
            total_shares: 1000,
        }
    }

    #[test]
    fn test_parse_vault_state() {
        let state = sample_state();
        let parsed = ExternalVaultState::try_from_data(&encoded(&state)).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_parse_rejects_wrong_discriminator() {
        let mut data = encoded(&sample_state());
        data[0] ^= 0xff;
        assert!(ExternalVaultState::try_from_data(&data).is_err());
    }

    #[test]
    fn test_parse_rejects_short_data() {
        let data = encoded(&sample_state());
        assert!(ExternalVaultState::try_from_data(&data[..8]).is_err());
        assert!(ExternalVaultState::try_from_data(&data[..40]).is_err());
    }

    #[test]
    fn test_allowance_plan() {
        assert_eq!(AllowancePlan::for_deposit(0, 100), AllowancePlan::Approve);
        assert_eq!(AllowancePlan::for_deposit(50, 100), AllowancePlan::ResetThenApprove);
        assert_eq!(AllowancePlan::for_deposit(100, 100), AllowancePlan::Sufficient);
        assert_eq!(AllowancePlan::for_deposit(MAX_ALLOWANCE, 100), AllowancePlan::Sufficient);
    }

    /// Token that, like some vault assets, refuses a nonzero-to-nonzero approve
    struct StrictAllowance {
        current: u64,
    }

    impl StrictAllowance {
        fn apply(&mut self, plan: AllowancePlan, needed: u64) {
            if plan.resets_first() {
                self.current = 0;
            }
            if plan.approves() {
                assert_eq!(self.current, 0, "nonzero to nonzero approve");
                self.current = needed;
            }
        }
    }

    #[test]
    fn test_allowance_plan_reaches_exact_amount() {
        for (current, needed) in [(0, 100), (30, 100), (99, 100), (100, 100), (500, 100), (MAX_ALLOWANCE, 1)] {
            let mut token = StrictAllowance { current };
            token.apply(AllowancePlan::for_deposit(current, needed), needed);
            assert!(token.current >= needed);
            if current < needed {
                assert_eq!(token.current, needed, "approve is exact, never unlimited");
            }
        }
    }

    #[test]
    fn test_allowance_only_counts_vault_spender() {
        let spender = Pubkey::new_unique();
        assert_eq!(allowance_for(&COption::Some(spender), 70, &spender), 70);
        assert_eq!(allowance_for(&COption::Some(Pubkey::new_unique()), 70, &spender), 0);
        assert_eq!(allowance_for(&COption::None, 70, &spender), 0);

        // foreign delegate reads as 0, so the vault gets a plain approve
        let current = allowance_for(&COption::Some(Pubkey::new_unique()), 70, &spender);
        assert_eq!(AllowancePlan::for_deposit(current, 10), AllowancePlan::Approve);
    }

    #[test]
    fn test_received_amount() {
        assert_eq!(received_amount(300, 1300).unwrap(), 1000);
        assert_eq!(received_amount(300, 300).unwrap(), 0);
        let err = received_amount(300, 299).unwrap_err();
        assert_eq!(err, anchor_lang::error::Error::from(YieldSourceError::ExternalCallFailure));
    }

    #[test]
    fn test_attributable_balance() {
        let snapshot = VaultSnapshot {
            total_balance: 2000,
            total_share_supply: 1000,
            adapter_vault_shares: 300,
        };
        assert_eq!(snapshot.attributable_balance().unwrap(), 600);

        let empty = VaultSnapshot::default();
        assert_eq!(empty.attributable_balance().unwrap(), 0);
    }

    #[test]
    fn test_instruction_data_layout() {
        let data = vault_instruction_data("deposit", 42);
        assert_eq!(data.len(), 16);
        assert_eq!(&data[..8], &sighash("global", "deposit"));
        assert_eq!(&data[8..], &42u64.to_le_bytes());
        assert_ne!(sighash("global", "deposit"), sighash("global", "withdraw"));
    }
}
