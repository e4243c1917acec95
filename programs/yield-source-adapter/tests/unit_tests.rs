/// Access control, instance lifecycle and account layout tests
///
/// Security coverage:
///  Owner / operator separation
///  One-shot initialization
///  Vault share token sweep protection
///  PDA uniqueness per instance
///  Account sizes
use anchor_lang::prelude::*;
use yield_source_adapter::{
    constants::*,
    errors::YieldSourceError,
    state::{InitializeParams, ShareBalance, YieldSource, YieldSourceFactory},
    vault::ExternalVaultState,
};

fn expect_error<T: std::fmt::Debug>(result: Result<T>, expected: YieldSourceError) {
    assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
}

fn vault_state() -> ExternalVaultState {
    ExternalVaultState {
        authority: Pubkey::new_unique(),
        asset_mint: Pubkey::new_unique(),
        share_mint: Pubkey::new_unique(),
        total_assets: 0,
        total_shares: 0,
    }
}

fn initialized_source(owner: Pubkey) -> (YieldSource, ExternalVaultState) {
    let vault = vault_state();
    let mut source = YieldSource::new_instance(Pubkey::new_unique(), 0, 255);
    source
        .initialize(
            InitializeParams {
                owner,
                external_vault: Pubkey::new_unique(),
                external_vault_program: Pubkey::new_unique(),
                authority_bump: 255,
            },
            &vault,
        )
        .unwrap();
    (source, vault)
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn test_new_instance_is_uninitialized() {
    let source = YieldSource::new_instance(Pubkey::new_unique(), 7, 250);

    assert!(!source.initialized);
    assert_eq!(source.index, 7);
    assert_eq!(source.total_shares, 0);
    expect_error(source.require_initialized(), YieldSourceError::NotInitialized);
}

#[test]
fn test_privileged_calls_fail_before_initialization() {
    let mut source = YieldSource::new_instance(Pubkey::new_unique(), 0, 255);
    let anyone = Pubkey::new_unique();

    // The default owner key must not pass as an owner either
    expect_error(
        source.set_operator(&Pubkey::default(), anyone),
        YieldSourceError::NotInitialized,
    );
    expect_error(
        source.check_incidental_transfer(&anyone, &Pubkey::new_unique()),
        YieldSourceError::NotInitialized,
    );
    assert!(!source.is_owner(&Pubkey::default()));
}

#[test]
fn test_second_initialize_fails_with_any_arguments() {
    let owner = Pubkey::new_unique();
    let (mut source, vault) = initialized_source(owner);

    for candidate in [Pubkey::new_unique(), Pubkey::default()] {
        let result = source.initialize(
            InitializeParams {
                owner: Pubkey::new_unique(),
                external_vault: candidate,
                external_vault_program: Pubkey::new_unique(),
                authority_bump: 1,
            },
            &vault,
        );
        expect_error(result, YieldSourceError::AlreadyInitialized);
    }
    assert_eq!(source.owner, owner);
}

#[test]
fn test_initialize_rejects_vault_without_mints() {
    let mut source = YieldSource::new_instance(Pubkey::new_unique(), 0, 255);
    let mut vault = vault_state();
    vault.share_mint = Pubkey::default();

    let result = source.initialize(
        InitializeParams {
            owner: Pubkey::new_unique(),
            external_vault: Pubkey::new_unique(),
            external_vault_program: Pubkey::new_unique(),
            authority_bump: 255,
        },
        &vault,
    );
    expect_error(result, YieldSourceError::InvalidVault);
    assert!(!source.initialized);
}

// =============================================================================
// ACCESS CONTROL
// =============================================================================

#[test]
fn test_only_owner_sets_operator() {
    let owner = Pubkey::new_unique();
    let operator = Pubkey::new_unique();
    let stranger = Pubkey::new_unique();
    let (mut source, _) = initialized_source(owner);

    expect_error(
        source.set_operator(&stranger, stranger),
        YieldSourceError::Unauthorized,
    );

    source.set_operator(&owner, operator).unwrap();
    assert_eq!(source.operator, operator);

    // Operator cannot appoint a replacement
    expect_error(
        source.set_operator(&operator, stranger),
        YieldSourceError::Unauthorized,
    );
}

#[test]
fn test_owner_and_operator_can_sweep_stray_assets() {
    let owner = Pubkey::new_unique();
    let operator = Pubkey::new_unique();
    let stray = Pubkey::new_unique();
    let (mut source, _) = initialized_source(owner);

    source.check_incidental_transfer(&owner, &stray).unwrap();

    expect_error(
        source.check_incidental_transfer(&operator, &stray),
        YieldSourceError::Unauthorized,
    );
    source.set_operator(&owner, operator).unwrap();
    source.check_incidental_transfer(&operator, &stray).unwrap();

    source.set_operator(&owner, Pubkey::default()).unwrap();
    expect_error(
        source.check_incidental_transfer(&operator, &stray),
        YieldSourceError::Unauthorized,
    );
}

#[test]
fn test_vault_share_token_sweep_forbidden_for_everyone() {
    let owner = Pubkey::new_unique();
    let operator = Pubkey::new_unique();
    let stranger = Pubkey::new_unique();
    let (mut source, vault) = initialized_source(owner);
    source.set_operator(&owner, operator).unwrap();

    for caller in [owner, operator, stranger] {
        expect_error(
            source.check_incidental_transfer(&caller, &vault.share_mint),
            YieldSourceError::ForbiddenAsset,
        );
    }
}

#[test]
fn test_deposit_asset_is_sweepable() {
    let owner = Pubkey::new_unique();
    let (source, vault) = initialized_source(owner);

    source.check_incidental_transfer(&owner, &vault.asset_mint).unwrap();
}

#[test]
fn test_transfer_ownership() {
    let owner = Pubkey::new_unique();
    let next_owner = Pubkey::new_unique();
    let (mut source, _) = initialized_source(owner);

    expect_error(
        source.transfer_ownership(&next_owner, next_owner),
        YieldSourceError::Unauthorized,
    );
    expect_error(
        source.transfer_ownership(&owner, Pubkey::default()),
        YieldSourceError::InvalidOwnerAddress,
    );

    source.transfer_ownership(&owner, next_owner).unwrap();
    assert!(source.is_owner(&next_owner));
    assert!(!source.is_owner(&owner));
    expect_error(
        source.set_operator(&owner, owner),
        YieldSourceError::Unauthorized,
    );
}

// =============================================================================
// PDA DERIVATION
// =============================================================================

#[test]
fn test_instance_pdas_are_unique_per_index() {
    let program_id = yield_source_adapter::id();
    let (factory, _) = Pubkey::find_program_address(&[FACTORY_SEED], &program_id);

    let (first, _) = Pubkey::find_program_address(
        &[YIELD_SOURCE_SEED, factory.as_ref(), &0u64.to_le_bytes()],
        &program_id,
    );
    let (second, _) = Pubkey::find_program_address(
        &[YIELD_SOURCE_SEED, factory.as_ref(), &1u64.to_le_bytes()],
        &program_id,
    );
    assert_ne!(first, second, "Each instance gets its own storage");

    let (first_authority, _) = Pubkey::find_program_address(
        &[YIELD_SOURCE_AUTHORITY_SEED, first.as_ref()],
        &program_id,
    );
    let (second_authority, _) = Pubkey::find_program_address(
        &[YIELD_SOURCE_AUTHORITY_SEED, second.as_ref()],
        &program_id,
    );
    assert_ne!(first_authority, second_authority);
}

#[test]
fn test_share_balance_pdas_are_scoped_to_instance() {
    let program_id = yield_source_adapter::id();
    let holder = Pubkey::new_unique();
    let first = Pubkey::new_unique();
    let second = Pubkey::new_unique();

    let (a, _) = Pubkey::find_program_address(
        &[SHARE_BALANCE_SEED, first.as_ref(), holder.as_ref()],
        &program_id,
    );
    let (b, _) = Pubkey::find_program_address(
        &[SHARE_BALANCE_SEED, second.as_ref(), holder.as_ref()],
        &program_id,
    );
    assert_ne!(a, b, "Same holder in two instances has two balances");
}

#[test]
fn test_instances_keep_independent_ledgers() {
    let (mut first, _) = initialized_source(Pubkey::new_unique());
    let (second, _) = initialized_source(Pubkey::new_unique());
    let mut balance = ShareBalance {
        yield_source: Pubkey::new_unique(),
        holder: Pubkey::new_unique(),
        shares: 0,
        bump: 0,
    };

    first.mint_shares(&mut balance, 42).unwrap();

    assert_eq!(first.total_shares, 42);
    assert_eq!(second.total_shares, 0);
}

// =============================================================================
// ACCOUNT SIZES
// =============================================================================

#[test]
fn test_account_sizes_fit_serialized_state() {
    let mut data = Vec::new();
    YieldSource::new_instance(Pubkey::new_unique(), u64::MAX, 255)
        .serialize(&mut data)
        .unwrap();
    assert_eq!(8 + data.len(), YIELD_SOURCE_SIZE);

    let mut data = Vec::new();
    YieldSourceFactory {
        authority: Pubkey::new_unique(),
        instance_count: 0,
        bump: 0,
        _reserved: [0; 64],
    }
    .serialize(&mut data)
    .unwrap();
    assert_eq!(8 + data.len(), FACTORY_SIZE);

    let mut data = Vec::new();
    ShareBalance {
        yield_source: Pubkey::new_unique(),
        holder: Pubkey::new_unique(),
        shares: 0,
        bump: 0,
    }
    .serialize(&mut data)
    .unwrap();
    assert_eq!(8 + data.len(), SHARE_BALANCE_SIZE);
}
