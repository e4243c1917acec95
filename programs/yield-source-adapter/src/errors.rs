use anchor_lang::prelude::*;

/// Custom error codes for the Yield Source Adapter program
#[error_code]
pub enum YieldSourceError {
    #[msg("Yield source has not been initialized")]
    NotInitialized,

    #[msg("Yield source is already initialized")]
    AlreadyInitialized,

    #[msg("External vault is null or does not expose the vault interface")]
    InvalidVault,

    #[msg("Unauthorized - caller lacks the required owner or operator role")]
    Unauthorized,

    #[msg("Share amount exceeds the holder's balance")]
    InsufficientBalance,

    #[msg("The external vault share token cannot be transferred out")]
    ForbiddenAsset,

    #[msg("Math overflow occurred during calculation")]
    ArithmeticOverflow,

    #[msg("External vault call failed")]
    ExternalCallFailure,

    #[msg("Cannot divide by zero - adapter holds no vault balance")]
    DivisionByZero,

    #[msg("Invalid token mint - does not match the yield source configuration")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("New owner cannot be the null address")]
    InvalidOwnerAddress,
}
