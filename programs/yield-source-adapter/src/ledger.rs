use anchor_lang::prelude::*;

use crate::{
    errors::YieldSourceError,
    state::{ShareBalance, YieldSource},
    vault::VaultSnapshot,
};

/// floor(a * b / c) with a u128 intermediate
fn mul_div_floor(a: u64, b: u64, c: u64) -> Result<u64> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(error!(YieldSourceError::ArithmeticOverflow))?;
    let quotient = product
        .checked_div(c as u128)
        .ok_or(error!(YieldSourceError::DivisionByZero))?;
    u64::try_from(quotient).map_err(|_| error!(YieldSourceError::ArithmeticOverflow))
}

impl YieldSource {
    /// Shares minted for `tokens`
    ///
    /// 1:1 while no shares exist, even if the adapter already holds vault
    /// balance from a sponsor; that balance goes to whoever mints next.
    /// Also 1:1 while outstanding shares are backed by nothing, e.g. after a
    /// deposit too small to earn a single vault share.
    /// Otherwise `tokens * total_shares / attributable_balance`, rounded down.
    pub fn tokens_to_shares(&self, tokens: u64, vault: &VaultSnapshot) -> Result<u64> {
        if self.total_shares == 0 || tokens == 0 {
            return Ok(tokens);
        }
        match vault.attributable_balance()? {
            0 => Ok(tokens),
            attributable => mul_div_floor(tokens, self.total_shares, attributable),
        }
    }

    /// Tokens redeemable for `shares`, rounded down
    pub fn shares_to_tokens(&self, shares: u64, vault: &VaultSnapshot) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(shares);
        }
        mul_div_floor(shares, vault.attributable_balance()?, self.total_shares)
    }

    /// Token value of a holder's whole position
    pub fn balance_of_token(&self, balance: &ShareBalance, vault: &VaultSnapshot) -> Result<u64> {
        self.shares_to_tokens(balance.shares, vault)
    }

    pub fn mint_shares(&mut self, balance: &mut ShareBalance, shares: u64) -> Result<()> {
        let holder_shares = balance
            .shares
            .checked_add(shares)
            .ok_or(error!(YieldSourceError::ArithmeticOverflow))?;
        let total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(error!(YieldSourceError::ArithmeticOverflow))?;

        balance.shares = holder_shares;
        self.total_shares = total_shares;
        Ok(())
    }

    pub fn burn_shares(&mut self, balance: &mut ShareBalance, shares: u64) -> Result<()> {
        require!(
            shares <= balance.shares,
            YieldSourceError::InsufficientBalance
        );
        let total_shares = self
            .total_shares
            .checked_sub(shares)
            .ok_or(error!(YieldSourceError::ArithmeticOverflow))?;

        balance.shares -= shares;
        self.total_shares = total_shares;
        Ok(())
    }

    /// Ledger side of a deposit
    ///
    /// `vault` must be read before the deposit lands. Returns shares minted.
    pub fn record_supply(
        &mut self,
        balance: &mut ShareBalance,
        amount: u64,
        vault: &VaultSnapshot,
    ) -> Result<u64> {
        let shares = self.tokens_to_shares(amount, vault)?;
        self.mint_shares(balance, shares)?;
        Ok(shares)
    }

    /// Ledger side of a redemption
    ///
    /// Checks the holder's balance, prices the shares at the pre-redemption
    /// rate, then burns them. Returns the tokens owed to the holder.
    pub fn record_redeem(
        &mut self,
        balance: &mut ShareBalance,
        shares: u64,
        vault: &VaultSnapshot,
    ) -> Result<u64> {
        require!(
            shares <= balance.shares,
            YieldSourceError::InsufficientBalance
        );
        let tokens = self.shares_to_tokens(shares, vault)?;
        self.burn_shares(balance, shares)?;
        Ok(tokens)
    }
}
