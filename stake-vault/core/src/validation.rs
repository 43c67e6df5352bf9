//! Account checks run by every handler before it performs a CPI.

use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

use solana_system_interface::program as system_program;

use crate::error::VaultError;

pub fn assert_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        msg!("Missing signature for {}", account.key);
        return Err(VaultError::MissingSignature.into());
    }
    Ok(())
}

pub fn assert_writable(account: &AccountInfo) -> ProgramResult {
    if !account.is_writable {
        msg!("Account {} is not writable", account.key);
        return Err(VaultError::NotWritable.into());
    }
    Ok(())
}

/// Rejects an account whose key differs from the address the program derived for it.
pub fn assert_derived(account: &AccountInfo, expected: &Pubkey) -> ProgramResult {
    if account.key != expected {
        msg!("Derivation mismatch: expected {}, got {}", expected, account.key);
        return Err(VaultError::InvalidDerivation.into());
    }
    Ok(())
}

pub fn assert_program(account: &AccountInfo, program_id: &Pubkey) -> ProgramResult {
    if account.key != program_id {
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

pub fn assert_owned_by(account: &AccountInfo, owner: &Pubkey) -> ProgramResult {
    if account.owner != owner {
        return Err(ProgramError::InvalidAccountOwner);
    }
    Ok(())
}

/// An account is initialized once a program other than the system program owns
/// it or it carries data. Lamports alone do not count.
pub fn assert_uninitialized(account: &AccountInfo) -> ProgramResult {
    if account.owner != &system_program::ID || !account.data_is_empty() {
        return Err(VaultError::AlreadyInitialized.into());
    }
    Ok(())
}

pub fn assert_nonzero(amount: u64) -> ProgramResult {
    if amount == 0 {
        return Err(VaultError::InvalidAmount.into());
    }
    Ok(())
}
