use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Custom errors shared by both vault programs. The discriminant is the
/// `ProgramError::Custom` code, so the order of variants is part of the ABI.
#[derive(Clone, Copy, Debug, Error, FromPrimitive, PartialEq, Eq)]
pub enum VaultError {
    #[error("Account does not match its derived address")]
    InvalidDerivation,
    #[error("Missing required signer")]
    MissingSignature,
    #[error("Insufficient balance")]
    InsufficientFunds,
    #[error("Account is already initialized")]
    AlreadyInitialized,
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Nothing to withdraw")]
    NothingToWithdraw,
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Account must be writable")]
    NotWritable,
    #[error("Account is not initialized")]
    UninitializedAccount,
    #[error("Ledger belongs to another depositor")]
    UnauthorizedDepositor,
    #[error("Unsupported number of decimals")]
    InvalidDecimals,
    #[error("No bump seed yields an off-curve address")]
    NoViableBump,
    #[error("Invalid instruction")]
    InvalidInstruction,
}

impl VaultError {
    /// Maps a `ProgramError::Custom` code produced by this crate back to its variant.
    pub fn decode(error: &ProgramError) -> Option<Self> {
        match error {
            ProgramError::Custom(code) => Self::from_u32(*code),
            _ => None,
        }
    }
}

impl From<VaultError> for ProgramError {
    fn from(e: VaultError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
