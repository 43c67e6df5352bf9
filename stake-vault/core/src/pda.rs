//! Deterministic addresses for the vault programs.
//!
//! Every address is a program-derived address: it has no private key, so the
//! owning program is the only party that can sign for it. The helpers here are
//! shared by the on-chain processors and by the client instruction builders,
//! which is what lets a client locate a vault without any registry.

use solana_program::pubkey::Pubkey;

use crate::error::VaultError;

/// Seed of the escrow authority that holds a depositor's funds.
pub const ESCROW_SEED: &[u8] = b"stack";
/// Seed of the single mint a token vault program controls.
pub const MINT_SEED: &[u8] = b"mint";

/// Escrow authority address for `depositor`: `["stack", depositor]`.
pub fn find_escrow_address(
    depositor: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), VaultError> {
    Pubkey::try_find_program_address(&[ESCROW_SEED, depositor.as_ref()], program_id)
        .ok_or(VaultError::NoViableBump)
}

/// Ledger (or bookkeeping) account address for `depositor`: `[depositor]`.
pub fn find_ledger_address(
    depositor: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), VaultError> {
    Pubkey::try_find_program_address(&[depositor.as_ref()], program_id)
        .ok_or(VaultError::NoViableBump)
}

/// Mint address of the program: `["mint"]`.
pub fn find_mint_address(program_id: &Pubkey) -> Result<(Pubkey, u8), VaultError> {
    Pubkey::try_find_program_address(&[MINT_SEED], program_id).ok_or(VaultError::NoViableBump)
}

/// Proof that the program may sign for a depositor's escrow.
///
/// Carries the seeds and bump that re-create the escrow address so a handler can
/// pass them to `invoke_signed`; it is never stored as a secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscrowAuthority {
    depositor: Pubkey,
    bump: [u8; 1],
}

impl EscrowAuthority {
    pub fn find(depositor: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, Self), VaultError> {
        let (address, bump) = find_escrow_address(depositor, program_id)?;
        Ok((address, Self { depositor: *depositor, bump: [bump] }))
    }

    /// Rebuilds the authority from a bump recorded on-chain.
    pub fn from_bump(
        depositor: &Pubkey,
        bump: u8,
        program_id: &Pubkey,
    ) -> Result<(Pubkey, Self), VaultError> {
        let address =
            Pubkey::create_program_address(&[ESCROW_SEED, depositor.as_ref(), &[bump]], program_id)
                .map_err(|_| VaultError::InvalidDerivation)?;
        Ok((address, Self { depositor: *depositor, bump: [bump] }))
    }

    pub fn bump(&self) -> u8 {
        self.bump[0]
    }

    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [ESCROW_SEED, self.depositor.as_ref(), &self.bump]
    }
}

/// Seeds that let the program sign the creation of a depositor's ledger account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerSeeds {
    depositor: Pubkey,
    bump: [u8; 1],
}

impl LedgerSeeds {
    pub fn find(depositor: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, Self), VaultError> {
        let (address, bump) = find_ledger_address(depositor, program_id)?;
        Ok((address, Self { depositor: *depositor, bump: [bump] }))
    }

    pub fn bump(&self) -> u8 {
        self.bump[0]
    }

    pub fn signer_seeds(&self) -> [&[u8]; 2] {
        [self.depositor.as_ref(), &self.bump]
    }
}

/// Proof that the program may act as mint (and metadata update) authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintAuthority {
    bump: [u8; 1],
}

impl MintAuthority {
    pub fn find(program_id: &Pubkey) -> Result<(Pubkey, Self), VaultError> {
        let (address, bump) = find_mint_address(program_id)?;
        Ok((address, Self { bump: [bump] }))
    }

    pub fn bump(&self) -> u8 {
        self.bump[0]
    }

    pub fn signer_seeds(&self) -> [&[u8]; 2] {
        [MINT_SEED, &self.bump]
    }
}
