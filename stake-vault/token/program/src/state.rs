use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program_error::ProgramError,
    pubkey::Pubkey,
};
use stake_vault_core::{VaultError, validation::assert_owned_by};

/// Depositor record for the token escrow. The escrow token account holds the
/// balance; this only remembers who may withdraw it and how to sign for it.
#[derive(BorshSerialize, BorshDeserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Bookkeeping {
    pub is_initialized: bool,
    pub depositor: Pubkey,
    pub mint: Pubkey,
    pub bump: u8,
    pub escrow_bump: u8,
}

impl Bookkeeping {
    pub const LEN: usize = 1 + 32 + 32 + 1 + 1;

    pub fn new(depositor: Pubkey, mint: Pubkey, bump: u8, escrow_bump: u8) -> Self {
        Self {
            is_initialized: true,
            depositor,
            mint,
            bump,
            escrow_bump,
        }
    }

    pub fn load(
        account: &AccountInfo,
        program_id: &Pubkey,
        depositor: &Pubkey,
    ) -> Result<Self, ProgramError> {
        assert_owned_by(account, program_id)?;
        let record = Self::try_from_slice(&account.data.borrow())
            .map_err(|_| VaultError::UninitializedAccount)?;
        if !record.is_initialized {
            return Err(VaultError::UninitializedAccount.into());
        }
        if record.depositor != *depositor {
            return Err(VaultError::UnauthorizedDepositor.into());
        }
        Ok(record)
    }

    pub fn store(&self, account: &AccountInfo) -> ProgramResult {
        self.serialize(&mut &mut account.data.borrow_mut()[..])
            .map_err(|_| ProgramError::AccountDataTooSmall)
    }
}
