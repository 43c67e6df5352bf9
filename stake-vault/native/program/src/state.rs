use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program_error::ProgramError,
    pubkey::Pubkey,
};
use stake_vault_core::{VaultError, validation::assert_owned_by};

/// Per-depositor record of the lamports held in escrow.
#[derive(BorshSerialize, BorshDeserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Ledger {
    pub is_initialized: bool,
    pub depositor: Pubkey,
    pub balance: u64,
    pub ledger_bump: u8,
    pub escrow_bump: u8,
}

impl Ledger {
    pub const LEN: usize = 1 + 32 + 8 + 1 + 1;

    pub fn new(depositor: Pubkey, ledger_bump: u8, escrow_bump: u8) -> Self {
        Self {
            is_initialized: true,
            depositor,
            balance: 0,
            ledger_bump,
            escrow_bump,
        }
    }

    /// Adds a deposit and returns the new balance.
    pub fn credit(&mut self, amount: u64) -> Result<u64, VaultError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(self.balance)
    }

    /// Empties the ledger and returns everything it held.
    pub fn drain(&mut self) -> Result<u64, VaultError> {
        if self.balance == 0 {
            return Err(VaultError::NothingToWithdraw);
        }
        Ok(std::mem::take(&mut self.balance))
    }

    /// Reads the ledger of `depositor` from a program-owned account.
    pub fn load(
        account: &AccountInfo,
        program_id: &Pubkey,
        depositor: &Pubkey,
    ) -> Result<Self, ProgramError> {
        assert_owned_by(account, program_id)?;
        let ledger = Self::try_from_slice(&account.data.borrow())
            .map_err(|_| VaultError::UninitializedAccount)?;
        if !ledger.is_initialized {
            return Err(VaultError::UninitializedAccount.into());
        }
        if ledger.depositor != *depositor {
            return Err(VaultError::UnauthorizedDepositor.into());
        }
        Ok(ledger)
    }

    pub fn store(&self, account: &AccountInfo) -> ProgramResult {
        self.serialize(&mut &mut account.data.borrow_mut()[..])
            .map_err(|_| ProgramError::AccountDataTooSmall)
    }
}
