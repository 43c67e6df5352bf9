use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};
use solana_system_interface::program as system_program;
use stake_vault_core::pda::{find_escrow_address, find_ledger_address};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum StakeInstruction {
    /// Move lamports from the depositor into its escrow and credit the ledger.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Depositor
    /// 1. `[writable]` Escrow PDA `["stack", depositor]`
    /// 2. `[writable]` Ledger PDA `[depositor]`
    /// 3. `[]` System program
    Deposit { amount: u64 },

    /// Return every lamport recorded in the ledger to the depositor.
    ///
    /// Accounts: same as `Deposit`.
    Withdraw,
}

fn vault_accounts(
    program_id: &Pubkey,
    depositor: &Pubkey,
) -> Result<Vec<AccountMeta>, ProgramError> {
    let (escrow, _) = find_escrow_address(depositor, program_id)?;
    let (ledger, _) = find_ledger_address(depositor, program_id)?;
    Ok(vec![
        AccountMeta::new(*depositor, true),
        AccountMeta::new(escrow, false),
        AccountMeta::new(ledger, false),
        AccountMeta::new_readonly(system_program::ID, false),
    ])
}

/// Creates a `Deposit` instruction.
pub fn deposit(
    program_id: &Pubkey,
    depositor: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vault_accounts(program_id, depositor)?,
        data: borsh::to_vec(&StakeInstruction::Deposit { amount })
            .map_err(|_| ProgramError::InvalidInstructionData)?,
    })
}

/// Creates a `Withdraw` instruction.
pub fn withdraw(program_id: &Pubkey, depositor: &Pubkey) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vault_accounts(program_id, depositor)?,
        data: borsh::to_vec(&StakeInstruction::Withdraw)
            .map_err(|_| ProgramError::InvalidInstructionData)?,
    })
}
