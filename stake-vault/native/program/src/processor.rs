use borsh::BorshDeserialize;
use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, msg, pubkey::Pubkey};
use stake_vault_core::VaultError;

use crate::instruction::StakeInstruction;
use crate::instructions::{deposit, withdraw};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instr = StakeInstruction::try_from_slice(instruction_data)
        .map_err(|_| VaultError::InvalidInstruction)?;

    match instr {
        StakeInstruction::Deposit { amount } => {
            msg!("Instruction: Deposit");
            deposit(program_id, accounts, amount)
        }
        StakeInstruction::Withdraw => {
            msg!("Instruction: Withdraw");
            withdraw(program_id, accounts)
        }
    }
}
