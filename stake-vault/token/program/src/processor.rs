use borsh::BorshDeserialize;
use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, msg, pubkey::Pubkey};
use stake_vault_core::VaultError;

use crate::instruction::TokenVaultInstruction;
use crate::instructions::{create_mint, deposit_tokens, mint_to, withdraw_tokens};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instr = TokenVaultInstruction::try_from_slice(instruction_data)
        .map_err(|_| VaultError::InvalidInstruction)?;

    match instr {
        TokenVaultInstruction::CreateMint(params) => {
            msg!("Instruction: CreateMint");
            create_mint(program_id, accounts, params)
        }
        TokenVaultInstruction::MintTo { amount } => {
            msg!("Instruction: MintTo");
            mint_to(program_id, accounts, amount)
        }
        TokenVaultInstruction::Deposit { amount } => {
            msg!("Instruction: Deposit");
            deposit_tokens(program_id, accounts, amount)
        }
        TokenVaultInstruction::Withdraw => {
            msg!("Instruction: Withdraw");
            withdraw_tokens(program_id, accounts)
        }
    }
}
