use crate::state::Ledger;
use solana_program::{
    account_info::{AccountInfo, next_account_info},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    pubkey::Pubkey,
};
use solana_system_interface::{instruction as system_instruction, program as system_program};
use stake_vault_core::{
    VaultError,
    pda::{EscrowAuthority, find_ledger_address},
    validation::{assert_derived, assert_program, assert_signer, assert_writable},
};

/// Accounts:
/// [signer, writable depositor]
/// [writable escrow]
/// [writable ledger]
/// [readonly system program]
pub fn withdraw(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let depositor = next_account_info(account_info_iter)?;
    let escrow = next_account_info(account_info_iter)?;
    let ledger = next_account_info(account_info_iter)?;
    let system_prog = next_account_info(account_info_iter)?;

    // Basic checks
    assert_signer(depositor)?;
    assert_writable(depositor)?;
    assert_writable(escrow)?;
    assert_writable(ledger)?;
    assert_program(system_prog, &system_program::ID)?;

    let (ledger_pda, _) = find_ledger_address(depositor.key, program_id)?;
    assert_derived(ledger, &ledger_pda)?;

    if ledger.data_is_empty() {
        msg!("No ledger for {}", depositor.key);
        return Err(VaultError::NothingToWithdraw.into());
    }
    let mut state = Ledger::load(ledger, program_id, depositor.key)?;

    let (escrow_pda, escrow_authority) =
        EscrowAuthority::from_bump(depositor.key, state.escrow_bump, program_id)?;
    assert_derived(escrow, &escrow_pda)?;

    let amount = state.drain()?;
    if escrow.lamports() < amount {
        msg!("Escrow holds {} lamports, ledger records {}", escrow.lamports(), amount);
        return Err(VaultError::InsufficientFunds.into());
    }

    msg!("Withdrawing {} lamports from stake escrow", amount);
    invoke_signed(
        &system_instruction::transfer(escrow.key, depositor.key, amount),
        &[escrow.clone(), depositor.clone(), system_prog.clone()],
        &[&escrow_authority.signer_seeds()[..]],
    )?;

    state.store(ledger)?;
    msg!("Withdrew {} lamports to user wallet", amount);
    Ok(())
}
