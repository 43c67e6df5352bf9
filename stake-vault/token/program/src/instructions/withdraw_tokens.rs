use crate::instructions::shared::{
    create_token_account_if_missing, read_token_account, transfer_tokens,
};
use crate::state::Bookkeeping;
use solana_program::{
    account_info::{AccountInfo, next_account_info},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};
use solana_system_interface::program as system_program;
use spl_associated_token_account::get_associated_token_address;
use stake_vault_core::{
    VaultError,
    pda::{EscrowAuthority, find_ledger_address, find_mint_address},
    validation::{assert_derived, assert_program, assert_signer, assert_writable},
};

/// Accounts:
/// [signer, writable depositor]
/// [readonly escrow authority]
/// [writable bookkeeping]
/// [readonly token_mint]
/// [writable depositor_ata]
/// [writable escrow_ata]
/// [readonly token program]
/// [readonly associated token program]
/// [readonly system program]
pub fn withdraw_tokens(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let depositor = next_account_info(account_info_iter)?;
    let escrow = next_account_info(account_info_iter)?;
    let bookkeeping = next_account_info(account_info_iter)?;
    let token_mint = next_account_info(account_info_iter)?;
    let depositor_ata = next_account_info(account_info_iter)?;
    let escrow_ata = next_account_info(account_info_iter)?;
    let token_prog = next_account_info(account_info_iter)?;
    let ata_prog = next_account_info(account_info_iter)?;
    let system_prog = next_account_info(account_info_iter)?;

    // Basic checks
    assert_signer(depositor)?;
    assert_writable(depositor)?;
    assert_writable(depositor_ata)?;
    assert_writable(escrow_ata)?;
    assert_program(token_prog, &spl_token::ID)?;
    assert_program(ata_prog, &spl_associated_token_account::ID)?;
    assert_program(system_prog, &system_program::ID)?;

    let (mint_pda, _) = find_mint_address(program_id)?;
    assert_derived(token_mint, &mint_pda)?;
    let (bookkeeping_pda, _) = find_ledger_address(depositor.key, program_id)?;
    assert_derived(bookkeeping, &bookkeeping_pda)?;

    if bookkeeping.data_is_empty() {
        msg!("No deposits recorded for {}", depositor.key);
        return Err(VaultError::NothingToWithdraw.into());
    }
    let record = Bookkeeping::load(bookkeeping, program_id, depositor.key)?;

    // The escrow signs through the bump recorded at deposit time
    let (escrow_pda, escrow_authority) =
        EscrowAuthority::from_bump(depositor.key, record.escrow_bump, program_id)?;
    assert_derived(escrow, &escrow_pda)?;
    assert_derived(depositor_ata, &get_associated_token_address(depositor.key, &mint_pda))?;
    assert_derived(escrow_ata, &get_associated_token_address(&escrow_pda, &mint_pda))?;

    if escrow_ata.data_is_empty() {
        return Err(VaultError::NothingToWithdraw.into());
    }
    let balance = read_token_account(escrow_ata)?.amount;
    if balance == 0 {
        msg!("Escrow token account is empty");
        return Err(VaultError::NothingToWithdraw.into());
    }

    create_token_account_if_missing(
        depositor,
        depositor_ata,
        depositor,
        token_mint,
        system_prog,
        token_prog,
        ata_prog,
    )?;

    msg!("Transferring {} tokens from stake escrow", balance);
    transfer_tokens(
        escrow_ata,
        depositor_ata,
        escrow,
        token_prog,
        balance,
        Some(&escrow_authority),
    )?;

    msg!("Withdrew {} spl tokens to user wallet", balance);
    Ok(())
}
