use crate::instructions::shared::{
    create_token_account_if_missing, read_token_account, transfer_tokens,
};
use crate::state::Bookkeeping;
use solana_program::{
    account_info::{AccountInfo, next_account_info},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{Sysvar, rent::Rent},
};
use solana_system_interface::program as system_program;
use spl_associated_token_account::get_associated_token_address;
use stake_vault_core::{
    VaultError,
    account::create_pda_account,
    pda::{EscrowAuthority, LedgerSeeds, find_mint_address},
    validation::{
        assert_derived, assert_nonzero, assert_program, assert_signer, assert_writable,
    },
};

/// Accounts:
/// [signer, writable payer]
/// [readonly escrow authority]
/// [writable bookkeeping]
/// [readonly token_mint]
/// [writable payer_ata]
/// [writable escrow_ata]
/// [readonly token program]
/// [readonly associated token program]
/// [readonly system program]
pub fn deposit_tokens(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    deposit_amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let payer = next_account_info(account_info_iter)?;
    let escrow = next_account_info(account_info_iter)?;
    let bookkeeping = next_account_info(account_info_iter)?;
    let token_mint = next_account_info(account_info_iter)?;
    let payer_ata = next_account_info(account_info_iter)?;
    let escrow_ata = next_account_info(account_info_iter)?;
    let token_prog = next_account_info(account_info_iter)?;
    let ata_prog = next_account_info(account_info_iter)?;
    let system_prog = next_account_info(account_info_iter)?;

    // Basic checks
    assert_signer(payer)?;
    assert_writable(payer)?;
    assert_writable(bookkeeping)?;
    assert_writable(payer_ata)?;
    assert_writable(escrow_ata)?;
    assert_program(token_prog, &spl_token::ID)?;
    assert_program(ata_prog, &spl_associated_token_account::ID)?;
    assert_program(system_prog, &system_program::ID)?;
    assert_nonzero(deposit_amount)?;

    // Every account must be the one derived for this payer
    let (mint_pda, _) = find_mint_address(program_id)?;
    assert_derived(token_mint, &mint_pda)?;
    let (escrow_pda, escrow_authority) = EscrowAuthority::find(payer.key, program_id)?;
    assert_derived(escrow, &escrow_pda)?;
    let (bookkeeping_pda, bookkeeping_seeds) = LedgerSeeds::find(payer.key, program_id)?;
    assert_derived(bookkeeping, &bookkeeping_pda)?;
    assert_derived(payer_ata, &get_associated_token_address(payer.key, &mint_pda))?;
    assert_derived(escrow_ata, &get_associated_token_address(&escrow_pda, &mint_pda))?;

    // A payer without a token account holds nothing
    if payer_ata.data_is_empty() {
        msg!("Payer holds no tokens, deposit needs {}", deposit_amount);
        return Err(VaultError::InsufficientFunds.into());
    }
    let source = read_token_account(payer_ata)?;
    if source.amount < deposit_amount {
        msg!("Payer holds {} tokens, deposit needs {}", source.amount, deposit_amount);
        return Err(VaultError::InsufficientFunds.into());
    }

    if bookkeeping.data_is_empty() {
        msg!("Creating bookkeeping account for {}", payer.key);
        create_pda_account(
            payer,
            bookkeeping,
            system_prog,
            &Rent::get()?,
            Bookkeeping::LEN,
            program_id,
            &bookkeeping_seeds.signer_seeds(),
        )?;
        Bookkeeping::new(
            *payer.key,
            mint_pda,
            bookkeeping_seeds.bump(),
            escrow_authority.bump(),
        )
        .store(bookkeeping)?;
    } else {
        let record = Bookkeeping::load(bookkeeping, program_id, payer.key)?;
        if record.mint != mint_pda {
            return Err(VaultError::InvalidDerivation.into());
        }
    }

    create_token_account_if_missing(
        payer,
        escrow_ata,
        escrow,
        token_mint,
        system_prog,
        token_prog,
        ata_prog,
    )?;

    msg!("Transferring {} tokens to stake escrow", deposit_amount);
    transfer_tokens(payer_ata, escrow_ata, payer, token_prog, deposit_amount, None)?;

    msg!("Deposit successful!");
    Ok(())
}
