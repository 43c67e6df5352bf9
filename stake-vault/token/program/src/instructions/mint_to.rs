use crate::instructions::shared::create_token_account_if_missing;
use solana_program::{
    account_info::{AccountInfo, next_account_info},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_pack::Pack,
    pubkey::Pubkey,
};
use solana_system_interface::program as system_program;
use spl_associated_token_account::get_associated_token_address;
use spl_token::{instruction as token_instruction, state::Mint};
use stake_vault_core::{
    VaultError,
    pda::MintAuthority,
    validation::{
        assert_derived, assert_nonzero, assert_owned_by, assert_program, assert_signer,
        assert_writable,
    },
};

/// Accounts:
/// [signer, writable payer]
/// [writable mint]
/// [writable payer_ata]
/// [readonly token program]
/// [readonly associated token program]
/// [readonly system program]
pub fn mint_to(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let payer = next_account_info(account_info_iter)?;
    let mint = next_account_info(account_info_iter)?;
    let payer_ata = next_account_info(account_info_iter)?;
    let token_prog = next_account_info(account_info_iter)?;
    let ata_prog = next_account_info(account_info_iter)?;
    let system_prog = next_account_info(account_info_iter)?;

    // Basic checks
    assert_signer(payer)?;
    assert_writable(payer)?;
    assert_writable(mint)?;
    assert_writable(payer_ata)?;
    assert_program(token_prog, &spl_token::ID)?;
    assert_program(ata_prog, &spl_associated_token_account::ID)?;
    assert_program(system_prog, &system_program::ID)?;
    assert_nonzero(amount)?;

    let (mint_pda, mint_authority) = MintAuthority::find(program_id)?;
    assert_derived(mint, &mint_pda)?;
    assert_owned_by(mint, &spl_token::ID)?;
    assert_derived(payer_ata, &get_associated_token_address(payer.key, mint.key))?;

    let supply = Mint::unpack(&mint.data.borrow())?.supply;
    supply
        .checked_add(amount)
        .ok_or(VaultError::ArithmeticOverflow)?;

    create_token_account_if_missing(
        payer,
        payer_ata,
        payer,
        mint,
        system_prog,
        token_prog,
        ata_prog,
    )?;

    invoke_signed(
        &token_instruction::mint_to(
            &spl_token::ID,
            mint.key,
            payer_ata.key,
            mint.key,
            &[],
            amount,
        )?,
        &[mint.clone(), payer_ata.clone(), token_prog.clone()],
        &[&mint_authority.signer_seeds()[..]],
    )?;

    msg!("Minted {} tokens to {}", amount, payer_ata.key);
    Ok(())
}
