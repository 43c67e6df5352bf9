use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    program_pack::Pack,
};
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token::{instruction as token_instruction, state::Account as TokenAccount};
use stake_vault_core::{pda::EscrowAuthority, validation::assert_owned_by};

/// Reads an initialized SPL token account.
pub fn read_token_account(account: &AccountInfo) -> Result<TokenAccount, ProgramError> {
    assert_owned_by(account, &spl_token::ID)?;
    TokenAccount::unpack(&account.data.borrow())
}

// Creates the associated token account of `wallet` unless it already exists.
pub fn create_token_account_if_missing<'a>(
    payer: &AccountInfo<'a>,
    token_account: &AccountInfo<'a>,
    wallet: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    system_prog: &AccountInfo<'a>,
    token_prog: &AccountInfo<'a>,
    ata_prog: &AccountInfo<'a>,
) -> ProgramResult {
    if !token_account.data_is_empty() {
        return Ok(());
    }

    msg!("Creating associated token account for {}", wallet.key);
    invoke(
        &create_associated_token_account_idempotent(
            payer.key,
            wallet.key,
            mint.key,
            token_prog.key,
        ),
        &[
            payer.clone(),
            token_account.clone(),
            wallet.clone(),
            mint.clone(),
            system_prog.clone(),
            token_prog.clone(),
            ata_prog.clone(),
        ],
    )
}

// Transfer tokens from one account to another.
// Transfers out of the escrow token account must carry the escrow authority proof.
pub fn transfer_tokens<'a>(
    from: &AccountInfo<'a>,
    to: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    token_prog: &AccountInfo<'a>,
    amount: u64,
    escrow_authority: Option<&EscrowAuthority>,
) -> ProgramResult {
    let transfer_ix = token_instruction::transfer(
        token_prog.key,
        from.key,
        to.key,
        authority.key,
        &[],
        amount,
    )?;
    let account_infos = [from.clone(), to.clone(), authority.clone(), token_prog.clone()];

    match escrow_authority {
        Some(proof) => invoke_signed(&transfer_ix, &account_infos, &[&proof.signer_seeds()[..]]),
        None => invoke(&transfer_ix, &account_infos),
    }
}
