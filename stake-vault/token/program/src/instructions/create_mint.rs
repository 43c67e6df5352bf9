use crate::instruction::{MintParams, find_metadata_address};
use mpl_token_metadata::{
    instructions::{CreateMetadataAccountV3, CreateMetadataAccountV3InstructionArgs},
    types::DataV2,
};
use solana_program::{
    account_info::{AccountInfo, next_account_info},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_pack::Pack,
    pubkey::Pubkey,
    sysvar::{Sysvar, rent::Rent},
};
use solana_system_interface::program as system_program;
use spl_token::{instruction as token_instruction, state::Mint};
use stake_vault_core::{
    VaultError,
    account::create_pda_account,
    pda::MintAuthority,
    validation::{
        assert_derived, assert_program, assert_signer, assert_uninitialized, assert_writable,
    },
};

/// Largest decimals value accepted for the program mint.
pub const MAX_DECIMALS: u8 = 9;

/// Accounts:
/// [signer, writable payer]
/// [writable mint]
/// [writable metadata]
/// [readonly token program]
/// [readonly metadata program]
/// [readonly system program]
pub fn create_mint(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    params: MintParams,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let payer = next_account_info(account_info_iter)?;
    let mint = next_account_info(account_info_iter)?;
    let metadata = next_account_info(account_info_iter)?;
    let token_prog = next_account_info(account_info_iter)?;
    let metadata_prog = next_account_info(account_info_iter)?;
    let system_prog = next_account_info(account_info_iter)?;

    // Basic checks
    assert_signer(payer)?;
    assert_writable(payer)?;
    assert_writable(mint)?;
    assert_writable(metadata)?;
    assert_program(token_prog, &spl_token::ID)?;
    assert_program(metadata_prog, &mpl_token_metadata::ID)?;
    assert_program(system_prog, &system_program::ID)?;
    if params.decimals > MAX_DECIMALS {
        return Err(VaultError::InvalidDecimals.into());
    }

    let (mint_pda, mint_authority) = MintAuthority::find(program_id)?;
    assert_derived(mint, &mint_pda)?;
    let (metadata_pda, _) = find_metadata_address(&mint_pda);
    assert_derived(metadata, &metadata_pda)?;

    // The mint address is fixed, so this is the only guard against a second mint.
    assert_uninitialized(mint)?;

    msg!("Creating program mint {}", mint.key);
    create_pda_account(
        payer,
        mint,
        system_prog,
        &Rent::get()?,
        Mint::LEN,
        &spl_token::ID,
        &mint_authority.signer_seeds(),
    )?;

    invoke(
        &token_instruction::initialize_mint2(
            &spl_token::ID,
            mint.key,
            mint.key,
            Some(mint.key),
            params.decimals,
        )?,
        &[mint.clone(), token_prog.clone()],
    )?;

    msg!("Creating token metadata...");
    let metadata_ix = CreateMetadataAccountV3 {
        metadata: *metadata.key,
        mint: *mint.key,
        mint_authority: *mint.key,
        payer: *payer.key,
        update_authority: (*mint.key, true),
        system_program: system_program::ID,
        rent: None,
    }
    .instruction(CreateMetadataAccountV3InstructionArgs {
        data: DataV2 {
            name: params.name,
            symbol: params.symbol,
            uri: params.uri,
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        },
        is_mutable: true,
        collection_details: None,
    });
    invoke_signed(
        &metadata_ix,
        &[
            metadata.clone(),
            mint.clone(),
            payer.clone(),
            system_prog.clone(),
            metadata_prog.clone(),
        ],
        &[&mint_authority.signer_seeds()[..]],
    )?;

    msg!("SPL Token Mint Created: {}", mint.key);
    Ok(())
}
