use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};
use solana_system_interface::program as system_program;
use spl_associated_token_account::get_associated_token_address;
use stake_vault_core::{
    VaultError,
    pda::{find_escrow_address, find_ledger_address, find_mint_address},
};

/// Descriptive fields attached to the program mint.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MintParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum TokenVaultInstruction {
    /// Create the program mint and its metadata record. Succeeds only once.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Payer
    /// 1. `[writable]` Mint PDA `["mint"]`
    /// 2. `[writable]` Metadata PDA of the mint
    /// 3. `[]` SPL Token program
    /// 4. `[]` Token Metadata program
    /// 5. `[]` System program
    CreateMint(MintParams),

    /// Mint tokens to the payer's associated token account.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Payer
    /// 1. `[writable]` Mint PDA
    /// 2. `[writable]` Payer's associated token account
    /// 3. `[]` SPL Token program
    /// 4. `[]` Associated Token Account program
    /// 5. `[]` System program
    MintTo { amount: u64 },

    /// Move tokens from the payer into its escrow token account.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Payer
    /// 1. `[]` Escrow authority PDA `["stack", payer]`
    /// 2. `[writable]` Bookkeeping PDA `[payer]`
    /// 3. `[]` Mint PDA
    /// 4. `[writable]` Payer's associated token account
    /// 5. `[writable]` Escrow's associated token account
    /// 6. `[]` SPL Token program
    /// 7. `[]` Associated Token Account program
    /// 8. `[]` System program
    Deposit { amount: u64 },

    /// Return the whole escrow token balance to the depositor.
    ///
    /// Accounts: same as `Deposit`, with the depositor in place of the payer.
    Withdraw,
}

/// Metaplex metadata address of `mint`.
pub fn find_metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    mpl_token_metadata::accounts::Metadata::find_pda(mint)
}

/// Converts a whole-token amount into base units for a mint with `decimals`.
pub fn to_base_units(amount: u64, decimals: u8) -> Result<u64, VaultError> {
    10u64
        .checked_pow(u32::from(decimals))
        .and_then(|scale| amount.checked_mul(scale))
        .ok_or(VaultError::ArithmeticOverflow)
}

fn encode(instruction: &TokenVaultInstruction) -> Result<Vec<u8>, ProgramError> {
    borsh::to_vec(instruction).map_err(|_| ProgramError::InvalidInstructionData)
}

/// Creates a `CreateMint` instruction.
pub fn create_mint(
    program_id: &Pubkey,
    payer: &Pubkey,
    params: MintParams,
) -> Result<Instruction, ProgramError> {
    let (mint, _) = find_mint_address(program_id)?;
    let (metadata, _) = find_metadata_address(&mint);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(mint, false),
            AccountMeta::new(metadata, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(mpl_token_metadata::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: encode(&TokenVaultInstruction::CreateMint(params))?,
    })
}

/// Creates a `MintTo` instruction crediting the payer.
pub fn mint_to(
    program_id: &Pubkey,
    payer: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    let (mint, _) = find_mint_address(program_id)?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(mint, false),
            AccountMeta::new(get_associated_token_address(payer, &mint), false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: encode(&TokenVaultInstruction::MintTo { amount })?,
    })
}

fn escrow_accounts(
    program_id: &Pubkey,
    depositor: &Pubkey,
) -> Result<Vec<AccountMeta>, ProgramError> {
    let (mint, _) = find_mint_address(program_id)?;
    let (escrow, _) = find_escrow_address(depositor, program_id)?;
    let (bookkeeping, _) = find_ledger_address(depositor, program_id)?;
    Ok(vec![
        AccountMeta::new(*depositor, true),
        AccountMeta::new_readonly(escrow, false),
        AccountMeta::new(bookkeeping, false),
        AccountMeta::new_readonly(mint, false),
        AccountMeta::new(get_associated_token_address(depositor, &mint), false),
        AccountMeta::new(get_associated_token_address(&escrow, &mint), false),
        AccountMeta::new_readonly(spl_token::ID, false),
        AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        AccountMeta::new_readonly(system_program::ID, false),
    ])
}

/// Creates a token `Deposit` instruction.
pub fn deposit(
    program_id: &Pubkey,
    payer: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: escrow_accounts(program_id, payer)?,
        data: encode(&TokenVaultInstruction::Deposit { amount })?,
    })
}

/// Creates a token `Withdraw` instruction.
pub fn withdraw(program_id: &Pubkey, depositor: &Pubkey) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: escrow_accounts(program_id, depositor)?,
        data: encode(&TokenVaultInstruction::Withdraw)?,
    })
}
