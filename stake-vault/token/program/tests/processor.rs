use solana_program::{
    account_info::AccountInfo,
    instruction::Instruction,
    native_token::LAMPORTS_PER_SOL,
    program_error::ProgramError,
    program_option::COption,
    program_pack::Pack,
    pubkey::Pubkey,
};
use solana_system_interface::program as system_program;
use spl_associated_token_account::get_associated_token_address;
use spl_stake_vault::{
    ID,
    instruction::{self, MintParams},
    processor::process_instruction,
    state::Bookkeeping,
};
use spl_token::state::{Account as TokenAccount, AccountState, Mint};
use stake_vault_core::{
    VaultError,
    pda::{find_escrow_address, find_ledger_address, find_mint_address},
};

// Account positions shared by the token deposit and withdraw instructions.
const ESCROW: usize = 1;
const BOOKKEEPING: usize = 2;
const DEPOSITOR_ATA: usize = 4;
const ESCROW_ATA: usize = 5;

struct TestAccount {
    key: Pubkey,
    owner: Pubkey,
    lamports: u64,
    data: Vec<u8>,
    is_signer: bool,
    is_writable: bool,
}

impl TestAccount {
    fn info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            self.is_signer,
            self.is_writable,
            &mut self.lamports,
            &mut self.data,
            &self.owner,
            false,
            0,
        )
    }

    fn hold(&mut self, owner: Pubkey, data: Vec<u8>) {
        self.owner = owner;
        self.lamports = LAMPORTS_PER_SOL / 100;
        self.data = data;
    }
}

/// Materializes the accounts an instruction names, all empty except the signer.
fn accounts_for(ix: &Instruction) -> Vec<TestAccount> {
    ix.accounts
        .iter()
        .map(|meta| TestAccount {
            key: meta.pubkey,
            owner: system_program::ID,
            lamports: if meta.is_signer { 10 * LAMPORTS_PER_SOL } else { 0 },
            data: vec![],
            is_signer: meta.is_signer,
            is_writable: meta.is_writable,
        })
        .collect()
}

fn run(accounts: &mut [TestAccount], data: &[u8]) -> Result<(), ProgramError> {
    let infos: Vec<AccountInfo> = accounts.iter_mut().map(TestAccount::info).collect();
    process_instruction(&ID, &infos, data)
}

fn custom(err: ProgramError) -> Option<VaultError> {
    VaultError::decode(&err)
}

fn program_mint() -> Pubkey {
    find_mint_address(&ID).unwrap().0
}

fn packed_mint(supply: u64) -> Vec<u8> {
    let mint = program_mint();
    let mut data = vec![0u8; Mint::LEN];
    Mint::pack(
        Mint {
            mint_authority: COption::Some(mint),
            supply,
            decimals: 9,
            is_initialized: true,
            freeze_authority: COption::Some(mint),
        },
        &mut data,
    )
    .unwrap();
    data
}

fn packed_token_account(owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(
        TokenAccount {
            mint: program_mint(),
            owner: *owner,
            amount,
            state: AccountState::Initialized,
            ..TokenAccount::default()
        },
        &mut data,
    )
    .unwrap();
    data
}

fn bookkeeping_data(depositor: &Pubkey, recorded_for: Pubkey) -> Vec<u8> {
    let (_, bump) = find_ledger_address(depositor, &ID).unwrap();
    let (_, escrow_bump) = find_escrow_address(depositor, &ID).unwrap();
    borsh::to_vec(&Bookkeeping::new(recorded_for, program_mint(), bump, escrow_bump)).unwrap()
}

fn token_params(decimals: u8) -> MintParams {
    MintParams {
        name: "Task Token 1".to_string(),
        symbol: "TT1".to_string(),
        uri: "https://example.com/metadata.json".to_string(),
        decimals,
    }
}

#[test]
fn second_create_mint_fails_with_already_initialized() {
    let payer = Pubkey::new_unique();
    let ix = instruction::create_mint(&ID, &payer, token_params(9)).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[1].hold(spl_token::ID, packed_mint(0));

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::AlreadyInitialized));
}

#[test]
fn lamports_sent_to_the_mint_address_do_not_block_create_mint() {
    let payer = Pubkey::new_unique();
    let ix = instruction::create_mint(&ID, &payer, token_params(9)).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[1].lamports = 1;

    // Gets past the duplicate check and stops at the first runtime call.
    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_ne!(custom(err), Some(VaultError::AlreadyInitialized));
    assert!(accounts[1].data.is_empty());
}

#[test]
fn create_mint_requires_payer_signature() {
    let ix = instruction::create_mint(&ID, &Pubkey::new_unique(), token_params(9)).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[0].is_signer = false;

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::MissingSignature));
}

#[test]
fn create_mint_only_accepts_the_program_mint_address() {
    let ix = instruction::create_mint(&ID, &Pubkey::new_unique(), token_params(9)).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[1].key = Pubkey::new_unique();

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InvalidDerivation));
}

#[test]
fn create_mint_rejects_foreign_metadata_account() {
    let ix = instruction::create_mint(&ID, &Pubkey::new_unique(), token_params(9)).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[2].key = Pubkey::new_unique();

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InvalidDerivation));
}

#[test]
fn create_mint_rejects_too_many_decimals() {
    let ix = instruction::create_mint(&ID, &Pubkey::new_unique(), token_params(10)).unwrap();
    let mut accounts = accounts_for(&ix);

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InvalidDecimals));
}

#[test]
fn create_mint_rejects_impostor_metadata_program() {
    let ix = instruction::create_mint(&ID, &Pubkey::new_unique(), token_params(9)).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[4].key = Pubkey::new_unique();

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(err, ProgramError::IncorrectProgramId);
}

#[test]
fn mint_to_rejects_zero_amount() {
    let ix = instruction::mint_to(&ID, &Pubkey::new_unique(), 0).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[1].hold(spl_token::ID, packed_mint(0));

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InvalidAmount));
}

#[test]
fn mint_to_only_credits_the_payer_token_account() {
    let ix = instruction::mint_to(&ID, &Pubkey::new_unique(), 1_000).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[1].hold(spl_token::ID, packed_mint(0));
    accounts[2].key = get_associated_token_address(&Pubkey::new_unique(), &program_mint());

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InvalidDerivation));
}

#[test]
fn mint_to_refuses_to_overflow_supply() {
    let ix = instruction::mint_to(&ID, &Pubkey::new_unique(), 10).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[1].hold(spl_token::ID, packed_mint(u64::MAX - 5));

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::ArithmeticOverflow));
}

#[test]
fn mint_to_before_create_mint_fails() {
    let ix = instruction::mint_to(&ID, &Pubkey::new_unique(), 10).unwrap();
    let mut accounts = accounts_for(&ix);

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(err, ProgramError::InvalidAccountOwner);
}

#[test]
fn deposit_above_balance_fails_and_leaves_balances_unchanged() {
    let payer = Pubkey::new_unique();
    let ix = instruction::deposit(&ID, &payer, 10).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[DEPOSITOR_ATA].hold(spl_token::ID, packed_token_account(&payer, 5));
    let before = accounts[DEPOSITOR_ATA].data.clone();

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InsufficientFunds));
    assert_eq!(accounts[DEPOSITOR_ATA].data, before);
    assert!(accounts[ESCROW_ATA].data.is_empty());
    assert!(accounts[BOOKKEEPING].data.is_empty());
}

#[test]
fn deposit_without_payer_token_account_is_insufficient_funds() {
    let payer = Pubkey::new_unique();
    let ix = instruction::deposit(&ID, &payer, 10).unwrap();
    let mut accounts = accounts_for(&ix);

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InsufficientFunds));
    assert!(accounts[DEPOSITOR_ATA].data.is_empty());
    assert!(accounts[BOOKKEEPING].data.is_empty());
}

#[test]
fn deposit_requires_payer_signature() {
    let payer = Pubkey::new_unique();
    let ix = instruction::deposit(&ID, &payer, 10).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[0].is_signer = false;

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::MissingSignature));
}

#[test]
fn deposit_rejects_escrow_of_another_depositor() {
    let payer = Pubkey::new_unique();
    let ix = instruction::deposit(&ID, &payer, 10).unwrap();
    let mut accounts = accounts_for(&ix);
    let (other_escrow, _) = find_escrow_address(&Pubkey::new_unique(), &ID).unwrap();
    accounts[ESCROW].key = other_escrow;

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InvalidDerivation));
}

#[test]
fn deposit_rejects_escrow_token_account_not_owned_by_escrow() {
    let payer = Pubkey::new_unique();
    let ix = instruction::deposit(&ID, &payer, 10).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[ESCROW_ATA].key = get_associated_token_address(&payer, &program_mint());

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InvalidDerivation));
}

#[test]
fn deposit_rejects_bookkeeping_recorded_for_someone_else() {
    let payer = Pubkey::new_unique();
    let ix = instruction::deposit(&ID, &payer, 10).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[DEPOSITOR_ATA].hold(spl_token::ID, packed_token_account(&payer, 50));
    accounts[BOOKKEEPING].hold(ID, bookkeeping_data(&payer, Pubkey::new_unique()));

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::UnauthorizedDepositor));
}

#[test]
fn withdraw_without_deposit_has_nothing_to_withdraw() {
    let ix = instruction::withdraw(&ID, &Pubkey::new_unique()).unwrap();
    let mut accounts = accounts_for(&ix);

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::NothingToWithdraw));
}

#[test]
fn withdraw_from_drained_escrow_has_nothing_to_withdraw() {
    let depositor = Pubkey::new_unique();
    let (escrow, _) = find_escrow_address(&depositor, &ID).unwrap();
    let ix = instruction::withdraw(&ID, &depositor).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[BOOKKEEPING].hold(ID, bookkeeping_data(&depositor, depositor));
    accounts[ESCROW_ATA].hold(spl_token::ID, packed_token_account(&escrow, 0));

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::NothingToWithdraw));
}

#[test]
fn withdraw_rejects_bookkeeping_recorded_for_someone_else() {
    let depositor = Pubkey::new_unique();
    let ix = instruction::withdraw(&ID, &depositor).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[BOOKKEEPING].hold(ID, bookkeeping_data(&depositor, Pubkey::new_unique()));

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::UnauthorizedDepositor));
}

#[test]
fn withdraw_rejects_substituted_escrow_authority() {
    let depositor = Pubkey::new_unique();
    let ix = instruction::withdraw(&ID, &depositor).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[BOOKKEEPING].hold(ID, bookkeeping_data(&depositor, depositor));
    accounts[ESCROW].key = Pubkey::new_unique();

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::InvalidDerivation));
}

#[test]
fn withdraw_requires_depositor_signature() {
    let depositor = Pubkey::new_unique();
    let ix = instruction::withdraw(&ID, &depositor).unwrap();
    let mut accounts = accounts_for(&ix);
    accounts[0].is_signer = false;

    let err = run(&mut accounts, &ix.data).unwrap_err();
    assert_eq!(custom(err), Some(VaultError::MissingSignature));
}
