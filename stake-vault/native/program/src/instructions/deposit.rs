use crate::state::Ledger;
use solana_program::{
    account_info::{AccountInfo, next_account_info},
    entrypoint::ProgramResult,
    msg,
    program::invoke,
    pubkey::Pubkey,
    sysvar::{Sysvar, rent::Rent},
};
use solana_system_interface::{instruction as system_instruction, program as system_program};
use stake_vault_core::{
    account::create_pda_account,
    pda::{EscrowAuthority, LedgerSeeds},
    validation::{
        assert_derived, assert_nonzero, assert_owned_by, assert_program, assert_signer,
        assert_writable,
    },
};

/// Accounts:
/// [signer, writable depositor]
/// [writable escrow]
/// [writable ledger]
/// [readonly system program]
pub fn deposit(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
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
    assert_nonzero(amount)?;

    let (escrow_pda, escrow_authority) = EscrowAuthority::find(depositor.key, program_id)?;
    assert_derived(escrow, &escrow_pda)?;
    assert_owned_by(escrow, &system_program::ID)?;

    let (ledger_pda, ledger_seeds) = LedgerSeeds::find(depositor.key, program_id)?;
    assert_derived(ledger, &ledger_pda)?;

    let create_ledger = ledger.data_is_empty();
    let mut state = if create_ledger {
        Ledger::new(*depositor.key, ledger_seeds.bump(), escrow_authority.bump())
    } else {
        Ledger::load(ledger, program_id, depositor.key)?
    };
    // Overflow must surface before any lamports move.
    let balance = state.credit(amount)?;

    let rent = Rent::get()?;

    // The escrow is a data-less system account; keep it rent exempt so the
    // custodied lamports are never swept.
    let floor = rent.minimum_balance(0);
    if escrow.lamports() < floor {
        msg!("Funding escrow rent floor");
        invoke(
            &system_instruction::transfer(depositor.key, escrow.key, floor - escrow.lamports()),
            &[depositor.clone(), escrow.clone(), system_prog.clone()],
        )?;
    }

    if create_ledger {
        msg!("Creating ledger account for {}", depositor.key);
        create_pda_account(
            depositor,
            ledger,
            system_prog,
            &rent,
            Ledger::LEN,
            program_id,
            &ledger_seeds.signer_seeds(),
        )?;
    }

    invoke(
        &system_instruction::transfer(depositor.key, escrow.key, amount),
        &[depositor.clone(), escrow.clone(), system_prog.clone()],
    )?;

    state.store(ledger)?;
    msg!("Deposit {} lamports to stake escrow, balance {}", amount, balance);
    Ok(())
}
