use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    pubkey::Pubkey,
    rent::Rent,
};
use solana_system_interface::instruction as system_instruction;

/// Creates a PDA account of `space` bytes owned by `owner`, funded by `payer`.
///
/// Anyone can send lamports to a derived address before it is created, and
/// `create_account` refuses an address that already holds lamports. A funded
/// address is therefore topped up to the rent minimum, then allocated and
/// assigned with the PDA signing each step.
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    target: &AccountInfo<'a>,
    system_prog: &AccountInfo<'a>,
    rent: &Rent,
    space: usize,
    owner: &Pubkey,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let required = rent.minimum_balance(space);
    let current = target.lamports();

    if current == 0 {
        return invoke_signed(
            &system_instruction::create_account(
                payer.key,
                target.key,
                required,
                space as u64,
                owner,
            ),
            &[payer.clone(), target.clone(), system_prog.clone()],
            &[signer_seeds],
        );
    }

    msg!("{} already holds {} lamports", target.key, current);
    let top_up = required.saturating_sub(current);
    if top_up > 0 {
        invoke(
            &system_instruction::transfer(payer.key, target.key, top_up),
            &[payer.clone(), target.clone(), system_prog.clone()],
        )?;
    }
    invoke_signed(
        &system_instruction::allocate(target.key, space as u64),
        &[target.clone(), system_prog.clone()],
        &[signer_seeds],
    )?;
    invoke_signed(
        &system_instruction::assign(target.key, owner),
        &[target.clone(), system_prog.clone()],
        &[signer_seeds],
    )
}
