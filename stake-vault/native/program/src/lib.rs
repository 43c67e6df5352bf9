#![allow(unexpected_cfgs)]

//! Native stake vault: escrows lamports for a single depositor in a
//! program-derived account and tracks the custodied amount in a ledger account.

pub mod instruction;
pub mod instructions;
pub mod processor;
pub mod state;

solana_program::declare_id!("Dz7o637QcMegvQxRzsXCHc2uVz75bN8nhCDjR1CpaBVQ");

#[cfg(not(feature = "no-entrypoint"))]
use crate::processor::process_instruction;

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);
