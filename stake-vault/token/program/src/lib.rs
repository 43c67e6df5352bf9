#![allow(unexpected_cfgs)]

//! SPL stake vault: owns a single program-derived mint with Metaplex metadata,
//! mints it on request, and escrows it per depositor under a program-derived
//! authority.

pub mod instruction;
pub mod instructions;
pub mod processor;
pub mod state;

solana_program::declare_id!("2Eo9UVoqGqPjmHLmFAL3vrGKSXJhHnhDhGVGqbRa45SD");

#[cfg(not(feature = "no-entrypoint"))]
use crate::processor::process_instruction;

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);
