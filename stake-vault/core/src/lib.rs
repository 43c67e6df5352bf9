//! Building blocks shared by the native and SPL stake vault programs: address
//! derivation, account validation and the custom error set.

pub mod account;
pub mod error;
pub mod pda;
pub mod validation;

pub use error::VaultError;
