pub mod create_mint;
pub mod deposit_tokens;
pub mod mint_to;
pub mod shared;
pub mod withdraw_tokens;

pub use create_mint::create_mint;
pub use deposit_tokens::deposit_tokens;
pub use mint_to::mint_to;
pub use withdraw_tokens::withdraw_tokens;
