pub mod deposit;
pub mod withdraw;

pub use deposit::deposit;
pub use withdraw::withdraw;
