pub mod balance_of_token;
pub mod create_instance;
pub mod initialize;
pub mod initialize_factory;
pub mod redeem_token;
pub mod set_operator;
pub mod sponsor;
pub mod supply_token_to;
pub mod transfer_incidental_asset;
pub mod transfer_ownership;

pub use balance_of_token::*;
pub use create_instance::*;
pub use initialize::*;
pub use initialize_factory::*;
pub use redeem_token::*;
pub use set_operator::*;
pub use sponsor::*;
pub use supply_token_to::*;
pub use transfer_incidental_asset::*;
pub use transfer_ownership::*;
