mod contract;
mod mac;
mod time_window;

pub use contract::{ContractCutoff, ContractExpiryRule};
pub use mac::ClearanceRule;
pub use time_window::TimeWindowRule;
