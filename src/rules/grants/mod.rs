mod admin_override;
mod ownership;
mod role;

pub use admin_override::AdminOverrideRule;
pub use ownership::OwnershipRule;
pub use role::RoleMembershipRule;
