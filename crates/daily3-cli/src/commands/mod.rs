pub mod account;
pub mod add;
pub mod category;
pub mod delete;
pub mod disrupt;
pub mod done;
pub mod dump;
pub mod edit;
pub mod focus;
pub mod list;
pub mod note;
pub mod plan;
pub mod reclaim;
pub mod streak;
