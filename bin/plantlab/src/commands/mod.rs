pub mod batches;
pub mod context;
pub mod login;
pub mod registry;
pub mod resource;
