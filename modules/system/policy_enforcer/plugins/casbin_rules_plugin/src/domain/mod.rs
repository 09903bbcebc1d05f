pub mod client;
pub mod enforcer;
pub mod service;

pub use enforcer::{CasbinEnforcer, ModelSource};
pub use service::Service;
