mod authentication;
mod health_check;
mod inventory;
mod order;
mod profile;
mod promotion;

pub use authentication::*;
pub use health_check::*;
pub use inventory::*;
pub use order::*;
pub use profile::*;
pub use promotion::*;
