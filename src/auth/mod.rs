pub mod extractors;
pub mod jwt;

pub use extractors::CustomerContext;
pub use jwt::{Tokenizer, UserRole};
