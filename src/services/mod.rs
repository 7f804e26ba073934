//! Business rules of the storefront, written against the repository ports.

pub mod catalog;
pub mod feedback;
pub mod lifecycle;
pub mod pricing;
pub mod profile;
pub mod promotion;
pub mod receipt;

#[cfg(test)]
pub(crate) mod memory_store;
