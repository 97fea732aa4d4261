pub mod adaptors;
pub mod catalog;
pub mod search;
pub mod seed;
pub mod store;
