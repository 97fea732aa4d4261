pub mod conf;
pub mod error;
pub mod pkg;
pub mod prelude;
