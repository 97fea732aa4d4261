pub mod filter;
pub mod format;
pub mod pagination;
pub mod service;

#[cfg(test)]
mod tests;
