pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod gke;
pub mod installer;
#[cfg(test)]
pub mod tests;
