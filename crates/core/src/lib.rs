pub mod analysis;
pub mod cache;
pub mod checker;
pub mod config;
pub mod contract;
pub mod diagnostic;
pub mod model;
pub mod report;
pub mod trace;

#[cfg(test)]
mod test_support;
