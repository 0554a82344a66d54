//! CLI command implementations

mod classes;
mod config_gen;
mod migrate;
mod report;

pub use classes::*;
pub use config_gen::*;
pub use migrate::*;
pub use report::*;
