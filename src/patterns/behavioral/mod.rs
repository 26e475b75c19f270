//! Behavioral patterns describe how objects hand work to each other.

pub mod chain_of_responsibility;
pub mod command;
pub mod interpreter;

use crate::config::CatalogConfig;
use crate::error::Result;

pub fn run(config: &CatalogConfig) -> Result<()> {
    chain_of_responsibility::run(config.chain.cash);
    command::run();
    interpreter::run()?;
    Ok(())
}
