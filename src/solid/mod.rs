//! SOLID principles, each shown as a "before" and "after" pair.
//!
//! - single responsibility: one reason to change per type
//! - open-closed: open for extension, closed for modification
//! - Liskov substitution: subtypes must honour the base contract
//! - interface segregation: small, specific traits over general purpose ones
//! - dependency inversion: depend on abstractions, not on details

pub mod dependency_inversion;
pub mod interface_segregation;
pub mod liskov_substitution;
pub mod open_closed;
pub mod single_responsibility;

use crate::config::CatalogConfig;
use crate::error::Result;

pub fn run(config: &CatalogConfig) -> Result<()> {
    single_responsibility::run(&config.journal.path)?;
    open_closed::run();
    liskov_substitution::run();
    interface_segregation::run()?;
    dependency_inversion::run();
    Ok(())
}
