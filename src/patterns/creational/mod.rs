//! Creational patterns deal with the construction of objects:
//! explicit (constructors) vs implicit (injection), wholesale (one call) vs
//! piecewise (step by step).

pub mod builder;
pub mod factories;
pub mod prototype;
pub mod singleton;

use crate::config::CatalogConfig;
use crate::error::Result;

pub fn run(_config: &CatalogConfig) -> Result<()> {
    factories::run()?;
    builder::run()?;
    prototype::run()?;
    singleton::run();
    Ok(())
}
