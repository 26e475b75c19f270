//! Structural patterns are about how types and objects are composed:
//! wrappers, bridges, trees and stand-ins.

pub mod adapter;
pub mod bridge;
pub mod composite;
pub mod decorator;
pub mod facade;
pub mod flyweight;
pub mod proxy;

use crate::config::CatalogConfig;
use crate::error::Result;

pub fn run(config: &CatalogConfig) -> Result<()> {
    adapter::run()?;
    bridge::run();
    composite::run()?;
    decorator::run();
    facade::run(&config.facade);
    flyweight::run();
    proxy::run(config.proxy.preview_last_page);
    Ok(())
}
