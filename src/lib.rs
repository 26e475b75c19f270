//! # Design Patterns Catalogue
//!
//! Gang-of-Four patterns and SOLID principles, each as a small self-contained
//! demo that prints to standard output.
//!
//! ## Sections
//!
//! 1. **SOLID principles**
//!    - single responsibility, open-closed, Liskov substitution,
//!      interface segregation, dependency inversion
//!
//! 2. **Creational patterns**
//!    - factories, builder, prototype, singleton
//!
//! 3. **Structural patterns**
//!    - adapter, bridge, composite, decorator, facade, flyweight, proxy
//!
//! 4. **Behavioral patterns**
//!    - chain of responsibility, command, interpreter
//!
//! ## Running
//!
//! ```bash
//! cargo run                               # everything
//! cargo run -- structural behavioral      # selected sections
//! cargo run -- --config catalog.toml      # settings from a file
//! RUST_LOG=debug cargo run -- structural  # cache hits, proxy access log
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod patterns;
pub mod solid;

pub use config::{CatalogConfig, Section};
pub use error::{CatalogError, Result};

/// Runs every enabled section in catalogue order.
pub fn run(config: &CatalogConfig) -> Result<()> {
    config.validate()?;
    console::set_color(config.run.color);
    console::banner("GOF Design Patterns");

    for section in config.enabled_sections() {
        console::section(&section.to_string());
        log::debug!("running section {section:?}");
        match section {
            Section::Solid => solid::run(config)?,
            Section::Creational => patterns::creational::run(config)?,
            Section::Structural => patterns::structural::run(config)?,
            Section::Behavioral => patterns::behavioral::run(config)?,
        }
    }

    Ok(())
}
