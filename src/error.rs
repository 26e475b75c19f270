//! Error types shared across the catalogue.
//!
//! Most demos cannot fail. The ones that can define a small error enum next to
//! their types and convert into [`CatalogError`] so the driver only has one
//! error type to report.

use thiserror::Error;

use crate::patterns::behavioral::interpreter::ParseError;
use crate::patterns::creational::builder::{CarSpecError, QueryError};
use crate::patterns::creational::factories::DrinkError;
use crate::patterns::structural::adapter::RasterError;
use crate::patterns::structural::composite::NetworkError;
use crate::solid::interface_segregation::DeviceError;
use crate::solid::single_responsibility::JournalError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error (TOML): {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error (JSON): {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error (bincode): {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown section '{0}' (expected solid, creational, structural or behavioral)")]
    UnknownSection(String),

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    CarSpec(#[from] CarSpecError),

    #[error(transparent)]
    Drink(#[from] DrinkError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
