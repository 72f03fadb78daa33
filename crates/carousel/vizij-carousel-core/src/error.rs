//! Errors raised at the construction boundary.
//!
//! Runtime navigation and gesture handling never fail: invalid calls are ignored
//! and leave state unchanged. Only parsing host settings and registering
//! instances can produce an error.

use thiserror::Error;

use crate::ids::ContainerId;

/// Errors produced while parsing or validating host [`Settings`](crate::Settings).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("autoplay speed must be greater than zero when autoplay is enabled")]
    InvalidAutoplaySpeed,
}

/// Errors produced by the [`CarouselRegistry`](crate::CarouselRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a live carousel is already registered for container '{0}'")]
    AlreadyRegistered(ContainerId),
}

/// Umbrella error for hosts that construct and register carousels in one step.
#[derive(Debug, Error)]
pub enum CarouselError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
