// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for floor-plan input handling.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the editor/engine boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wall floors are 1-based; floor 0 does not exist.
    #[error("invalid floor index {0}: floors are numbered from 1")]
    InvalidFloor(u32),

    /// Pixels-per-meter must be a positive finite number.
    #[error("invalid plan scale: {0} pixels per meter")]
    InvalidScale(f64),

    /// The `currentFloors` entry is missing or not a non-negative integer.
    #[error("invalid floor count: {0}")]
    InvalidFloorCount(String),

    /// The editor export is not shaped like a floor store.
    #[error("invalid editor store: {0}")]
    InvalidStore(String),

    /// A floor below `currentFloors` has no stored document.
    #[error("floor {0} has no stored document")]
    MissingFloor(u32),

    /// Malformed editor JSON.
    #[error("editor document error: {0}")]
    Json(#[from] serde_json::Error),
}
