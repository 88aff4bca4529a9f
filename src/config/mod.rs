//! JSON configuration for the `angle_inspector` binary.

pub mod inspect;

pub use inspect::{load_config, CannyConfig, HoughConfig, InspectConfig};
