//! Configuration schema types for Study Buddy.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the chat client ships with.

mod model;
mod persona;
mod system;

pub use model::*;
pub use persona::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Study Buddy.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct StudyBuddyConfig {
    pub model: ModelConfig,
    pub generation: GenerationConfig,
    pub persona: PersonaConfig,
    pub logging: LoggingConfig,
}
