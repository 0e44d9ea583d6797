// Gateway module for modes - follows the Train Station Pattern
// All external access must go through this gateway

mod registry;
mod templates;

pub use registry::{
    AnalysisMode, ForensicMode, ModeSpec, Profile, ProfileSpec, RockArtMode,
};
