//! Signal generation: an AI completion provider with a deterministic local
//! fallback. AI failures never surface past [`SignalEngine`]; they degrade to
//! the heuristic and get logged.

pub mod ai;
pub mod engine;
pub mod fallback;

pub use ai::{AiConfig, AiModel, AiSignalProvider};
pub use engine::SignalEngine;
pub use fallback::heuristic_signal;
