//! Agent presentation components
//!
//! - Terminal confirmation for hazardous tools
//! - Console printer for agent events

pub mod confirmation;
pub mod events;

pub use confirmation::InteractiveConfirmation;
pub use events::ConsoleAgentEvents;
