//! Configuration: settings file, tech stack and input validation

pub mod defaults;
mod settings;
mod tech_stack;
pub mod validation;

pub use settings::*;
pub use tech_stack::*;
