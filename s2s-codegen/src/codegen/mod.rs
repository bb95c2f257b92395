//! Code generation module

mod code_generator;
mod model;
pub mod naming;
mod renderer;
mod template_selector;
mod type_mapper;

pub use code_generator::*;
pub use model::*;
pub use renderer::*;
pub use template_selector::*;
pub use type_mapper::*;
