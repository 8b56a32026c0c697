//! Tree, push, pull and data-binding XML parsing strategies, measured side by
//! side and rendered to HTML through one shared stylesheet.

mod compare;
mod config;
mod documents;
pub mod dom;
pub mod events;
mod generator;
pub mod logger;
pub mod measure;
mod outcome;
mod reader;
mod strategies;
mod transform;
mod xml_builder;

pub use compare::*;
pub use config::*;
pub use documents::*;
pub use generator::*;
pub use measure::PeakAlloc;
pub use outcome::*;
pub use reader::*;
pub use strategies::*;
pub use transform::*;
