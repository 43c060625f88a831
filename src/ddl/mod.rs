//! DDL synthesis for virtual tables and stored functions.
//!
//! Callers describe what they want through small builders
//! ([`ViewDefinition`], [`MappingDefinition`], [`ParamDefinition`]) handed to
//! a closure; [`DdlSynthesizer`] checks the target's [`Capabilities`], renders
//! the statement for the dialect and submits it.

pub mod error;
pub mod kind;
pub mod mapping;
pub mod params;
pub mod synthesizer;
pub mod view;

pub use error::{DdlError, DdlOutcome};
pub use kind::{Capabilities, Feature, FunctionOptions, VirtualTableKind, VirtualTableOptions};
pub use mapping::MappingDefinition;
pub use params::{Param, ParamDefinition, ParamDirection};
pub use synthesizer::DdlSynthesizer;
pub use view::ViewDefinition;
