//! Arrow-text flow diagram: parser, graph store, edit state, canvas view and
//! PNG export.

mod component;
pub mod edit;
pub mod editor;
pub mod export;
pub mod parser;
mod render;
pub mod state;
pub mod store;
pub mod types;
pub mod viewport;

pub use component::FlowDiagram;
pub use editor::{FlowEditor, FlowEvent};
pub use export::{ExportOptions, export_png};
