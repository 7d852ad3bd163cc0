//! Editor model: node/edge store, selection controller and sidebar grouping.
//!
//! Nothing in this module touches the DOM, so the whole editor state machine
//! runs (and is tested) on native targets.

pub mod changes;
pub mod error;
pub mod layout;
pub mod selection;
pub mod sidebar;
pub mod store;
pub mod types;

pub use changes::{EdgeChange, NodeChange};
pub use error::GraphError;
pub use selection::{EditorKey, EditorSelection};
pub use store::FlowStore;
pub use types::{Connection, EdgeId, FlowEdge, FlowNode, GraphData, NodeId, NodeKind, Position};
