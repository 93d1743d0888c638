//! Diagram model consumed by placement and re-anchoring
//!
//! The model itself is owned by the host application. This module provides
//! the read access the geometry code needs, the mutation contract
//! ([`Modeling`]) placement goes through, and a small in-memory
//! implementation of both ([`Diagram`]).

pub mod diagram;
pub mod error;
pub mod selection;
pub mod types;

pub use diagram::{AppendHints, Diagram, Modeling};
pub use error::ModelError;
pub use selection::{Selection, SelectionSet};
pub use types::{Connection, ConnectionId, Shape, ShapeId};
