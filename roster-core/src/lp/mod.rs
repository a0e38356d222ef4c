//! LP text codec: the wire format handed to MIP solver backends.

pub mod model;

pub use model::{Constraint, LpModel, Sense};
