//! Arithmetic tools:
//! - `add`: sum of two numbers
//! - `calculate`: one of the four basic operations

pub mod add;
pub mod calculate;

pub use add::{AddParams, AddTool};
pub use calculate::{CalculateParams, CalculateTool, Operation};
