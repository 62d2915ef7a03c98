//! Domain models

pub mod enums;
pub mod gate_pass;
pub mod visitor;

pub use enums::{Purpose, VisitorStatus};
pub use gate_pass::GatePass;
pub use visitor::{PhotoData, RegisterVisitor, UpdateVisitor, Visitor};
