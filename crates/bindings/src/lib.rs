//! Parameter Binding Table: maps named, typed, range-constrained controls
//! onto fields of live scene entities.
//!
//! # Invariants
//! - An edit is one synchronous mutation of exactly one field, plus an
//!   optional helper refresh.
//! - Numeric values are clamped and snapped by the control before they reach
//!   [`BindingTable::apply_edit`]; the table does not re-validate.
//! - Bindings reference entities by name and never own them.

pub mod audit;
pub mod field;
pub mod preset;
pub mod range;
pub mod table;

pub use audit::{AuditFinding, RangeConfigError};
pub use field::{Field, Value};
pub use range::Range;
pub use table::{BindError, BindingId, BindingTable, Control, ControlBinding, OnApply};
