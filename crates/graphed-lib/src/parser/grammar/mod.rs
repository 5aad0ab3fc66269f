//! Grammar productions, written as `parse_*` methods on `Parser`.
//!
//! - `definitions`: top-level dispatch and executable definitions
//! - `selections`: selection sets, arguments and directive applications
//! - `type_system`: schema, type and directive definitions
//! - `values`: input values and type references

mod definitions;
mod selections;
mod type_system;
mod values;
