//! Relcheck Core Types
//!
//! This crate provides the read-only schema object model that relcheck
//! validates. It includes:
//!
//! - **Ranges**: Source locations decoded from the IR encoding ([`range::Range`])
//! - **Values**: Free-form metadata values and literal wrappers ([`value`] module)
//! - **Schema**: Services, interfaces, methods, parameters, types and properties
//!   ([`schema`] module)

pub mod range;
pub mod schema;
pub mod value;
