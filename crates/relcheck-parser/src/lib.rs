//! # Relcheck Parser
//!
//! Parsing and validation of `rel` relationship annotations. Authors mark
//! schema elements as primary keys, foreign keys or edges:
//!
//! ```json
//! { "primaryKey": true }
//! { "foreignKey": { "type": "widget", "property": "id", "many": false } }
//! { "edge": ["buyerId", "sellerId"] }
//! ```
//!
//! The pipeline for one annotation is:
//!
//! 1. **Locate** - find the `rel` metadata entry on the element
//! 2. **Shape** - check the value's structure in isolation
//! 3. **Resolve** - cross-reference the declared relationship against the
//!    document
//!
//! [`rule::collect`] runs that pipeline over a whole document.
//!
//! ## Usage
//!
//! ```
//! # use relcheck_core::schema::{MetaEntry, Property, Service, Type};
//! # use relcheck_core::value::MetaValue;
//! let service = Service::new("orders.json").with_type(
//!     Type::new("order")
//!         .with_property(Property::new("id").with_meta(MetaEntry::new(
//!             "rel",
//!             MetaValue::object([("primaryKey", MetaValue::from("yes"))]),
//!         ))),
//! );
//!
//! let diagnostics = relcheck_parser::check(&service);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].code().as_str(), "rel/type");
//! ```

mod cache;
mod descriptor;
mod query;
mod rel;
mod shape;

pub mod error;
pub mod rule;

pub use descriptor::{Edge, ForeignKey, ParseResult, Relationship};
pub use query::RelQuery;
pub use rel::{MAX_RESOLVE_DEPTH, ParserStats, REL_KEY, RelParser, parse, source_range};
pub use rule::check;
