//! The relationship parsing engine.
//!
//! [`RelParser`] is a validation session bound to one [`Service`]. It turns
//! the `rel` annotation of a parameter, type or property into a
//! [`ParseResult`] in two stages:
//!
//! 1. **Shape** - the annotation value is checked on its own (see
//!    [`shape`](crate::shape)). Any problem stops here.
//! 2. **References** - the declared relationship is resolved against the
//!    document. Foreign keys must point at a primary key, edges must link
//!    two foreign keys of the annotated type.
//!
//! Results are memoized per element for the lifetime of the session. Every
//! element handed to a session is borrowed for that same lifetime, so an
//! element's address identifies it for as long as its cache entry exists.
//!
//! # Recursion
//!
//! Resolving a foreign key validates its target property again, without the
//! cache, to learn whether that target is a primary key. Resolving an edge
//! looks up both endpoints through the cache. Well-formed schemas never nest
//! deeper than two levels; foreign keys that point at each other would, so
//! every resolution carries a depth and gives up past [`MAX_RESOLVE_DEPTH`].

use std::{
    cell::Cell,
    path::{Component, Path, PathBuf},
};

use log::{debug, trace, warn};

use relcheck_core::{
    range::Range,
    schema::{Annotated, Service},
};

use crate::{
    cache::{CacheState, ElementKey, RelCache},
    descriptor::{Edge, ForeignKey, ParseResult, Relationship},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    shape,
};

/// Metadata key holding relationship annotations.
pub const REL_KEY: &str = "rel";

/// Deepest nesting of reference resolution before giving up.
pub const MAX_RESOLVE_DEPTH: usize = 4;

/// Counters describing the work a session has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Lookups answered from the cache.
    pub cache_hits: usize,
    /// Lookups that had to parse the element.
    pub cache_misses: usize,
    /// Type-by-name lookups made while resolving foreign keys.
    pub type_lookups: usize,
}

/// A relationship validation session over one document.
///
/// # Example
///
/// ```
/// # use relcheck_core::schema::{Interface, MetaEntry, Method, Parameter, Service};
/// # use relcheck_core::value::MetaValue;
/// # use relcheck_parser::{ForeignKey, RelParser};
/// let param = Parameter::new("widgetId").with_meta(MetaEntry::new(
///     "rel",
///     MetaValue::object([(
///         "foreignKey",
///         MetaValue::object([("type", MetaValue::from("widget")), ("property", MetaValue::from("id"))]),
///     )]),
/// ));
/// let service = Service::new("api.json")
///     .with_interface(Interface::new("widgets").with_method(Method::new("get").with_parameter(param)));
///
/// let parser = RelParser::new(&service);
/// let param = &service.interfaces()[0].methods()[0].parameters()[0];
///
/// assert_eq!(parser.foreign_key(param), Some(ForeignKey::new("widget", "id", false)));
/// ```
#[derive(Debug)]
pub struct RelParser<'a> {
    service: &'a Service,
    source_path: PathBuf,
    cache: RelCache,
    stats: Cell<ParserStats>,
}

impl<'a> RelParser<'a> {
    /// Start a session over `service`.
    pub fn new(service: &'a Service) -> Self {
        let declared = Path::new(service.source_path());
        let source_path = std::path::absolute(declared)
            .map(|path| normalize(&path))
            .unwrap_or_else(|err| {
                debug!(path = service.source_path(), err:% = err; "Could not absolutize source path");
                declared.to_path_buf()
            });

        Self {
            service,
            source_path,
            cache: RelCache::default(),
            stats: Cell::new(ParserStats::default()),
        }
    }

    /// The document this session validates.
    pub fn service(&self) -> &'a Service {
        self.service
    }

    /// Absolute path reported on every diagnostic.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Parse the `rel` annotation of `element`.
    ///
    /// Returns `None` when the element has no annotation at all; that is not
    /// an error. Repeated calls for the same element are answered from the
    /// cache without resolving references again.
    ///
    /// Elements must be borrowed for the whole session; a temporary that is
    /// dropped before the session ends is rejected:
    ///
    /// ```compile_fail
    /// # use relcheck_core::schema::Property;
    /// # use relcheck_parser::RelParser;
    /// fn ask(parser: &RelParser<'_>) -> bool {
    ///     let temporary = Property::new("id");
    ///     parser.is_primary_key(&temporary)
    /// }
    /// ```
    pub fn parse(&self, element: &'a dyn Annotated) -> Option<ParseResult> {
        self.parse_at(element, 0)
    }

    pub fn is_primary_key(&self, element: &'a dyn Annotated) -> bool {
        matches!(self.relationship(element), Some(Relationship::PrimaryKey))
    }

    pub fn is_foreign_key(&self, element: &'a dyn Annotated) -> bool {
        matches!(self.relationship(element), Some(Relationship::ForeignKey(_)))
    }

    pub fn is_edge(&self, element: &'a dyn Annotated) -> bool {
        matches!(self.relationship(element), Some(Relationship::Edge(_)))
    }

    /// The validated foreign key declared by `element`, if any.
    pub fn foreign_key(&self, element: &'a dyn Annotated) -> Option<ForeignKey> {
        self.foreign_key_at(element, 0)
    }

    /// The validated edge declared by `element`, if any.
    pub fn edge(&self, element: &'a dyn Annotated) -> Option<Edge> {
        match self.relationship(element)? {
            Relationship::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    /// Range of the annotation on `element`, valid or not.
    pub fn source_range(&self, element: &dyn Annotated) -> Range {
        source_range(element)
    }

    pub fn stats(&self) -> ParserStats {
        self.stats.get()
    }

    /// Number of elements with a cached outcome.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Forget every cached outcome.
    pub fn clear(&self) {
        self.cache.clear();
    }

    fn relationship(&self, element: &'a dyn Annotated) -> Option<Relationship> {
        self.parse(element)?.into_relationship()
    }

    fn foreign_key_at(&self, element: &'a dyn Annotated, depth: usize) -> Option<ForeignKey> {
        match self.parse_at(element, depth)?.into_relationship()? {
            Relationship::ForeignKey(fk) => Some(fk),
            _ => None,
        }
    }

    fn parse_at(&self, element: &'a dyn Annotated, depth: usize) -> Option<ParseResult> {
        let key = ElementKey::of(element);
        match self.cache.lookup(key) {
            CacheState::Absent => {
                self.record(|stats| stats.cache_hits += 1);
                return None;
            }
            CacheState::Computed(result) => {
                self.record(|stats| stats.cache_hits += 1);
                return Some(result);
            }
            CacheState::NotComputed => {}
        }

        self.record(|stats| stats.cache_misses += 1);
        trace!(element = element.name(), kind:% = element.kind(); "Parsing relationship");

        let result = self.resolve(element, depth);
        self.cache.store(key, result.as_ref());
        result
    }

    /// Parse and validate without consulting or filling the cache.
    fn resolve(&self, element: &'a dyn Annotated, depth: usize) -> Option<ParseResult> {
        let entry = element.annotation(REL_KEY)?;
        let reporter = Reporter {
            range: entry.value.range(),
            source_path: &self.source_path,
        };

        if depth > MAX_RESOLVE_DEPTH {
            warn!(element = element.name(), depth; "Relationship references nest too deeply");
            return Some(ParseResult::invalid(vec![reporter.reference(format!(
                "Relationship of \"{}\" references nest deeper than {MAX_RESOLVE_DEPTH} levels.",
                element.name()
            ))]));
        }

        let declared = match shape::check(&entry.value.value) {
            Ok(declared) => declared,
            Err(violations) => {
                debug!(
                    element = element.name(),
                    found = entry.value.value.kind_name(),
                    count = violations.len();
                    "Malformed relationship"
                );
                return Some(ParseResult::invalid(
                    violations
                        .iter()
                        .map(|violation| reporter.shape(violation.to_string()))
                        .collect(),
                ));
            }
        };

        let mut collector = DiagnosticCollector::new();
        match &declared {
            Relationship::PrimaryKey => {}
            Relationship::ForeignKey(fk) => {
                self.check_foreign_key(fk, depth, &reporter, &mut collector)
            }
            Relationship::Edge(edge) => {
                self.check_edge(element, edge, depth, &reporter, &mut collector)
            }
        }

        if collector.is_empty() {
            trace!(element = element.name(), relationship:% = declared; "Relationship resolved");
            Some(ParseResult::valid(declared))
        } else {
            Some(ParseResult::invalid(collector.into_diagnostics()))
        }
    }

    fn check_foreign_key(
        &self,
        fk: &ForeignKey,
        depth: usize,
        reporter: &Reporter<'_>,
        collector: &mut DiagnosticCollector,
    ) {
        self.record(|stats| stats.type_lookups += 1);
        let Some(target) = self.service.type_by_name(&fk.type_name) else {
            debug!(type_name = fk.type_name.as_str(); "Foreign key names an unknown type, accepting");
            return;
        };

        let Some(property) = target.property(&fk.property) else {
            collector.emit(reporter.reference(format!(
                "Property \"{}\" does not exist on type \"{}\".",
                fk.property, fk.type_name
            )));
            return;
        };

        let target_kind = self
            .resolve(property, depth + 1)
            .and_then(ParseResult::into_relationship);
        if !matches!(target_kind, Some(Relationship::PrimaryKey)) {
            collector.emit(reporter.reference(format!(
                "Property \"{}\" on type \"{}\" must be a primary key.",
                fk.property, fk.type_name
            )));
        }
    }

    fn check_edge(
        &self,
        element: &'a dyn Annotated,
        edge: &Edge,
        depth: usize,
        reporter: &Reporter<'_>,
        collector: &mut DiagnosticCollector,
    ) {
        let Some(ty) = element.as_type() else {
            collector.emit(reporter.reference(format!(
                "\"rel/edge\" may only be defined on a type, but \"{}\" is a {}.",
                element.name(),
                element.kind()
            )));
            return;
        };

        for endpoint in [&edge.endpoints.0, &edge.endpoints.1] {
            match ty.property(endpoint) {
                None => collector.emit(reporter.reference(format!(
                    "Property \"{endpoint}\" does not exist on type \"{}\".",
                    ty.name()
                ))),
                Some(property) => {
                    if self.foreign_key_at(property, depth + 1).is_none() {
                        collector.emit(reporter.reference(format!(
                            "Property \"{endpoint}\" does not explicitly define a foreign key."
                        )));
                    }
                }
            }
        }
    }

    fn record(&self, update: impl FnOnce(&mut ParserStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

/// Builds diagnostics located at the annotation being parsed.
struct Reporter<'p> {
    range: Range,
    source_path: &'p Path,
}

impl Reporter<'_> {
    fn shape(&self, message: String) -> Diagnostic {
        self.diagnostic(ErrorCode::Shape, message)
    }

    fn reference(&self, message: String) -> Diagnostic {
        self.diagnostic(ErrorCode::Reference, message)
    }

    fn diagnostic(&self, code: ErrorCode, message: String) -> Diagnostic {
        Diagnostic::warning(code, message)
            .with_range(self.range)
            .with_source_path(self.source_path)
    }
}

/// Parse the annotation of `element` in a one-off session.
///
/// Prefer a long-lived [`RelParser`] when querying many elements of the same
/// document; this shorthand starts with an empty cache every time.
pub fn parse<'a>(element: &'a dyn Annotated, service: &'a Service) -> Option<ParseResult> {
    RelParser::new(service).parse(element)
}

/// Range of the `rel` annotation on `element`.
///
/// Elements without an annotation report the default range.
pub fn source_range(element: &dyn Annotated) -> Range {
    element
        .annotation(REL_KEY)
        .map(|entry| entry.value.range())
        .unwrap_or_default()
}

/// Resolve `.` and `..` components without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
