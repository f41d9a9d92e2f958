//! Structural validation of `rel` annotation values.
//!
//! This stage looks only at the annotation value itself. It never consults
//! the schema, so a value that passes here still needs its references
//! checked before it becomes a [`Relationship`].

use std::fmt;

use relcheck_core::value::MetaValue;

use crate::descriptor::{Edge, ForeignKey, Relationship};

const PRIMARY_KEY: &str = "primaryKey";
const FOREIGN_KEY: &str = "foreignKey";
const EDGE: &str = "edge";

/// A structural problem with an annotation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShapeViolation {
    NotAnObject,
    PrimaryKeyNotBoolean,
    ForeignKeyNotObject,
    ForeignKeyTypeNotString,
    ForeignKeyPropertyNotString,
    ForeignKeyManyNotBoolean,
    ForeignKeyExtraKeys,
    EdgeNotArray,
    EdgeLength,
    EdgeNotStrings,
    NotExclusive,
}

impl fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ShapeViolation::NotAnObject => r#""rel" must be an object if provided."#,
            ShapeViolation::PrimaryKeyNotBoolean => {
                r#""rel/primaryKey" must be a boolean if provided."#
            }
            ShapeViolation::ForeignKeyNotObject => r#""rel/foreignKey" must be an object if provided."#,
            ShapeViolation::ForeignKeyTypeNotString => r#""rel/foreignKey/type" must be a string."#,
            ShapeViolation::ForeignKeyPropertyNotString => {
                r#""rel/foreignKey/property" must be a string."#
            }
            ShapeViolation::ForeignKeyManyNotBoolean => {
                r#""rel/foreignKey/many" must be a boolean if provided."#
            }
            ShapeViolation::ForeignKeyExtraKeys => {
                r#""rel/foreignKey" may only define "type", "property", and "many". Additional properties are prohibited."#
            }
            ShapeViolation::EdgeNotArray => r#""rel/edge" must be an array if provided."#,
            ShapeViolation::EdgeLength => r#""rel/edge" must have a length of 2."#,
            ShapeViolation::EdgeNotStrings => r#""rel/edge" may only contain strings."#,
            ShapeViolation::NotExclusive => {
                r#""rel" must define only one of "primaryKey", "foreignKey", or "edge". Additional properties are prohibited."#
            }
        };
        f.write_str(message)
    }
}

/// Check the structure of a `rel` value and extract the declared relationship.
///
/// All per-branch problems are collected. The exclusivity check runs after
/// them regardless, so one malformed annotation can yield several
/// overlapping violations.
pub(crate) fn check(value: &MetaValue) -> Result<Relationship, Vec<ShapeViolation>> {
    let Some(rel) = value.as_object() else {
        return Err(vec![ShapeViolation::NotAnObject]);
    };

    let primary_key = rel.get(PRIMARY_KEY);
    let foreign_key = rel.get(FOREIGN_KEY);
    let edge = rel.get(EDGE);

    let mut violations = Vec::new();

    if primary_key.is_some_and(|pk| pk.as_bool().is_none()) {
        violations.push(ShapeViolation::PrimaryKeyNotBoolean);
    }
    if let Some(fk) = foreign_key {
        check_foreign_key(fk, &mut violations);
    }
    if let Some(edge) = edge {
        check_edge(edge, &mut violations);
    }

    let declared = [primary_key, foreign_key, edge]
        .into_iter()
        .filter(|value| value.is_some_and(MetaValue::is_truthy))
        .count();
    let has_extra_keys = rel
        .keys()
        .any(|key| !matches!(key.as_str(), PRIMARY_KEY | FOREIGN_KEY | EDGE));
    if declared != 1 || has_extra_keys {
        violations.push(ShapeViolation::NotExclusive);
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    if primary_key.is_some_and(MetaValue::is_truthy) {
        return Ok(Relationship::PrimaryKey);
    }
    if let Some(fk) = foreign_key.and_then(MetaValue::as_object) {
        let type_name = fk.get("type").and_then(MetaValue::as_str);
        let property = fk.get("property").and_then(MetaValue::as_str);
        let many = fk.get("many").and_then(MetaValue::as_bool).unwrap_or(false);
        if let (Some(type_name), Some(property)) = (type_name, property) {
            return Ok(Relationship::ForeignKey(ForeignKey::new(
                type_name, property, many,
            )));
        }
    }
    if let Some([MetaValue::String(from), MetaValue::String(to)]) =
        edge.and_then(MetaValue::as_array)
    {
        return Ok(Relationship::Edge(Edge::new(from.as_str(), to.as_str())));
    }

    // Exactly one truthy kind passed its branch checks above.
    Err(vec![ShapeViolation::NotExclusive])
}

fn check_foreign_key(value: &MetaValue, violations: &mut Vec<ShapeViolation>) {
    let Some(fk) = value.as_object() else {
        violations.push(ShapeViolation::ForeignKeyNotObject);
        return;
    };

    if fk.get("type").and_then(MetaValue::as_str).is_none() {
        violations.push(ShapeViolation::ForeignKeyTypeNotString);
    }
    if fk.get("property").and_then(MetaValue::as_str).is_none() {
        violations.push(ShapeViolation::ForeignKeyPropertyNotString);
    }
    if fk.get("many").is_some_and(|many| many.as_bool().is_none()) {
        violations.push(ShapeViolation::ForeignKeyManyNotBoolean);
    }
    if fk
        .keys()
        .any(|key| !matches!(key.as_str(), "type" | "property" | "many"))
    {
        violations.push(ShapeViolation::ForeignKeyExtraKeys);
    }
}

fn check_edge(value: &MetaValue, violations: &mut Vec<ShapeViolation>) {
    let Some(items) = value.as_array() else {
        violations.push(ShapeViolation::EdgeNotArray);
        return;
    };

    if items.len() != 2 {
        violations.push(ShapeViolation::EdgeLength);
    }
    if items.iter().any(|item| item.as_str().is_none()) {
        violations.push(ShapeViolation::EdgeNotStrings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(entries: Vec<(&str, MetaValue)>) -> MetaValue {
        MetaValue::object(entries)
    }

    fn fk(type_name: &str, property: &str) -> MetaValue {
        obj(vec![
            ("type", MetaValue::from(type_name)),
            ("property", MetaValue::from(property)),
        ])
    }

    #[test]
    fn test_primary_key() {
        let value = obj(vec![("primaryKey", MetaValue::Bool(true))]);

        assert_eq!(check(&value), Ok(Relationship::PrimaryKey));
    }

    #[test]
    fn test_foreign_key_many_defaults_to_false() {
        let value = obj(vec![("foreignKey", fk("widget", "id"))]);

        assert_eq!(
            check(&value),
            Ok(Relationship::ForeignKey(ForeignKey::new("widget", "id", false)))
        );
    }

    #[test]
    fn test_foreign_key_many() {
        let mut inner = fk("widget", "id");
        if let MetaValue::Object(map) = &mut inner {
            map.insert("many".to_string(), MetaValue::Bool(true));
        }
        let value = obj(vec![("foreignKey", inner)]);

        assert_eq!(
            check(&value),
            Ok(Relationship::ForeignKey(ForeignKey::new("widget", "id", true)))
        );
    }

    #[test]
    fn test_edge() {
        let value = obj(vec![("edge", MetaValue::strings(["buyerId", "sellerId"]))]);

        assert_eq!(
            check(&value),
            Ok(Relationship::Edge(Edge::new("buyerId", "sellerId")))
        );
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(
            check(&MetaValue::Bool(true)),
            Err(vec![ShapeViolation::NotAnObject])
        );
        assert_eq!(
            check(&MetaValue::strings(["primaryKey"])),
            Err(vec![ShapeViolation::NotAnObject])
        );
        assert_eq!(
            check(&MetaValue::Null),
            Err(vec![ShapeViolation::NotAnObject])
        );
    }

    #[test]
    fn test_primary_key_false_is_not_a_declaration() {
        let value = obj(vec![("primaryKey", MetaValue::Bool(false))]);

        assert_eq!(check(&value), Err(vec![ShapeViolation::NotExclusive]));
    }

    #[test]
    fn test_primary_key_not_boolean() {
        let value = obj(vec![("primaryKey", MetaValue::from("yes"))]);

        assert_eq!(
            check(&value),
            Err(vec![ShapeViolation::PrimaryKeyNotBoolean])
        );
    }

    #[test]
    fn test_empty_object_is_not_exclusive() {
        assert_eq!(
            check(&obj(vec![])),
            Err(vec![ShapeViolation::NotExclusive])
        );
    }

    #[test]
    fn test_multiple_kinds() {
        let value = obj(vec![
            ("primaryKey", MetaValue::Bool(true)),
            ("foreignKey", fk("widget", "id")),
        ]);

        assert_eq!(check(&value), Err(vec![ShapeViolation::NotExclusive]));
    }

    #[test]
    fn test_extra_top_level_key() {
        let value = obj(vec![
            ("primaryKey", MetaValue::Bool(true)),
            ("unique", MetaValue::Bool(true)),
        ]);

        assert_eq!(check(&value), Err(vec![ShapeViolation::NotExclusive]));
    }

    #[test]
    fn test_foreign_key_problems_accumulate() {
        let value = obj(vec![(
            "foreignKey",
            obj(vec![
                ("type", MetaValue::Number(3.0)),
                ("many", MetaValue::from("no")),
                ("onDelete", MetaValue::from("cascade")),
            ]),
        )]);

        assert_eq!(
            check(&value),
            Err(vec![
                ShapeViolation::ForeignKeyTypeNotString,
                ShapeViolation::ForeignKeyPropertyNotString,
                ShapeViolation::ForeignKeyManyNotBoolean,
                ShapeViolation::ForeignKeyExtraKeys,
            ])
        );
    }

    #[test]
    fn test_malformed_branch_and_exclusivity_both_reported() {
        let value = obj(vec![
            ("primaryKey", MetaValue::Bool(true)),
            ("foreignKey", MetaValue::from("widget.id")),
        ]);

        assert_eq!(
            check(&value),
            Err(vec![
                ShapeViolation::ForeignKeyNotObject,
                ShapeViolation::NotExclusive,
            ])
        );
    }

    #[test]
    fn test_edge_wrong_length_and_types() {
        let value = obj(vec![(
            "edge",
            MetaValue::Array(vec![
                MetaValue::from("a"),
                MetaValue::Number(1.0),
                MetaValue::from("c"),
            ]),
        )]);

        assert_eq!(
            check(&value),
            Err(vec![ShapeViolation::EdgeLength, ShapeViolation::EdgeNotStrings])
        );
    }

    #[test]
    fn test_edge_not_array() {
        let value = obj(vec![("edge", MetaValue::from("a,b"))]);

        assert_eq!(check(&value), Err(vec![ShapeViolation::EdgeNotArray]));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ShapeViolation::EdgeLength.to_string(),
            r#""rel/edge" must have a length of 2."#
        );
        assert_eq!(
            ShapeViolation::NotAnObject.to_string(),
            r#""rel" must be an object if provided."#
        );
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn scalar_strategy() -> impl Strategy<Value = MetaValue> {
        prop_oneof![
            Just(MetaValue::Null),
            any::<bool>().prop_map(MetaValue::Bool),
            (-1000i32..1000).prop_map(|n| MetaValue::Number(f64::from(n))),
            "[a-zA-Z]{0,8}".prop_map(MetaValue::String),
        ]
    }

    fn value_strategy() -> impl Strategy<Value = MetaValue> {
        scalar_strategy().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(MetaValue::Array),
                prop::collection::vec(
                    (
                        prop_oneof![
                            Just("primaryKey".to_string()),
                            Just("foreignKey".to_string()),
                            Just("edge".to_string()),
                            Just("type".to_string()),
                            Just("property".to_string()),
                            "[a-z]{1,6}",
                        ],
                        inner
                    ),
                    0..4
                )
                .prop_map(|entries| MetaValue::object(entries)),
            ]
        })
    }

    proptest! {
        #[test]
        fn accepted_values_declare_exactly_one_kind(value in value_strategy()) {
            if check(&value).is_ok() {
                let map = value.as_object().expect("accepted values are objects");
                prop_assert!(map.keys().all(|k| matches!(k.as_str(), PRIMARY_KEY | FOREIGN_KEY | EDGE)));
                prop_assert_eq!(map.values().filter(|v| v.is_truthy()).count(), 1);
            }
        }

        #[test]
        fn rejected_values_report_violations(value in value_strategy()) {
            if let Err(violations) = check(&value) {
                prop_assert!(!violations.is_empty());
            }
        }

        #[test]
        fn edges_of_wrong_length_are_rejected(names in prop::collection::vec("[a-z]{1,6}", 0..6)) {
            let value = MetaValue::object([("edge", MetaValue::strings(names.clone()))]);
            let result = check(&value);
            if names.len() == 2 {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(vec![ShapeViolation::EdgeLength]));
            }
        }
    }
}
