//! Declarative shape descriptions for WordPress JSON bodies.
//!
//! # Design
//! A [`Schema`] is plain data describing the JSON a route is expected to
//! return. Validation walks the parsed `serde_json::Value` and collects every
//! mismatch rather than stopping at the first, so a single failed call reports
//! all offending fields at once. Once a body passes, it is deserialized into
//! the matching Rust type with serde.
//!
//! Objects accept keys they do not describe: plugins routinely register extra
//! REST fields and a client must not break on them.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::context::Context;

/// Expected shape of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Any JSON value, including null.
    Any,
    String,
    /// Any JSON number.
    Number,
    /// A JSON number without a fractional part.
    Integer,
    Boolean,
    /// A string drawn from a fixed set.
    Enum(Vec<String>),
    /// Either null or the inner shape.
    Nullable(Box<Schema>),
    Array(Box<Schema>),
    /// An object used as a dictionary: arbitrary keys, uniform values.
    Record(Box<Schema>),
    Object(ObjectSchema),
    /// At least one of the alternatives must match.
    Union(Vec<Schema>),
}

impl Schema {
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Enum(values.into_iter().map(Into::into).collect())
    }

    pub fn nullable(inner: Schema) -> Self {
        Schema::Nullable(Box::new(inner))
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn record(values: Schema) -> Self {
        Schema::Record(Box::new(values))
    }

    /// Validate `value`, collecting every violation.
    pub fn validate(&self, value: &Value) -> Result<(), Violations> {
        let mut violations = Vec::new();
        self.check(value, "$", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Violations(violations))
        }
    }

    fn check(&self, value: &Value, path: &str, out: &mut Vec<Violation>) {
        match (self, value) {
            (Schema::Any, _) => {}
            (Schema::String, Value::String(_)) => {}
            (Schema::Number, Value::Number(_)) => {}
            (Schema::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => {}
            (Schema::Boolean, Value::Bool(_)) => {}
            (Schema::Enum(allowed), Value::String(s)) if allowed.iter().any(|a| a == s) => {}
            (Schema::Nullable(_), Value::Null) => {}
            (Schema::Nullable(inner), Value::Object(_) | Value::Array(_)) => {
                inner.check(value, path, out)
            }
            (Schema::Nullable(inner), _) => {
                if inner.validate(value).is_err() {
                    out.push(Violation::mismatch(path, self, value));
                }
            }
            (Schema::Array(items), Value::Array(elements)) => {
                for (i, element) in elements.iter().enumerate() {
                    items.check(element, &format!("{path}[{i}]"), out);
                }
            }
            (Schema::Record(values), Value::Object(map)) => {
                for (key, element) in map {
                    values.check(element, &format!("{path}.{key}"), out);
                }
            }
            (Schema::Object(object), Value::Object(map)) => {
                for field in &object.fields {
                    let field_path = format!("{path}.{}", field.name);
                    match map.get(&field.name) {
                        Some(element) => field.schema.check(element, &field_path, out),
                        None if field.required => out.push(Violation {
                            path: field_path,
                            expected: field.schema.to_string(),
                            found: "missing",
                            actual: None,
                        }),
                        None => {}
                    }
                }
            }
            (Schema::Union(alternatives), _)
                if alternatives.iter().any(|alt| alt.validate(value).is_ok()) => {}
            _ => out.push(Violation::mismatch(path, self, value)),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Any => f.write_str("any value"),
            Schema::String => f.write_str("string"),
            Schema::Number => f.write_str("number"),
            Schema::Integer => f.write_str("integer"),
            Schema::Boolean => f.write_str("boolean"),
            Schema::Enum(allowed) => write!(f, "one of [{}]", allowed.join(", ")),
            Schema::Nullable(inner) => write!(f, "null or {inner}"),
            Schema::Array(items) => write!(f, "array of {items}"),
            Schema::Record(values) => write!(f, "record of {values}"),
            Schema::Object(_) => f.write_str("object"),
            Schema::Union(alternatives) => {
                f.write_str("any of [")?;
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alt}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

/// One named member of an [`ObjectSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    pub required: bool,
}

/// Ordered set of fields an object is expected to carry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    pub fields: Vec<Field>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &str, schema: Schema) -> Self {
        self.insert(name, schema, true);
        self
    }

    pub fn optional(mut self, name: &str, schema: Schema) -> Self {
        self.insert(name, schema, false);
        self
    }

    /// Add all fields of `other`, replacing same-named ones.
    pub fn extend(mut self, other: ObjectSchema) -> Self {
        for field in other.fields {
            self.insert(&field.name, field.schema, field.required);
        }
        self
    }

    fn insert(&mut self, name: &str, schema: Schema, required: bool) {
        let field = Field {
            name: name.to_string(),
            schema,
            required,
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }
}

/// One field-level mismatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Location of the value, e.g. `$.title.rendered` or `$.tags[2]`.
    pub path: String,
    /// Description of the constraint that failed.
    pub expected: String,
    /// JSON type actually found, or `missing`.
    pub found: &'static str,
    /// The offending value, kept only for scalars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
}

impl Violation {
    fn mismatch(path: &str, schema: &Schema, value: &Value) -> Self {
        let actual = match value {
            Value::Array(_) | Value::Object(_) => None,
            scalar => Some(scalar.clone()),
        };
        Self {
            path: path.to_string(),
            expected: schema.to_string(),
            found: json_type(value),
            actual,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, found {}", self.path, self.expected, self.found)?;
        if let Some(actual) = &self.actual {
            write!(f, " ({actual})")?;
        }
        Ok(())
    }
}

/// Non-empty list of violations from one validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn single(violation: Violation) -> Self {
        Violations(vec![violation])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The violation reported at `path`, if any.
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.0.iter().find(|v| v.path == path)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "response failed validation:")?;
        for violation in &self.0 {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The view, embed and edit shapes of one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSchemas {
    pub view: Schema,
    pub embed: Schema,
    pub edit: Schema,
}

impl ContextSchemas {
    pub fn for_context(&self, context: Context) -> &Schema {
        match context {
            Context::View => &self.view,
            Context::Embed => &self.embed,
            Context::Edit => &self.edit,
        }
    }

    pub fn into_context(self, context: Context) -> Schema {
        match context {
            Context::View => self.view,
            Context::Embed => self.embed,
            Context::Edit => self.edit,
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered() -> Schema {
        ObjectSchema::new()
            .required("rendered", Schema::String)
            .optional("raw", Schema::String)
            .into()
    }

    fn post() -> Schema {
        ObjectSchema::new()
            .required("id", Schema::Integer)
            .required("title", rendered())
            .required("status", Schema::enumeration(["publish", "draft"]))
            .required("tags", Schema::array(Schema::Integer))
            .optional("featured_media", Schema::nullable(Schema::Integer))
            .into()
    }

    #[test]
    fn conforming_value_passes() {
        let value = json!({
            "id": 7,
            "title": {"rendered": "Hello"},
            "status": "publish",
            "tags": [1, 2],
            "unknown_plugin_field": {"anything": true}
        });
        assert!(post().validate(&value).is_ok());
    }

    #[test]
    fn every_violation_is_reported_with_its_path() {
        let value = json!({
            "id": "7",
            "title": {"raw": 3},
            "status": "archived",
            "tags": [1, "two"]
        });
        let violations = post().validate(&value).unwrap_err();
        assert_eq!(violations.len(), 5);

        let id = violations.at("$.id").unwrap();
        assert_eq!(id.expected, "integer");
        assert_eq!(id.found, "string");
        assert_eq!(id.actual, Some(json!("7")));

        let rendered = violations.at("$.title.rendered").unwrap();
        assert_eq!(rendered.found, "missing");
        assert!(rendered.actual.is_none());

        assert_eq!(violations.at("$.title.raw").unwrap().found, "number");
        assert_eq!(
            violations.at("$.status").unwrap().expected,
            "one of [publish, draft]"
        );
        assert_eq!(violations.at("$.tags[1]").unwrap().actual, Some(json!("two")));
    }

    #[test]
    fn optional_fields_may_be_absent_but_not_wrong() {
        let base = json!({"id": 1, "title": {"rendered": ""}, "status": "draft", "tags": []});
        assert!(post().validate(&base).is_ok());

        let mut with_null = base.clone();
        with_null["featured_media"] = Value::Null;
        assert!(post().validate(&with_null).is_ok());

        let mut wrong = base;
        wrong["featured_media"] = json!(true);
        let violations = post().validate(&wrong).unwrap_err();
        assert_eq!(
            violations.at("$.featured_media").unwrap().expected,
            "null or integer"
        );
    }

    #[test]
    fn integer_rejects_fractions() {
        assert!(Schema::Integer.validate(&json!(3)).is_ok());
        assert!(Schema::Integer.validate(&json!(3.5)).is_err());
        assert!(Schema::Number.validate(&json!(3.5)).is_ok());
    }

    #[test]
    fn record_checks_every_value() {
        let schema = Schema::record(Schema::String);
        assert!(schema.validate(&json!({"24": "a", "48": "b"})).is_ok());
        let violations = schema.validate(&json!({"24": "a", "48": null})).unwrap_err();
        assert_eq!(violations.at("$.48").unwrap().found, "null");
    }

    #[test]
    fn union_accepts_any_alternative() {
        let schema = Schema::Union(vec![Schema::array(Schema::Any), Schema::record(Schema::Any)]);
        assert!(schema.validate(&json!([])).is_ok());
        assert!(schema.validate(&json!({"a": 1})).is_ok());
        let violations = schema.validate(&json!("nope")).unwrap_err();
        assert_eq!(
            violations.at("$").unwrap().expected,
            "any of [array of any value | record of any value]"
        );
    }

    #[test]
    fn structured_values_are_not_echoed() {
        let violations = Schema::String.validate(&json!({"secret": "x"})).unwrap_err();
        let violation = violations.at("$").unwrap();
        assert_eq!(violation.found, "object");
        assert!(violation.actual.is_none());
    }

    #[test]
    fn context_schemas_pick_by_context() {
        let schemas = ContextSchemas {
            view: Schema::String,
            embed: Schema::Integer,
            edit: Schema::Boolean,
        };
        assert_eq!(schemas.for_context(Context::Embed), &Schema::Integer);
        assert_eq!(schemas.into_context(Context::Edit), Schema::Boolean);
    }

    #[test]
    fn extend_replaces_same_named_fields() {
        let view = ObjectSchema::new()
            .required("id", Schema::Integer)
            .required("title", Schema::String);
        let edit = view.extend(ObjectSchema::new().required("title", Schema::Boolean));
        assert_eq!(edit.fields.len(), 2);
        assert_eq!(edit.fields[1].schema, Schema::Boolean);
    }

    #[test]
    fn display_lists_each_violation() {
        let violations = post().validate(&json!({"id": 1})).unwrap_err();
        let text = violations.to_string();
        assert!(text.starts_with("response failed validation:"));
        assert!(text.contains("$.title: expected object, found missing"));
        assert!(text.contains("$.tags: expected array of integer, found missing"));
    }
}
