//! Declarative parameter validation evaluated before any request is sent.
//!
//! Each endpoint declares its constraints as a `const` slice of [`Rule`]
//! values. [`validate`] walks the rules against the caller's parameter
//! mapping, collecting every violation in declared order, and reports them
//! all at once in a single [`Error::InvalidArgument`].

use std::net::IpAddr;

use serde_json::{Map, Value};

use crate::{error::Error, Result};

/// Expected shape of a single field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Bool,
    Integer,
    Number,
    Array,
    Object,
    /// A structurally plausible email address (`local@domain`).
    Email,
    /// An IPv4 or IPv6 address.
    Ip,
    /// An RFC 3339 timestamp, e.g. `2019-01-22T10:00:00Z`.
    Timestamp,
    /// A three-letter ISO 4217 currency code.
    CurrencyCode,
}

impl FieldType {
    fn describe(self) -> &'static str {
        match self {
            FieldType::String => "a string",
            FieldType::Bool => "a boolean",
            FieldType::Integer => "an integer",
            FieldType::Number => "a number",
            FieldType::Array => "an array",
            FieldType::Object => "an object",
            FieldType::Email => "an email address",
            FieldType::Ip => "an IP address",
            FieldType::Timestamp => "an RFC 3339 timestamp",
            FieldType::CurrencyCode => "a three-letter currency code",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Number => value.is_number(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
            FieldType::Email => value.as_str().is_some_and(is_email),
            FieldType::Ip => value.as_str().is_some_and(|s| s.parse::<IpAddr>().is_ok()),
            FieldType::Timestamp => value
                .as_str()
                .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok()),
            FieldType::CurrencyCode => value
                .as_str()
                .is_some_and(|s| s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic())),
        }
    }
}

/// A single declarative constraint over a parameter mapping.
///
/// Missing-vs-present semantics follow the endpoint rule sets: `Field`,
/// `InSet`, `IntRange`, `Items` and `Nested` only fire when the key is
/// present, while the `Required*` variants also reject absence. A key set to
/// JSON `null` counts as absent.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The key must be present.
    Required(&'static str),
    /// The key must be present and match the type.
    RequiredField(&'static str, FieldType),
    /// When present, the value must match the type.
    Field(&'static str, FieldType),
    /// At least one of the keys must be present.
    OneOf(&'static [&'static str]),
    /// When present, the value must be one of the allowed strings.
    InSet(&'static str, &'static [&'static str]),
    /// The key must be present and be one of the allowed strings.
    RequiredInSet(&'static str, &'static [&'static str]),
    /// When present, the value must be an integer in the inclusive range.
    IntRange(&'static str, i64, i64),
    /// When present, the value must be an array and every element an object
    /// satisfying the nested rules.
    Items(&'static str, &'static [Rule]),
    /// When present, the value must be an object satisfying the nested rules.
    Nested(&'static str, &'static [Rule]),
    /// No keys other than the listed ones may be present.
    Only(&'static [&'static str]),
}

/// Check an input mapping against an endpoint rule set.
///
/// Pure and synchronous; resource operations call this before any request is
/// built or sent.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] enumerating every violated constraint,
/// in declared rule order.
pub fn validate(rules: &[Rule], params: &Map<String, Value>) -> Result<()> {
    let mut violations = Vec::new();
    check_rules(rules, params, "", &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidArgument(violations.join("; ")))
    }
}

fn check_rules(
    rules: &[Rule],
    params: &Map<String, Value>,
    prefix: &str,
    violations: &mut Vec<String>,
) {
    for rule in rules {
        check_rule(rule, params, prefix, violations);
    }
}

fn check_rule(
    rule: &Rule,
    params: &Map<String, Value>,
    prefix: &str,
    violations: &mut Vec<String>,
) {
    match rule {
        Rule::Required(key) => {
            if present(params, key).is_none() {
                violations.push(missing(prefix, key));
            }
        }
        Rule::RequiredField(key, ty) => match present(params, key) {
            None => violations.push(missing(prefix, key)),
            Some(value) if !ty.matches(value) => violations.push(mistyped(prefix, key, *ty)),
            Some(_) => {}
        },
        Rule::Field(key, ty) => {
            if let Some(value) = present(params, key) {
                if !ty.matches(value) {
                    violations.push(mistyped(prefix, key, *ty));
                }
            }
        }
        Rule::OneOf(keys) => {
            if !keys.iter().any(|key| present(params, key).is_some()) {
                violations.push(format!(
                    "at least one of [{}] must be specified",
                    keys.join(", ")
                ));
            }
        }
        Rule::InSet(key, allowed) => {
            if let Some(value) = present(params, key) {
                if !value.as_str().is_some_and(|s| allowed.contains(&s)) {
                    violations.push(not_in_set(prefix, key, allowed));
                }
            }
        }
        Rule::RequiredInSet(key, allowed) => match present(params, key) {
            None => violations.push(missing(prefix, key)),
            Some(value) if !value.as_str().is_some_and(|s| allowed.contains(&s)) => {
                violations.push(not_in_set(prefix, key, allowed));
            }
            Some(_) => {}
        },
        Rule::IntRange(key, min, max) => {
            if let Some(value) = present(params, key) {
                let in_range = value.as_i64().is_some_and(|n| (*min..=*max).contains(&n));
                if !in_range {
                    if *max == i64::MAX {
                        violations.push(format!(
                            "\"{}\" must be a positive integer",
                            label(prefix, key)
                        ));
                    } else {
                        violations.push(format!(
                            "\"{}\" must be an integer between {} and {}",
                            label(prefix, key),
                            min,
                            max
                        ));
                    }
                }
            }
        }
        Rule::Items(key, item_rules) => {
            if let Some(value) = present(params, key) {
                match value.as_array() {
                    None => violations.push(mistyped(prefix, key, FieldType::Array)),
                    Some(items) => {
                        for (index, item) in items.iter().enumerate() {
                            let item_label = format!("{}[{}]", label(prefix, key), index);
                            match item.as_object() {
                                None => violations
                                    .push(format!("\"{item_label}\" must be an object")),
                                Some(map) => check_rules(item_rules, map, &item_label, violations),
                            }
                        }
                    }
                }
            }
        }
        Rule::Nested(key, nested_rules) => {
            if let Some(value) = present(params, key) {
                match value.as_object() {
                    None => violations.push(mistyped(prefix, key, FieldType::Object)),
                    Some(map) => check_rules(nested_rules, map, &label(prefix, key), violations),
                }
            }
        }
        Rule::Only(allowed) => {
            for key in params.keys() {
                if !allowed.contains(&key.as_str()) {
                    violations.push(format!("unexpected key \"{}\"", label(prefix, key)));
                }
            }
        }
    }
}

fn present<'a>(params: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    params.get(key).filter(|value| !value.is_null())
}

fn label(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn missing(prefix: &str, key: &str) -> String {
    format!("\"{}\" was not specified", label(prefix, key))
}

fn mistyped(prefix: &str, key: &str, ty: FieldType) -> String {
    format!("\"{}\" must be {}", label(prefix, key), ty.describe())
}

fn not_in_set(prefix: &str, key: &str, allowed: &[&str]) -> String {
    format!(
        "\"{}\" must be one of [{}]",
        label(prefix, key),
        allowed.join(", ")
    )
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
}
