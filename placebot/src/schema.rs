//! JSON Schema generation and format instructions.
//!
//! Format instructions are the part of the prompt that tells the model which
//! shape its answer must have. They embed the schemars-generated JSON Schema
//! of the target record.

use serde_json::Value;

use crate::venue::{Category, ParkingVenue, SushiVenue};

const FORMAT_INSTRUCTIONS: &str = r#"The output should be formatted as a JSON instance that conforms to the JSON schema below.

As an example, for the schema {"properties": {"foo": {"title": "Foo", "description": "a list of strings", "type": "array", "items": {"type": "string"}}}, "required": ["foo"]}
the object {"foo": ["bar", "baz"]} is a well-formatted instance of the schema. The object {"properties": {"foo": ["bar", "baz"]}} is not well-formatted.

Here is the output schema:"#;

/// Generate a JSON Schema from a Rust type that implements [`schemars::JsonSchema`].
///
/// Returns `(name, schema)`. The `$schema` meta field and the root `title`
/// are removed; the model needs neither.
#[must_use]
pub fn generate_json_schema<T: schemars::JsonSchema>() -> (String, Value) {
    let root = schemars::schema_for!(T);
    let mut schema_value = serde_json::to_value(&root).unwrap_or_default();

    if let Value::Object(ref mut map) = schema_value {
        map.remove("$schema");
        map.remove("title");
    }

    let name = <T as schemars::JsonSchema>::schema_name();
    (name.into_owned(), schema_value)
}

/// Render the format instructions for a schema type.
#[must_use]
pub fn format_instructions_for<T: schemars::JsonSchema>() -> String {
    let (_, schema) = generate_json_schema::<T>();
    let schema = serde_json::to_string(&schema).unwrap_or_default();
    format!("{FORMAT_INSTRUCTIONS}\n```\n{schema}\n```")
}

/// Render the format instructions for the record type of a category.
#[must_use]
pub fn format_instructions(category: Category) -> String {
    match category {
        Category::Sushi => format_instructions_for::<SushiVenue>(),
        Category::Parking => format_instructions_for::<ParkingVenue>(),
    }
}
