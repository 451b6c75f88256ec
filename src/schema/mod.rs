//! Table schemas of the relational MAG source.
//!
//! A [`TableSchema`] names a source table, tags it with an [`ObjectType`]
//! and lists its columns as index-aligned names and [`FieldType`]s. It is
//! built once through [`TableSchemaBuilder`] and shared read-only by every
//! row mapped from that table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Separates schema name and id in rendered keys (`Papers:1234`).
pub const SCOPE_SEPARATOR: char = ':';

/// Role of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Identifier of the row itself.
    Id,
    /// Reference to a row of another table, rendered `schema:id`.
    Key,
    /// First endpoint of a relation table.
    Key1,
    /// Second endpoint of a relation table.
    Key2,
    /// Plain scalar attribute.
    Attribute,
    /// Free text attribute.
    Text,
    /// Column present in the source but not imported.
    Ignore,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Id => "ID",
            FieldType::Key => "KEY",
            FieldType::Key1 => "KEY_1",
            FieldType::Key2 => "KEY_2",
            FieldType::Attribute => "ATTRIBUTE",
            FieldType::Text => "TEXT",
            FieldType::Ignore => "IGNORE",
        };
        f.write_str(name)
    }
}

impl FieldType {
    /// Whether values of this column reference another table's id.
    pub fn is_key(&self) -> bool {
        matches!(self, FieldType::Key | FieldType::Key1 | FieldType::Key2)
    }
}

/// What a source table becomes in the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    /// Each row is a vertex.
    #[default]
    Node,
    /// Each row is an edge between two keyed rows.
    Edge,
    /// Each row relates three keyed rows.
    Edge3,
    /// Rows add attributes to rows of another table.
    MultiAttribute,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Node => "NODE",
            ObjectType::Edge => "EDGE",
            ObjectType::Edge3 => "EDGE_3",
            ObjectType::MultiAttribute => "MULTI_ATTRIBUTE",
        };
        f.write_str(name)
    }
}

/// Immutable description of one source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    schema_name: String,
    object_type: ObjectType,
    field_types: Vec<FieldType>,
    field_names: Vec<String>,
}

impl TableSchema {
    pub fn builder() -> TableSchemaBuilder {
        TableSchemaBuilder::default()
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn field_types(&self) -> &[FieldType] {
        &self.field_types
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Columns as `(name, type)` pairs, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.field_names.iter().map(String::as_str).zip(self.field_types.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.field_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_names.is_empty()
    }

    /// Render a key into this table as `schemaName:id`.
    pub fn scoped_key(&self, id: &str) -> String {
        format!("{}{SCOPE_SEPARATOR}{id}", self.schema_name)
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{SCOPE_SEPARATOR}", self.object_type, self.schema_name)?;
        for (i, (name, ty)) in self.fields().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{ty} {name}")?;
        }
        Ok(())
    }
}

/// Staged construction of a [`TableSchema`].
#[derive(Debug, Clone, Default)]
pub struct TableSchemaBuilder {
    schema_name: Option<String>,
    object_type: ObjectType,
    field_types: Vec<FieldType>,
    field_names: Vec<String>,
}

impl TableSchemaBuilder {
    pub fn with_schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    pub fn with_object_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }

    /// Append a column.
    pub fn with_field(mut self, field_type: FieldType, name: impl Into<String>) -> Self {
        self.field_types.push(field_type);
        self.field_names.push(name.into());
        self
    }

    /// Finish the schema. Fails with [`Error::ConfigurationError`] when no
    /// (or an empty) schema name was set.
    pub fn build(self) -> Result<TableSchema> {
        let schema_name = match self.schema_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(Error::ConfigurationError("No schema name set.".into())),
        };
        Ok(TableSchema {
            schema_name,
            object_type: self.object_type,
            field_types: self.field_types,
            field_names: self.field_names,
        })
    }
}
