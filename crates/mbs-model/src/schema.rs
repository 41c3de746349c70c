//! Field schema for the MBS item dataset.
//!
//! The schema is open: any field name that is not declared behaves as an
//! optional `String` field, so unknown columns are carried through instead of
//! being rejected.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Semantic type of a field, driving value coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text, passed through unchanged.
    #[default]
    String,
    /// `Y`/`N` flag.
    Boolean,
    /// `DD.MM.YYYY` date, emitted as ISO 8601.
    Date,
    /// Monetary amounts, percentages and unit counts.
    Numeric,
}

impl FieldType {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Numeric => "numeric",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    /// Parse a type name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "text" => Ok(FieldType::String),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "date" => Ok(FieldType::Date),
            "numeric" | "float" | "number" => Ok(FieldType::Numeric),
            _ => Err(format!("Unknown field type: {s}")),
        }
    }
}

/// A declared field: name, type and whether records must populate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
        }
    }

    /// Optional field of the given type.
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, false)
    }

    /// Required `String` field.
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, true)
    }
}

/// Immutable lookup of field definitions with an open-world default.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    /// Definitions in declaration order.
    definitions: Vec<FieldDefinition>,
    /// Maps field name -> position in `definitions`.
    index: HashMap<String, usize>,
}

impl FieldSchema {
    /// Build a schema from definitions. The first definition of a name wins.
    pub fn new<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = FieldDefinition>,
    {
        let mut schema = Self::default();
        for definition in definitions {
            if schema.index.contains_key(&definition.name) {
                continue;
            }
            schema
                .index
                .insert(definition.name.clone(), schema.definitions.len());
            schema.definitions.push(definition);
        }
        schema
    }

    /// Declared type of a field, `String` for undeclared names.
    pub fn type_of(&self, name: &str) -> FieldType {
        self.definition(name)
            .map(|definition| definition.field_type)
            .unwrap_or_default()
    }

    /// Whether the field is required; undeclared names never are.
    pub fn is_required(&self, name: &str) -> bool {
        self.definition(name)
            .is_some_and(|definition| definition.required)
    }

    pub fn definition(&self, name: &str) -> Option<&FieldDefinition> {
        self.index.get(name).map(|&idx| &self.definitions[idx])
    }

    /// All definitions in declaration order.
    pub fn definitions(&self) -> &[FieldDefinition] {
        &self.definitions
    }

    /// Required definitions in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.definitions.iter().filter(|definition| definition.required)
    }

    /// Number of declared fields of the given type.
    pub fn count_of(&self, field_type: FieldType) -> usize {
        self.definitions
            .iter()
            .filter(|definition| definition.field_type == field_type)
            .count()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

const MBS_REQUIRED_FIELDS: &[&str] = &["ItemNum", "Description"];

const MBS_BOOLEAN_FIELDS: &[&str] = &[
    "NewItem",
    "ItemChange",
    "FeeChange",
    "BenefitChange",
    "AnaesChange",
    "EMSNChange",
    "DescriptorChange",
    "Anaes",
];

const MBS_DATE_FIELDS: &[&str] = &[
    "ItemStartDate",
    "ItemEndDate",
    "FeeStartDate",
    "BenefitStartDate",
    "DescriptionStartDate",
    "EMSNStartDate",
    "EMSNEndDate",
    "QFEStartDate",
    "QFEEndDate",
    "DerivedFeeStartDate",
    "EMSNChangeDate",
];

const MBS_NUMERIC_FIELDS: &[&str] = &[
    "ScheduleFee",
    "DerivedFee",
    "Benefit75",
    "Benefit85",
    "Benefit100",
    "EMSNPercentageCap",
    "EMSNMaximumCap",
    "EMSNFixedCapAmount",
    "EMSNCap",
    "BasicUnits",
];

const MBS_STRING_FIELDS: &[&str] = &[
    "Category",
    "Group",
    "SubGroup",
    "SubHeading",
    "ItemType",
    "SubItemNum",
    "BenefitType",
    "FeeType",
    "ProviderType",
    "EMSNDescription",
];

static MBS_SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
    let required = MBS_REQUIRED_FIELDS
        .iter()
        .map(|&name| FieldDefinition::required(name));
    let typed = [
        (MBS_BOOLEAN_FIELDS, FieldType::Boolean),
        (MBS_DATE_FIELDS, FieldType::Date),
        (MBS_NUMERIC_FIELDS, FieldType::Numeric),
        (MBS_STRING_FIELDS, FieldType::String),
    ]
    .into_iter()
    .flat_map(|(names, field_type)| {
        names
            .iter()
            .map(move |&name| FieldDefinition::optional(name, field_type))
    });
    FieldSchema::new(required.chain(typed))
});

/// The built-in schema of the MBS XML item dataset.
pub fn mbs_schema() -> &'static FieldSchema {
    &MBS_SCHEMA
}
