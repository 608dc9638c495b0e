//! Categories and the variant templates they own.
//!
//! A [`Category`] owns zero or more [`VariantTemplate`]s (attribute dimensions such as
//! "Size" or "Color"). Products reference templates and values by id only; see
//! [`ProductVariantSelection`](crate::model::ProductVariantSelection).
use super::ids::{CategoryId, TemplateId, ValueId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// The attribute dimension a template describes.
///
/// The lowercase label is what the SKU deriver abbreviates (`size` -> `SIZ`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Size,
    Color,
    Volume,
    Material,
    Custom,
}

impl VariantKind {
    pub fn label(self) -> &'static str {
        match self {
            VariantKind::Size => "size",
            VariantKind::Color => "color",
            VariantKind::Volume => "volume",
            VariantKind::Material => "material",
            VariantKind::Custom => "custom",
        }
    }
}

impl Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the editing surface renders a template's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    #[default]
    Dropdown,
    Color,
    Button,
    Radio,
}

/// Optional presentation data attached to a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueMetadata {
    /// Swatch color, e.g. `#FF0000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    /// Free-form dimensions text, e.g. `36x28`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    /// Free-form weight text, e.g. `150g/m²`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Suggested price surcharge for this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge: Option<f64>,
    /// Any other keys carried through untouched.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One concrete option within a template (e.g. "Large").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantValue {
    pub id: ValueId,
    pub value: String,
    #[serde(default)]
    pub metadata: ValueMetadata,
}

impl VariantValue {
    pub fn new(id: impl Into<ValueId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            metadata: ValueMetadata::default(),
        }
    }

    pub fn with_hex(mut self, hex: impl Into<String>) -> Self {
        self.metadata.hex = Some(hex.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: impl Into<String>) -> Self {
        self.metadata.dimensions = Some(dimensions.into());
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.metadata.weight = Some(weight.into());
        self
    }

    pub fn with_surcharge(mut self, surcharge: f64) -> Self {
        self.metadata.surcharge = Some(surcharge);
        self
    }
}

/// A named, category-scoped attribute dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariantKind,
    #[serde(default)]
    pub display_type: DisplayType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub values: Vec<VariantValue>,
}

impl VariantTemplate {
    /// Creates an optional, single-choice dropdown template with no values.
    pub fn new(id: impl Into<TemplateId>, name: impl Into<String>, kind: VariantKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            display_type: DisplayType::default(),
            required: false,
            allow_multiple: false,
            values: Vec::new(),
        }
    }

    pub fn display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = display_type;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn allow_multiple(mut self, allow_multiple: bool) -> Self {
        self.allow_multiple = allow_multiple;
        self
    }

    pub fn with_value(mut self, value: VariantValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn value(&self, id: &ValueId) -> Option<&VariantValue> {
        self.values.iter().find(|v| &v.id == id)
    }

    pub fn has_value(&self, id: &ValueId) -> bool {
        self.value(id).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

/// A product category and the variant templates that apply to its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: CategoryStatus,
    #[serde(default)]
    pub variants: Vec<VariantTemplate>,
}

impl Category {
    /// Creates an active category with a slug derived from `name`.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            description: String::new(),
            image: String::new(),
            status: CategoryStatus::Active,
            variants: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_template(mut self, template: VariantTemplate) -> Self {
        self.variants.push(template);
        self
    }

    pub fn template(&self, id: &TemplateId) -> Option<&VariantTemplate> {
        self.variants.iter().find(|t| &t.id == id)
    }

    pub fn has_template(&self, id: &TemplateId) -> bool {
        self.template(id).is_some()
    }
}

/// Lowercases `name` and joins its alphanumeric runs with `-`.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
