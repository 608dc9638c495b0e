//! # Validation
//!
//! Structural checks that run before the store accepts a category or product write. Each
//! check returns every violation it finds instead of stopping at the first one, so an
//! editing surface can show them all at once.
//!
//! These are the rules the dashboard's widgets used to imply (a radio group for
//! single-choice templates, a required marker on mandatory ones), stated as data.

use crate::model::{Category, CategoryId, Product, TemplateId, ValueId};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    #[error("name must not be empty")]
    EmptyName,
    #[error("SKU must not be empty")]
    EmptySku,
    #[error("base price must be a non-negative number, got {0}")]
    InvalidBasePrice(f64),
    #[error("product belongs to category {expected}, validated against {actual}")]
    CategoryMismatch {
        expected: CategoryId,
        actual: CategoryId,
    },
    #[error("template {0} does not exist in the category")]
    UnknownTemplate(TemplateId),
    #[error("value {value} does not exist in template {template}")]
    UnknownValue { template: TemplateId, value: ValueId },
    #[error("template {0} is selected more than once")]
    DuplicateSelection(TemplateId),
    #[error("value {value} appears more than once in template {template}")]
    DuplicateValue { template: TemplateId, value: ValueId },
    #[error("required template {0} has no selected value")]
    MissingRequired(TemplateId),
    #[error("template {template} allows a single value, {count} selected")]
    TooManyValues { template: TemplateId, count: usize },
    #[error("template {0} is defined more than once")]
    DuplicateTemplate(TemplateId),
    #[error("template {0} has an empty name")]
    EmptyTemplateName(TemplateId),
    #[error("price adjustment of {value} in template {template} is not a finite number")]
    InvalidPriceAdjustment { template: TemplateId, value: ValueId },
}

/// Checks `product` against the category it is being written into.
///
/// Required and single-choice rules only apply to products that carry variant selections;
/// a product without any is a plain product with its own stock.
pub fn validate_product(product: &Product, category: &Category) -> Vec<Violation> {
    let mut violations = Vec::new();

    if product.name.trim().is_empty() {
        violations.push(Violation::EmptyName);
    }
    if product.sku.trim().is_empty() {
        violations.push(Violation::EmptySku);
    }
    if !product.base_price.is_finite() || product.base_price < 0.0 {
        violations.push(Violation::InvalidBasePrice(product.base_price));
    }
    if product.category_id != category.id {
        violations.push(Violation::CategoryMismatch {
            expected: product.category_id.clone(),
            actual: category.id.clone(),
        });
        return violations;
    }

    let mut seen_templates = HashSet::new();
    for selection in &product.variants {
        let template_id = &selection.variant_template_id;
        if !seen_templates.insert(template_id) {
            violations.push(Violation::DuplicateSelection(template_id.clone()));
            continue;
        }
        let Some(template) = category.template(template_id) else {
            violations.push(Violation::UnknownTemplate(template_id.clone()));
            continue;
        };

        let mut seen_values = HashSet::new();
        for value in &selection.selected_values {
            if !seen_values.insert(&value.value_id) {
                violations.push(Violation::DuplicateValue {
                    template: template_id.clone(),
                    value: value.value_id.clone(),
                });
            } else if !template.has_value(&value.value_id) {
                violations.push(Violation::UnknownValue {
                    template: template_id.clone(),
                    value: value.value_id.clone(),
                });
            }
            if !value.price_adjustment.is_finite() {
                violations.push(Violation::InvalidPriceAdjustment {
                    template: template_id.clone(),
                    value: value.value_id.clone(),
                });
            }
        }

        let count = selection.selected_values.len();
        if !template.allow_multiple && count > 1 {
            violations.push(Violation::TooManyValues {
                template: template_id.clone(),
                count,
            });
        }
    }

    if product.has_variants() {
        for template in category.variants.iter().filter(|t| t.required) {
            let selected = product
                .selection(&template.id)
                .is_some_and(|s| !s.selected_values.is_empty());
            if !selected {
                violations.push(Violation::MissingRequired(template.id.clone()));
            }
        }
    }

    violations
}

pub fn validate_category(category: &Category) -> Vec<Violation> {
    let mut violations = Vec::new();

    if category.name.trim().is_empty() {
        violations.push(Violation::EmptyName);
    }

    let mut seen_templates = HashSet::new();
    for template in &category.variants {
        if !seen_templates.insert(&template.id) {
            violations.push(Violation::DuplicateTemplate(template.id.clone()));
        }
        if template.name.trim().is_empty() {
            violations.push(Violation::EmptyTemplateName(template.id.clone()));
        }
        let mut seen_values = HashSet::new();
        for value in &template.values {
            if !seen_values.insert(&value.id) {
                violations.push(Violation::DuplicateValue {
                    template: template.id.clone(),
                    value: value.id.clone(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ProductVariantSelection, SelectedValue, VariantKind, VariantTemplate, VariantValue,
    };

    fn apparel() -> Category {
        Category::new("apparel", "Apparel")
            .with_template(
                VariantTemplate::new("t-size", "Sizes", VariantKind::Size)
                    .required(true)
                    .with_value(VariantValue::new("s", "S"))
                    .with_value(VariantValue::new("m", "M")),
            )
            .with_template(
                VariantTemplate::new("t-color", "Colors", VariantKind::Color)
                    .allow_multiple(true)
                    .with_value(VariantValue::new("red", "Red"))
                    .with_value(VariantValue::new("blue", "Blue")),
            )
    }

    fn shirt() -> Product {
        Product::new("p-1", "Shirt", "apparel", 19.0, "SH-1")
    }

    #[test]
    fn test_valid_product_passes() {
        let product = shirt()
            .with_variant(ProductVariantSelection::new("t-size").with_value(SelectedValue::new("m", 2)))
            .with_variant(
                ProductVariantSelection::new("t-color")
                    .with_value(SelectedValue::new("red", 1))
                    .with_value(SelectedValue::new("blue", 1)),
            );
        assert_eq!(validate_product(&product, &apparel()), vec![]);
    }

    #[test]
    fn test_plain_product_skips_variant_rules() {
        assert!(validate_product(&shirt(), &apparel()).is_empty());
    }

    #[test]
    fn test_single_choice_and_required_rules() {
        let product = shirt()
            .with_variant(ProductVariantSelection::new("t-size"))
            .with_variant(ProductVariantSelection::new("t-color").with_value(SelectedValue::new("red", 1)));
        assert_eq!(
            validate_product(&product, &apparel()),
            vec![Violation::MissingRequired("t-size".into())]
        );

        let product = shirt().with_variant(
            ProductVariantSelection::new("t-size")
                .with_value(SelectedValue::new("s", 1))
                .with_value(SelectedValue::new("m", 1)),
        );
        assert_eq!(
            validate_product(&product, &apparel()),
            vec![Violation::TooManyValues {
                template: "t-size".into(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_unknown_and_duplicate_references() {
        let product = shirt()
            .with_variant(
                ProductVariantSelection::new("t-size")
                    .with_value(SelectedValue::new("xxl", 1)),
            )
            .with_variant(ProductVariantSelection::new("t-size"))
            .with_variant(ProductVariantSelection::new("t-fit"))
            .with_variant(
                ProductVariantSelection::new("t-color")
                    .with_value(SelectedValue::new("red", 1))
                    .with_value(SelectedValue::new("red", 2)),
            );

        let violations = validate_product(&product, &apparel());
        assert!(violations.contains(&Violation::UnknownValue {
            template: "t-size".into(),
            value: "xxl".into()
        }));
        assert!(violations.contains(&Violation::DuplicateSelection("t-size".into())));
        assert!(violations.contains(&Violation::UnknownTemplate("t-fit".into())));
        assert!(violations.contains(&Violation::DuplicateValue {
            template: "t-color".into(),
            value: "red".into()
        }));
    }

    #[test]
    fn test_basic_fields_and_category_mismatch() {
        let mut product = Product::new("p-2", " ", "kitchen", -1.0, "");
        product.variants.push(ProductVariantSelection::new("t-size"));

        let violations = validate_product(&product, &apparel());
        assert_eq!(
            violations,
            vec![
                Violation::EmptyName,
                Violation::EmptySku,
                Violation::InvalidBasePrice(-1.0),
                Violation::CategoryMismatch {
                    expected: "kitchen".into(),
                    actual: "apparel".into()
                },
            ]
        );
        assert_eq!(violations[0].to_string(), "name must not be empty");
    }

    #[test]
    fn test_category_checks() {
        let category = Category::new("c", "")
            .with_template(
                VariantTemplate::new("t", "", VariantKind::Custom)
                    .with_value(VariantValue::new("a", "A"))
                    .with_value(VariantValue::new("a", "A again")),
            )
            .with_template(VariantTemplate::new("t", "Dup", VariantKind::Custom));

        assert_eq!(
            validate_category(&category),
            vec![
                Violation::EmptyName,
                Violation::EmptyTemplateName("t".into()),
                Violation::DuplicateValue {
                    template: "t".into(),
                    value: "a".into()
                },
                Violation::DuplicateTemplate("t".into()),
            ]
        );
        assert!(validate_category(&apparel()).is_empty());
    }
}
