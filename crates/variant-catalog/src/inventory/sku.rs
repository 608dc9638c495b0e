//! Composite SKU derivation.

use super::combinations::Combination;
use crate::model::{Category, ProductVariantSelection, VariantTemplate};

/// Upper-cased first three characters of the template's kind label (`size` -> `SIZ`).
pub fn kind_prefix(template: &VariantTemplate) -> String {
    template
        .kind
        .label()
        .chars()
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

/// Builds `"{base}-{TYPE3}-{id1}-{id2}..."` from the selection's value ids, sorted so the
/// result does not depend on selection order.
///
/// Returns `base_sku` unchanged when `selection` does not belong to `template`. An empty
/// selection yields `"{base}-{TYPE3}"`, without the trailing `-` a joined empty id list
/// would leave.
pub fn derive_sku(
    base_sku: &str,
    selection: &ProductVariantSelection,
    template: &VariantTemplate,
) -> String {
    if selection.variant_template_id != template.id {
        return base_sku.to_string();
    }

    let mut ids: Vec<&str> = selection
        .selected_values
        .iter()
        .map(|v| v.value_id.as_str())
        .collect();
    ids.sort_unstable();

    let mut sku = format!("{base_sku}-{}", kind_prefix(template));
    for id in ids {
        sku.push('-');
        sku.push_str(id);
    }
    sku
}

/// [`derive_sku`] with the template looked up in `category`.
pub fn derive_sku_in(
    base_sku: &str,
    selection: &ProductVariantSelection,
    category: &Category,
) -> String {
    match category.template(&selection.variant_template_id) {
        Some(template) => derive_sku(base_sku, selection, template),
        None => base_sku.to_string(),
    }
}

/// SKU of one purchasable variant: the base followed by each value's SKU suffix, or its
/// value id when the suffix is blank.
pub fn combination_sku(base_sku: &str, combination: &Combination<'_>) -> String {
    combination
        .parts()
        .iter()
        .fold(base_sku.to_string(), |mut sku, (_, value)| {
            let suffix = value.sku.trim();
            sku.push('-');
            sku.push_str(if suffix.is_empty() {
                value.value_id.as_str()
            } else {
                suffix
            });
            sku
        })
}
