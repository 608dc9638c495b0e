//! Enumeration of concrete variant combinations.
//!
//! A combination picks exactly one selected value from every template that has at least one
//! selected value. Templates with nothing selected are left out of the cross-product rather
//! than collapsing it to nothing.

use crate::model::{ProductVariantSelection, SelectedValue, TemplateId, ValueId};

/// One purchasable variant: a `(template, value)` pair per contributing template, in the
/// order the templates first appear in the product's selections.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination<'a> {
    parts: Vec<(&'a TemplateId, &'a SelectedValue)>,
}

impl<'a> Combination<'a> {
    pub fn parts(&self) -> &[(&'a TemplateId, &'a SelectedValue)] {
        &self.parts
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'a TemplateId, &'a ValueId)> + '_ {
        self.parts.iter().map(|&(t, v)| (t, &v.value_id))
    }

    /// Owned `(template, value)` pairs, handy as a set or map key.
    pub fn key(&self) -> Vec<(TemplateId, ValueId)> {
        self.pairs().map(|(t, v)| (t.clone(), v.clone())).collect()
    }

    /// Units sellable for this combination: the scarcest of its values.
    pub fn min_stock(&self) -> u32 {
        self.parts.iter().map(|(_, v)| v.stock).min().unwrap_or(0)
    }

    /// Sum of the price adjustments of every value in the combination.
    pub fn price_adjustment(&self) -> f64 {
        self.parts.iter().map(|(_, v)| v.price_adjustment).sum()
    }

    pub fn unit_price(&self, base_price: f64) -> f64 {
        base_price + self.price_adjustment()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Lazy iterator over every combination of a product's selections.
///
/// The last template varies fastest. Nothing is cached between calls to
/// [`combinations`]; each call starts a fresh enumeration.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    axes: Vec<(&'a TemplateId, Vec<&'a SelectedValue>)>,
    cursor: Vec<usize>,
    remaining: usize,
}

impl<'a> Iterator for Combinations<'a> {
    type Item = Combination<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let parts = self
            .axes
            .iter()
            .zip(&self.cursor)
            .map(|((template_id, values), &i)| (*template_id, values[i]))
            .collect();

        self.remaining -= 1;
        for (slot, (_, values)) in self.cursor.iter_mut().zip(&self.axes).rev() {
            *slot += 1;
            if *slot < values.len() {
                break;
            }
            *slot = 0;
        }

        Some(Combination { parts })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

/// Groups selections by template (first appearance wins the position), merging repeated
/// templates and dropping those with no selected values.
fn axes(selections: &[ProductVariantSelection]) -> Vec<(&TemplateId, Vec<&SelectedValue>)> {
    let mut axes: Vec<(&TemplateId, Vec<&SelectedValue>)> = Vec::new();
    for selection in selections {
        let template_id = &selection.variant_template_id;
        match axes.iter_mut().find(|(id, _)| *id == template_id) {
            Some((_, values)) => values.extend(selection.selected_values.iter()),
            None => axes.push((template_id, selection.selected_values.iter().collect())),
        }
    }
    axes.retain(|(_, values)| !values.is_empty());
    axes
}

/// Starts a fresh enumeration of every combination of `selections`.
///
/// Yields nothing when no template has a selected value.
pub fn combinations(selections: &[ProductVariantSelection]) -> Combinations<'_> {
    let axes = axes(selections);
    let remaining = if axes.is_empty() {
        0
    } else {
        axes.iter()
            .fold(1usize, |n, (_, values)| n.saturating_mul(values.len()))
    };
    Combinations {
        cursor: vec![0; axes.len()],
        axes,
        remaining,
    }
}

/// Number of combinations [`combinations`] would yield.
pub fn combination_count(selections: &[ProductVariantSelection]) -> usize {
    combinations(selections).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn selection(template: &str, values: &[(&str, u32)]) -> ProductVariantSelection {
        values.iter().fold(
            ProductVariantSelection::new(template),
            |s, (id, stock)| s.with_value(SelectedValue::new(*id, *stock)),
        )
    }

    fn keys(selections: &[ProductVariantSelection]) -> BTreeSet<Vec<(TemplateId, ValueId)>> {
        combinations(selections).map(|c| c.key()).collect()
    }

    fn key(pairs: &[(&str, &str)]) -> Vec<(TemplateId, ValueId)> {
        pairs
            .iter()
            .map(|(t, v)| (TemplateId::from(*t), ValueId::from(*v)))
            .collect()
    }

    #[test]
    fn test_cross_product_of_two_templates() {
        let selections = vec![
            selection("size", &[("s", 1), ("m", 2), ("l", 3)]),
            selection("color", &[("black", 4), ("white", 5)]),
        ];

        let found = keys(&selections);
        assert_eq!(found.len(), 6);
        assert!(found.contains(&key(&[("size", "m"), ("color", "white")])));
        assert!(found.contains(&key(&[("size", "l"), ("color", "black")])));
        assert_eq!(combination_count(&selections), 6);
    }

    #[test]
    fn test_empty_templates_are_skipped() {
        let selections = vec![
            selection("size", &[("s", 1), ("m", 2)]),
            selection("material", &[]),
            selection("color", &[("red", 3)]),
        ];

        let found = keys(&selections);
        assert_eq!(
            found,
            BTreeSet::from([
                key(&[("size", "s"), ("color", "red")]),
                key(&[("size", "m"), ("color", "red")]),
            ])
        );
    }

    #[test]
    fn test_no_selected_values_yields_nothing() {
        assert_eq!(combinations(&[]).count(), 0);
        assert_eq!(combination_count(&[selection("size", &[])]), 0);
    }

    #[test]
    fn test_repeated_template_is_merged() {
        let selections = vec![
            selection("size", &[("s", 1)]),
            selection("color", &[("red", 1)]),
            selection("size", &[("m", 1)]),
        ];

        assert_eq!(
            keys(&selections),
            BTreeSet::from([
                key(&[("size", "s"), ("color", "red")]),
                key(&[("size", "m"), ("color", "red")]),
            ])
        );
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let selections = vec![
            selection("size", &[("s", 1), ("m", 2)]),
            selection("color", &[("red", 3), ("blue", 4)]),
        ];

        let first: Vec<_> = combinations(&selections).map(|c| c.key()).collect();
        let second: Vec<_> = combinations(&selections).map(|c| c.key()).collect();
        assert_eq!(first, second);

        let mut iter = combinations(&selections);
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn test_combination_stock_and_price() {
        let selections = vec![
            ProductVariantSelection::new("size")
                .with_value(SelectedValue::new("xl", 7).with_price_adjustment(5.0)),
            ProductVariantSelection::new("color")
                .with_value(SelectedValue::new("gold", 3).with_price_adjustment(12.5)),
        ];

        let combo = combinations(&selections).next().unwrap();
        assert_eq!(combo.len(), 2);
        assert_eq!(combo.min_stock(), 3);
        assert_eq!(combo.price_adjustment(), 17.5);
        assert_eq!(combo.unit_price(20.0), 37.5);
    }
}
