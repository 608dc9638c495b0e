//! Inventory movements recorded against a product or one of its variant values.
use super::ids::{ProductId, TemplateId, ValueId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementReason {
    Purchase,
    Sale,
    Return,
    Adjustment,
}

/// The variant value a movement applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRef {
    pub template_id: TemplateId,
    pub value_id: ValueId,
}

/// A single stock change.
///
/// With `variant` unset the movement adjusts the product's own stock, which is only
/// allowed for products without variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantRef>,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub reason: MovementReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StockMovement {
    pub fn inbound(product_id: impl Into<ProductId>, quantity: u32, reason: MovementReason) -> Self {
        Self {
            product_id: product_id.into(),
            variant: None,
            quantity,
            direction: Direction::In,
            reason,
            notes: None,
        }
    }

    pub fn outbound(product_id: impl Into<ProductId>, quantity: u32, reason: MovementReason) -> Self {
        Self {
            direction: Direction::Out,
            ..Self::inbound(product_id, quantity, reason)
        }
    }

    pub fn for_variant(
        mut self,
        template_id: impl Into<TemplateId>,
        value_id: impl Into<ValueId>,
    ) -> Self {
        self.variant = Some(VariantRef {
            template_id: template_id.into(),
            value_id: value_id.into(),
        });
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
