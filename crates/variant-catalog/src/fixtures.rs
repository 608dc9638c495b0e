//! Sample catalog used by the demo binary and the integration tests.

use crate::model::{
    Category, DisplayType, Product, ProductStatus, ProductVariantSelection, SelectedValue,
    VariantKind, VariantTemplate, VariantValue,
};
use crate::store::CatalogState;

pub fn electronics() -> Category {
    Category::new("electronics", "Electronics")
        .with_description("Phones, tablets and accessories")
        .with_template(
            VariantTemplate::new("storage", "Storage", VariantKind::Custom)
                .display_type(DisplayType::Button)
                .required(true)
                .allow_multiple(true)
                .with_value(VariantValue::new("64gb", "64GB"))
                .with_value(VariantValue::new("128gb", "128GB").with_surcharge(100.0)),
        )
        .with_template(
            VariantTemplate::new("color", "Color", VariantKind::Color)
                .display_type(DisplayType::Color)
                .allow_multiple(true)
                .with_value(VariantValue::new("black", "Black").with_hex("#000000"))
                .with_value(VariantValue::new("silver", "Silver").with_hex("#C0C0C0")),
        )
}

pub fn apparel() -> Category {
    let sizes = [
        ("xs", "XS", "32x24"),
        ("s", "S", "34x26"),
        ("m", "M", "36x28"),
        ("l", "L", "38x30"),
        ("xl", "XL", "40x32"),
        ("xxl", "XXL", "42x34"),
    ]
    .into_iter()
    .fold(
        VariantTemplate::new("clothing-sizes", "Clothing Sizes", VariantKind::Size)
            .required(true)
            .allow_multiple(true),
        |t, (id, label, dims)| t.with_value(VariantValue::new(id, label).with_dimensions(dims)),
    );

    let colors = [
        ("black", "Black", "#000000"),
        ("white", "White", "#FFFFFF"),
        ("red", "Red", "#FF0000"),
        ("blue", "Blue", "#0000FF"),
        ("green", "Green", "#00FF00"),
    ]
    .into_iter()
    .fold(
        VariantTemplate::new("basic-colors", "Basic Colors", VariantKind::Color)
            .display_type(DisplayType::Color)
            .required(true)
            .allow_multiple(true),
        |t, (id, label, hex)| t.with_value(VariantValue::new(id, label).with_hex(hex)),
    );

    let materials = [
        ("cotton", "Cotton", "150g/m²"),
        ("polyester", "Polyester", "120g/m²"),
        ("wool", "Wool", "200g/m²"),
        ("silk", "Silk", "80g/m²"),
    ]
    .into_iter()
    .fold(
        VariantTemplate::new("fabric-materials", "Fabric Materials", VariantKind::Material)
            .display_type(DisplayType::Radio),
        |t, (id, label, weight)| t.with_value(VariantValue::new(id, label).with_weight(weight)),
    );

    Category::new("apparel", "Apparel")
        .with_description("Clothing and accessories")
        .with_template(sizes)
        .with_template(colors)
        .with_template(materials)
}

pub fn fragrances() -> Category {
    Category::new("fragrances", "Fragrances").with_template(
        VariantTemplate::new("volume", "Volume", VariantKind::Volume)
            .display_type(DisplayType::Button)
            .required(true)
            .with_value(VariantValue::new("50ml", "50ml"))
            .with_value(VariantValue::new("100ml", "100ml").with_surcharge(35.0)),
    )
}

/// Storage 64GB/128GB at 10/5 and Black/Silver at 8/20.
pub fn phone() -> Product {
    Product::new("p-phone", "Phone X", "electronics", 699.0, "PHX")
        .with_status(ProductStatus::Active)
        .with_variant(
            ProductVariantSelection::new("storage")
                .with_value(SelectedValue::new("64gb", 10).with_sku("64"))
                .with_value(
                    SelectedValue::new("128gb", 5)
                        .with_price_adjustment(100.0)
                        .with_sku("128"),
                ),
        )
        .with_variant(
            ProductVariantSelection::new("color")
                .with_value(SelectedValue::new("black", 8).with_sku("BLK"))
                .with_value(SelectedValue::new("silver", 20).with_sku("SLV")),
        )
}

pub fn tee() -> Product {
    Product::new("p-tee", "Classic Tee", "apparel", 24.0, "TS-001")
        .with_status(ProductStatus::Active)
        .with_variant(
            ProductVariantSelection::new("clothing-sizes")
                .with_value(SelectedValue::new("s", 12))
                .with_value(SelectedValue::new("m", 20))
                .with_value(SelectedValue::new("xl", 6).with_price_adjustment(2.0)),
        )
        .with_variant(
            ProductVariantSelection::new("basic-colors")
                .with_value(SelectedValue::new("black", 18))
                .with_value(SelectedValue::new("white", 9)),
        )
        .with_variant(
            ProductVariantSelection::new("fabric-materials")
                .with_value(SelectedValue::new("cotton", 40)),
        )
}

pub fn perfume() -> Product {
    Product::new("p-eau", "Eau de Parfum", "fragrances", 80.0, "EDP")
        .with_status(ProductStatus::Active)
        .with_variant(
            ProductVariantSelection::new("volume")
                .with_value(SelectedValue::new("50ml", 4)),
        )
}

pub fn charger() -> Product {
    Product::new("p-charger", "USB-C Charger", "electronics", 29.0, "CHG")
        .with_status(ProductStatus::Active)
        .with_stock(60)
}

pub fn categories() -> Vec<Category> {
    vec![electronics(), apparel(), fragrances()]
}

pub fn products() -> Vec<Product> {
    vec![phone(), tee(), perfume(), charger()]
}

/// Categories only; products are expected to be added through the store so their derived
/// fields are computed.
pub fn empty_catalog() -> CatalogState {
    CatalogState::from_parts(categories(), [])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_category, validate_product};

    #[test]
    fn test_fixtures_are_valid() {
        for category in categories() {
            assert_eq!(validate_category(&category), vec![], "{}", category.id);
        }
        let state = empty_catalog();
        for product in products() {
            let category = state.category_of(&product).unwrap();
            assert_eq!(validate_product(&product, category), vec![], "{}", product.id);
        }
    }
}
