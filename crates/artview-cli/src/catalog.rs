//! `resolve` and `place` command handlers.

use artview_catalog::{Selector, VariantResolver};
use artview_core::{Calibration, PlacementResult, Product, ProductVariant};

/// Resolve `selector` and print the product, either as a table or as JSON.
pub(crate) async fn run_resolve(
    resolver: &VariantResolver,
    selector: &Selector,
    json: bool,
) -> anyhow::Result<()> {
    let product = resolver.resolve_product(selector).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&product)?);
    } else {
        print!("{}", format_product(&product));
    }
    Ok(())
}

/// Resolve `selector` and print where its default variant is drawn.
pub(crate) async fn run_place(
    resolver: &VariantResolver,
    calibration: &Calibration,
    selector: &Selector,
    presenting: bool,
) -> anyhow::Result<()> {
    let product = resolver.resolve_product(selector).await?;
    let variant = product
        .default_variant()
        .ok_or_else(|| anyhow::anyhow!("product '{}' has no variants", product.id))?;

    if !variant.has_usable_size() {
        tracing::warn!(sku = %variant.id, size_text = %variant.size_text, "variant size is unusable");
    }

    let placement = calibration.place(variant, presenting);
    println!("{}", format_placement(variant, &placement, presenting));
    Ok(())
}

/// Renders a product as a header line followed by one line per variant;
/// the default variant is marked with `*`.
pub(crate) fn format_product(product: &Product) -> String {
    let mut out = format!(
        "{} ({}) - {} variant(s)\ndetail: {}\n",
        product.title,
        product.id,
        product.variant_count(),
        product.detail_url
    );
    for variant in &product.variants {
        let marker = if variant.id == product.default_variant_id {
            '*'
        } else {
            ' '
        };
        out.push_str(&format!("{marker} {}\n", format_variant(variant)));
    }
    out
}

fn format_variant(variant: &ProductVariant) -> String {
    let image = if variant.has_image() {
        variant.image_url.as_str()
    } else {
        "(no image)"
    };
    format!(
        "{:<20} {:<28} {:.4} x {:.4} m  {image}",
        variant.id, variant.label, variant.width_meters, variant.height_meters
    )
}

pub(crate) fn format_placement(
    variant: &ProductVariant,
    placement: &PlacementResult,
    presenting: bool,
) -> String {
    let mode = if presenting { "immersive" } else { "preview" };
    format!(
        "{} [{mode}] position=({:.2}, {:.2}, {:.2}) size={:.4} x {:.4} m",
        variant.id,
        placement.position.x,
        placement.position.y,
        placement.position.z,
        placement.display_width_meters,
        placement.display_height_meters
    )
}
