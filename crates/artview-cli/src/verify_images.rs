//! Image verification for every variant of a product.

use artview_catalog::{LoadError, Selector, VariantResolver};
use artview_core::ProductVariant;

/// Preload every variant image of the resolved product.
///
/// Failures are logged per variant; the command fails when any image is
/// unusable so it can gate publishing scripts.
pub(crate) async fn run_verify_images(
    resolver: &VariantResolver,
    selector: &Selector,
    concurrency: usize,
) -> anyhow::Result<()> {
    let product = resolver.resolve_product(selector).await?;
    let results = resolver
        .client()
        .preload_variants(&product.variants, concurrency)
        .await;

    let (ok_count, bad_count) = tally(&results);
    for (variant, result) in &results {
        if let Err(e) = result {
            tracing::warn!(
                sku = %variant.id,
                url = %variant.image_url,
                error = %e,
                "variant image verification failed"
            );
        }
    }

    println!(
        "verified images for {}: {ok_count} OK, {bad_count} bad",
        product.id
    );
    if bad_count > 0 {
        anyhow::bail!("{bad_count} variant image(s) failed to load");
    }
    Ok(())
}

pub(crate) fn tally(results: &[(&ProductVariant, Result<(), LoadError>)]) -> (usize, usize) {
    let ok = results.iter().filter(|(_, r)| r.is_ok()).count();
    (ok, results.len() - ok)
}
