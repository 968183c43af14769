//! Variant records from the content store, normalized into products.
//!
//! [`ContentClient`] talks to the store, [`build_product`] turns raw records
//! into a canonical [`artview_core::Product`], [`VariantResolver`] combines the
//! two for a navigation selector and [`ViewerSession`] keeps late results from
//! overwriting newer selections.

pub mod client;
pub mod error;
pub mod media;
pub mod normalize;
pub(crate) mod parse;
pub mod resolver;
pub mod session;
pub mod types;

pub use client::{ContentClient, RecordQuery};
pub use error::LoadError;
pub use media::{normalize_image_ref, normalize_image_url};
pub use normalize::{build_product, SiteLinks};
pub use resolver::{Selector, VariantResolver};
pub use session::{
    SelectionGuard, SelectionToken, TexturePreloadJob, TextureState, ViewerSession,
};
pub use types::{ImageField, ImageObject, RawVariantRecord};
