use artview_core::placement::{IMMERSIVE_POSITION, PREVIEW_POSITION};
use artview_core::Orientation;

use super::*;

fn variant(id: &str, width: f64, height: f64) -> ProductVariant {
    ProductVariant {
        id: id.to_owned(),
        label: format!("Black | {id}"),
        width_meters: width,
        height_meters: height,
        image_url: format!("https://static.wixstatic.com/media/{id}.png"),
        size_text: "16 x 20 inches".to_owned(),
        frame_color: "Black".to_owned(),
        orientation: Orientation::Portrait,
        cart_url: format!("https://www.ikonhaus.art/cart?add={id}"),
    }
}

fn product(slug: &str, default: &str, ids: &[&str]) -> Product {
    Product {
        id: slug.to_owned(),
        title: slug.to_owned(),
        default_variant_id: default.to_owned(),
        detail_url: "https://www.ikonhaus.art".to_owned(),
        variants: ids.iter().map(|id| variant(id, 0.4064, 0.508)).collect(),
    }
}

fn preload_failure(id: &str) -> LoadError {
    LoadError::TexturePreload {
        url: format!("https://static.wixstatic.com/media/{id}.png"),
        reason: "HTTP status 404".to_owned(),
    }
}

fn loaded_session(default: &str, ids: &[&str]) -> ViewerSession {
    let mut session = ViewerSession::new();
    let token = session.begin_navigation();
    assert!(session.commit_product(&token, Ok(product("madness", default, ids))));
    session
}

// -----------------------------------------------------------------------
// supersession
// -----------------------------------------------------------------------

#[test]
fn newer_token_supersedes_older() {
    let guard = SelectionGuard::new();
    let first = guard.begin();
    assert!(first.is_current());
    let second = guard.begin();
    assert!(!first.is_current());
    assert!(second.is_current());
}

#[test]
fn cloned_guard_shares_generation() {
    let guard = SelectionGuard::new();
    let token = guard.begin();
    let _ = guard.clone().begin();
    assert!(!token.is_current());
}

#[test]
fn stale_resolution_is_discarded() {
    let mut session = ViewerSession::new();
    let slow = session.begin_navigation();
    let fast = session.begin_navigation();

    assert!(session.commit_product(&fast, Ok(product("second", "B", &["B"]))));
    assert!(!session.commit_product(&slow, Ok(product("first", "A", &["A"]))));

    assert_eq!(session.product().map(|p| p.id.as_str()), Some("second"));
    assert_eq!(session.selected_variant().map(|v| v.id.as_str()), Some("B"));
}

#[test]
fn stale_failure_does_not_clobber_current_product() {
    let mut session = ViewerSession::new();
    let slow = session.begin_navigation();
    let fast = session.begin_navigation();
    assert!(session.commit_product(&fast, Ok(product("second", "B", &["B"]))));

    let stale = LoadError::EmptyResult {
        selector: "artwork slug 'first'".to_owned(),
    };
    assert!(!session.commit_product(&slow, Err(stale)));
    assert!(session.last_error().is_none());
    assert!(session.product().is_some());
}

#[test]
fn failed_resolution_clears_product_and_records_error() {
    let mut session = loaded_session("A", &["A"]);
    let token = session.begin_navigation();
    assert!(session.commit_product(&token, Err(LoadError::NoSelector)));

    assert!(session.product().is_none());
    assert!(session.selected_variant().is_none());
    assert!(session
        .last_error()
        .is_some_and(|m| m.contains("no product selector")));
}

// -----------------------------------------------------------------------
// variant selection
// -----------------------------------------------------------------------

#[test]
fn committed_product_selects_default_variant() {
    let session = loaded_session("B", &["A", "B"]);
    assert_eq!(session.selected_variant().map(|v| v.id.as_str()), Some("B"));
}

#[test]
fn unknown_variant_id_falls_back_to_first() {
    let mut session = loaded_session("B", &["A", "B"]);
    let selected = session.select_variant("gone").map(|v| v.id.clone());
    assert_eq!(selected.as_deref(), Some("A"));
}

#[test]
fn select_variant_without_product_is_none() {
    let mut session = ViewerSession::new();
    assert!(session.select_variant("A").is_none());
}

// -----------------------------------------------------------------------
// texture gate
// -----------------------------------------------------------------------

#[test]
fn ar_blocked_until_texture_ready() {
    let mut session = loaded_session("A", &["A", "B"]);
    assert!(!session.can_enter_ar());

    let job = session.begin_texture_preload().unwrap();
    assert_eq!(job.variant_id, "A");
    assert_eq!(job.image_url, "https://static.wixstatic.com/media/A.png");
    assert_eq!(session.texture_state(), TextureState::Loading);
    assert!(!session.enter_ar());

    assert!(session.commit_texture(&job, Ok(())));
    assert!(session.can_enter_ar());
    assert!(session.enter_ar());
    assert!(session.is_presenting());
}

#[test]
fn failed_preload_keeps_ar_blocked() {
    let mut session = loaded_session("A", &["A"]);
    let job = session.begin_texture_preload().unwrap();
    assert!(session.commit_texture(&job, Err(preload_failure(&job.variant_id))));

    assert!(matches!(session.texture_state(), TextureState::Failed(ref r) if r.contains("404")));
    assert!(!session.can_enter_ar());
    assert!(!session.enter_ar());
}

#[test]
fn late_preload_for_previous_variant_is_ignored() {
    let mut session = loaded_session("A", &["A", "B"]);
    let old_job = session.begin_texture_preload().unwrap();

    session.select_variant("B");
    assert!(!session.commit_texture(&old_job, Ok(())));
    assert_eq!(session.texture_state(), TextureState::Idle);
    assert!(!session.can_enter_ar());
}

#[test]
fn reselecting_same_variant_keeps_ready_texture() {
    let mut session = loaded_session("A", &["A", "B"]);
    let job = session.begin_texture_preload().unwrap();
    session.commit_texture(&job, Ok(()));

    session.select_variant("A");
    assert!(session.can_enter_ar());
}

#[test]
fn new_navigation_resets_texture_and_presentation() {
    let mut session = loaded_session("A", &["A"]);
    let job = session.begin_texture_preload().unwrap();
    session.commit_texture(&job, Ok(()));
    assert!(session.enter_ar());

    let token = session.begin_navigation();
    assert!(!session.is_presenting());
    session.commit_product(&token, Ok(product("other", "A", &["A"])));
    assert_eq!(session.texture_state(), TextureState::Idle);
}

#[test]
fn switching_variant_leaves_immersive_mode() {
    let mut session = loaded_session("A", &["A", "B"]);
    let job = session.begin_texture_preload().unwrap();
    session.commit_texture(&job, Ok(()));
    assert!(session.enter_ar());

    session.select_variant("B");
    assert!(!session.is_presenting());
    assert!(!session.can_enter_ar());
    assert_eq!(
        session.placement(&Calibration::default()).unwrap().position,
        PREVIEW_POSITION
    );
}

#[test]
fn preload_from_before_navigation_is_ignored() {
    let mut session = loaded_session("A", &["A"]);
    let old_job = session.begin_texture_preload().unwrap();

    let token = session.begin_navigation();
    session.commit_product(&token, Ok(product("other", "A", &["A"])));

    assert!(!session.commit_texture(&old_job, Ok(())));
    assert_eq!(session.texture_state(), TextureState::Idle);
    assert!(!session.can_enter_ar());
}

#[test]
fn preload_from_before_reselection_is_ignored() {
    let mut session = loaded_session("A", &["A", "B"]);
    let old_job = session.begin_texture_preload().unwrap();

    session.select_variant("B");
    session.select_variant("A");

    assert!(!session.commit_texture(&old_job, Ok(())));
    assert!(!session.can_enter_ar());
}

#[test]
fn only_latest_preload_job_commits() {
    let mut session = loaded_session("A", &["A"]);
    let first = session.begin_texture_preload().unwrap();
    let second = session.begin_texture_preload().unwrap();

    assert!(!session.commit_texture(&first, Ok(())));
    assert_eq!(session.texture_state(), TextureState::Loading);
    assert!(session.commit_texture(&second, Ok(())));
    assert!(!session.commit_texture(&second, Err(preload_failure("A"))));
    assert!(session.can_enter_ar());
}

// -----------------------------------------------------------------------
// placement
// -----------------------------------------------------------------------

#[test]
fn placement_follows_presentation_mode() {
    let mut session = loaded_session("A", &["A"]);
    let calibration = Calibration::default();

    let preview = session.placement(&calibration).unwrap();
    assert_eq!(preview.position, PREVIEW_POSITION);

    let job = session.begin_texture_preload().unwrap();
    session.commit_texture(&job, Ok(()));
    session.enter_ar();
    let immersive = session.placement(&calibration).unwrap();
    assert_eq!(immersive.position, IMMERSIVE_POSITION);
    assert!(preview.display_width_meters > immersive.display_width_meters);

    session.exit_ar();
    assert_eq!(session.placement(&calibration).unwrap().position, PREVIEW_POSITION);
}

#[test]
fn placement_without_product_is_none() {
    assert!(ViewerSession::new().placement(&Calibration::default()).is_none());
}
