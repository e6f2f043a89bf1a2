//! End-to-end capture workflow scenarios with stubbed service ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use birdearner_core::domain::attachments::ImageRef;
use birdearner_core::domain::catalog::{CatalogCategory, RoleRecord};
use birdearner_core::domain::job::{Coordinates, JobMode};
use birdearner_core::services::doc_store::{RoleCatalogStore, StoreError};
use birdearner_core::services::geocoder::{GeocodeError, Geocoder};
use birdearner_core::services::media::{MediaPicker, PickerError};
use birdearner_core::services::permissions::{LocationPermissions, PermissionStatus};
use birdearner_core::validation::ValidationFailure;
use birdearner_core::{DraftHandoff, HandoffReceiver, JobRequirementsWorkflow, WorkflowError};

const PUNE: Coordinates = Coordinates {
    latitude: 18.52,
    longitude: 73.85,
};

struct StubRoles {
    remote: Vec<&'static str>,
    onsite: Vec<&'static str>,
    fail_after: Option<usize>,
    categories_seen: Mutex<Vec<CatalogCategory>>,
}

impl StubRoles {
    fn new(remote: Vec<&'static str>, onsite: Vec<&'static str>) -> Self {
        Self {
            remote,
            onsite,
            fail_after: None,
            categories_seen: Mutex::new(Vec::new()),
        }
    }

    fn failing_after(mut self, successful_calls: usize) -> Self {
        self.fail_after = Some(successful_calls);
        self
    }

    fn categories_seen(&self) -> Vec<CatalogCategory> {
        self.categories_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoleCatalogStore for StubRoles {
    async fn roles_for_category(
        &self,
        category: CatalogCategory,
    ) -> Result<Vec<RoleRecord>, StoreError> {
        let calls = {
            let mut seen = self.categories_seen.lock().unwrap();
            seen.push(category);
            seen.len()
        };
        if let Some(limit) = self.fail_after {
            if calls > limit {
                return Err(StoreError::Decode("catalog backend down".to_string()));
            }
        }
        let roles = match category {
            CatalogCategory::FreelanceService => &self.remote,
            CatalogCategory::HouseholdService => &self.onsite,
        };
        Ok(vec![RoleRecord {
            id: "r1".to_string(),
            role: roles.iter().map(|s| s.to_string()).collect(),
        }])
    }
}

struct StubGeocoder {
    responses: Mutex<Vec<Vec<Coordinates>>>,
    queries: Mutex<Vec<String>>,
}

impl StubGeocoder {
    fn always(candidates: Vec<Coordinates>) -> Self {
        Self::sequence(vec![candidates])
    }

    /// One response per call; the last one repeats.
    fn sequence(responses: Vec<Vec<Coordinates>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn forward_geocode(&self, query: &str) -> Result<Vec<Coordinates>, GeocodeError> {
        self.queries.lock().unwrap().push(query.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            Ok(responses.remove(0))
        } else {
            Ok(responses.first().cloned().unwrap_or_default())
        }
    }
}

struct StubPermissions {
    granted: bool,
}

#[async_trait]
impl LocationPermissions for StubPermissions {
    async fn request_foreground_location(&self) -> PermissionStatus {
        if self.granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }
}

struct StubPicker {
    permission: PermissionStatus,
    images: Vec<ImageRef>,
    fail: bool,
}

impl StubPicker {
    fn returning(uris: &[&str]) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            images: uris.iter().map(|uri| ImageRef::new(*uri)).collect(),
            fail: false,
        }
    }
}

#[async_trait]
impl MediaPicker for StubPicker {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn pick_images(&self) -> Result<Vec<ImageRef>, PickerError> {
        if self.fail {
            return Err(PickerError::Platform("picker crashed".to_string()));
        }
        Ok(self.images.clone())
    }
}

fn default_roles() -> Arc<StubRoles> {
    Arc::new(StubRoles::new(
        vec!["Graphic Designer", "Web Developer"],
        vec!["Plumber", "Electrician"],
    ))
}

fn workflow_with(
    roles: Arc<StubRoles>,
    geocoder: Arc<StubGeocoder>,
    location_granted: bool,
) -> (JobRequirementsWorkflow, HandoffReceiver) {
    let (handoff, rx) = DraftHandoff::channel();
    let workflow = JobRequirementsWorkflow::new(
        roles,
        Arc::new(StubPermissions {
            granted: location_granted,
        }),
        geocoder,
        handoff,
        "India",
        None,
    );
    (workflow, rx)
}

fn fill_valid(workflow: &mut JobRequirementsWorkflow, freelancer_type: &str) {
    workflow.set_title("Logo design");
    workflow.set_freelancer_type(freelancer_type);
    workflow.set_deadline(Utc::now() + Duration::days(7));
    workflow.set_budget("1500");
    workflow.set_skill(0, "Illustrator");
    workflow.set_description("Need a fresh logo for a cafe brand");
    workflow.add_attachments([ImageRef::new("file:///img1.png")]);
}

#[tokio::test]
async fn onsite_submit_resolves_and_hands_off() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, mut rx) = workflow_with(default_roles(), geocoder.clone(), true);

    workflow.refresh_catalog().await.unwrap();
    workflow.toggle_mode().await.unwrap();
    assert_eq!(workflow.mode(), JobMode::OnSite);

    workflow.set_location_text("Pune");
    fill_valid(&mut workflow, "Plumber");

    workflow.submit().await.unwrap();

    let job = rx.try_recv().expect("draft handed off");
    assert_eq!(job.mode, JobMode::OnSite);
    assert_eq!(job.location_text, "Pune");
    assert_eq!(job.coordinates, PUNE);
    assert_eq!(job.budget.to_string(), "1500");
    assert_eq!(job.skills, vec!["Illustrator".to_string()]);
    assert_eq!(geocoder.queries(), vec!["Pune".to_string()]);

    let payload = job.to_payload().unwrap();
    assert_eq!(payload["location_text"], "Pune");
    assert_eq!(payload["coordinates"]["latitude"], 18.52);
}

#[tokio::test]
async fn remote_submit_resolves_against_the_default_region() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, mut rx) = workflow_with(default_roles(), geocoder.clone(), true);

    workflow.refresh_catalog().await.unwrap();
    fill_valid(&mut workflow, "Graphic Designer");
    assert_eq!(workflow.draft().location_text, "");

    workflow.submit().await.unwrap();

    assert_eq!(workflow.draft().location_text, "India");
    assert_eq!(geocoder.queries(), vec!["India".to_string()]);
    let job = rx.try_recv().expect("draft handed off");
    assert_eq!(job.location_text, "India");
}

#[tokio::test]
async fn remote_submit_overwrites_location_typed_earlier() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(default_roles(), geocoder.clone(), true);

    workflow.refresh_catalog().await.unwrap();
    fill_valid(&mut workflow, "Graphic Designer");
    workflow.set_location_text("Pune");

    workflow.submit().await.unwrap();

    assert_eq!(workflow.draft().location_text, "India");
    assert_eq!(geocoder.queries(), vec!["India".to_string()]);
}

#[tokio::test]
async fn geocoder_without_candidates_aborts_without_handoff() {
    let geocoder = Arc::new(StubGeocoder::always(vec![]));
    let (mut workflow, mut rx) = workflow_with(default_roles(), geocoder, true);

    workflow.refresh_catalog().await.unwrap();
    fill_valid(&mut workflow, "Graphic Designer");

    let err = workflow.submit().await.unwrap_err();
    assert!(matches!(err, WorkflowError::NoCoordinatesFound));
    assert!(workflow.draft().coordinates.is_none());
    assert!(rx.try_recv().is_none());
}

#[tokio::test]
async fn permission_denied_blocks_the_attempt() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, mut rx) = workflow_with(default_roles(), geocoder.clone(), false);

    workflow.refresh_catalog().await.unwrap();
    fill_valid(&mut workflow, "Graphic Designer");

    let err = workflow.submit().await.unwrap_err();
    assert!(matches!(err, WorkflowError::LocationPermissionDenied));
    assert_eq!(geocoder.calls(), 0);
    assert!(rx.try_recv().is_none());
}

#[tokio::test]
async fn validation_failure_surfaces_the_first_reason_only() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(default_roles(), geocoder.clone(), true);

    workflow.refresh_catalog().await.unwrap();
    fill_valid(&mut workflow, "Graphic Designer");
    workflow.set_title("");
    workflow.set_description("");

    let err = workflow.submit().await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Validation(ValidationFailure::TitleRequired)
    ));
    // Resolution never starts on a validation failure.
    assert_eq!(geocoder.calls(), 0);
}

#[tokio::test]
async fn toggling_refetches_the_catalog_per_transition() {
    let roles = default_roles();
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(roles.clone(), geocoder, true);

    workflow.refresh_catalog().await.unwrap();
    workflow.toggle_mode().await.unwrap();
    assert_eq!(workflow.catalog().options(), ["Plumber", "Electrician"]);

    workflow.toggle_mode().await.unwrap();
    assert_eq!(
        workflow.catalog().options(),
        ["Graphic Designer", "Web Developer"]
    );

    assert_eq!(
        roles.categories_seen(),
        vec![
            CatalogCategory::FreelanceService,
            CatalogCategory::HouseholdService,
            CatalogCategory::FreelanceService,
        ]
    );
}

#[tokio::test]
async fn stale_freelancer_type_is_cleared_on_mode_switch() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(default_roles(), geocoder, true);

    workflow.refresh_catalog().await.unwrap();
    workflow.set_freelancer_type("Graphic Designer");

    workflow.toggle_mode().await.unwrap();
    assert_eq!(workflow.draft().freelancer_type, "");
}

#[tokio::test]
async fn preseeded_type_absent_from_catalog_is_cleared_on_first_load() {
    let (handoff, _rx) = DraftHandoff::channel();
    let mut workflow = JobRequirementsWorkflow::new(
        default_roles(),
        Arc::new(StubPermissions { granted: true }),
        Arc::new(StubGeocoder::always(vec![PUNE])),
        handoff,
        "India",
        Some("UI Designer".to_string()),
    );

    assert_eq!(workflow.draft().freelancer_type, "UI Designer");
    workflow.refresh_catalog().await.unwrap();
    assert_eq!(workflow.draft().freelancer_type, "");
}

#[tokio::test]
async fn catalog_fetch_failure_keeps_the_previous_catalog() {
    let roles = Arc::new(
        StubRoles::new(vec!["Graphic Designer"], vec!["Plumber"]).failing_after(1),
    );
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(roles, geocoder, true);

    workflow.refresh_catalog().await.unwrap();
    assert_eq!(workflow.catalog().options(), ["Graphic Designer"]);

    let err = workflow.toggle_mode().await.unwrap_err();
    assert!(matches!(err, WorkflowError::CatalogFetch(_)));
    // Mode change sticks; the catalog stays at its last good value.
    assert_eq!(workflow.mode(), JobMode::OnSite);
    assert_eq!(workflow.catalog().options(), ["Graphic Designer"]);
}

#[tokio::test]
async fn resolution_failure_then_retry_succeeds() {
    let geocoder = Arc::new(StubGeocoder::sequence(vec![vec![], vec![PUNE]]));
    let (mut workflow, mut rx) = workflow_with(default_roles(), geocoder, true);

    workflow.refresh_catalog().await.unwrap();
    fill_valid(&mut workflow, "Graphic Designer");

    let err = workflow.submit().await.unwrap_err();
    assert!(matches!(err, WorkflowError::NoCoordinatesFound));
    assert!(workflow.draft().coordinates.is_none());

    workflow.submit().await.unwrap();
    let job = rx.try_recv().expect("second attempt handed off");
    assert_eq!(job.coordinates, PUNE);
}

#[tokio::test]
async fn a_second_submit_after_handoff_is_rejected() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(default_roles(), geocoder, true);

    workflow.refresh_catalog().await.unwrap();
    fill_valid(&mut workflow, "Graphic Designer");

    workflow.submit().await.unwrap();
    let err = workflow.submit().await.unwrap_err();
    assert!(matches!(err, WorkflowError::AlreadyHandedOff));
}

#[tokio::test]
async fn picked_attachments_append_in_selection_order() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(default_roles(), geocoder, true);

    let added = workflow
        .pick_attachments(&StubPicker::returning(&["file:///a.png", "file:///b.png"]))
        .await
        .unwrap();
    assert_eq!(added, 2);

    workflow
        .pick_attachments(&StubPicker::returning(&["file:///c.png"]))
        .await
        .unwrap();

    let uris: Vec<&str> = workflow
        .draft()
        .attachments
        .as_slice()
        .iter()
        .map(|img| img.uri.as_str())
        .collect();
    assert_eq!(uris, ["file:///a.png", "file:///b.png", "file:///c.png"]);

    // Remove-by-index shifts the rest left; out-of-range is a no-op.
    let removed = workflow.remove_attachment(1).unwrap();
    assert_eq!(removed.uri, "file:///b.png");
    assert!(workflow.remove_attachment(5).is_none());
    assert_eq!(workflow.draft().attachments.len(), 2);
}

#[tokio::test]
async fn cancelled_picker_adds_nothing() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(default_roles(), geocoder, true);

    let added = workflow
        .pick_attachments(&StubPicker::returning(&[]))
        .await
        .unwrap();
    assert_eq!(added, 0);
    assert!(workflow.draft().attachments.is_empty());
}

#[tokio::test]
async fn denied_media_permission_blocks_picking() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(default_roles(), geocoder, true);

    let picker = StubPicker {
        permission: PermissionStatus::Denied,
        images: vec![ImageRef::new("file:///a.png")],
        fail: false,
    };
    let err = workflow.pick_attachments(&picker).await.unwrap_err();
    assert!(matches!(err, WorkflowError::MediaPermissionDenied));
    assert!(workflow.draft().attachments.is_empty());
}

#[tokio::test]
async fn picker_platform_failure_is_reported() {
    let geocoder = Arc::new(StubGeocoder::always(vec![PUNE]));
    let (mut workflow, _rx) = workflow_with(default_roles(), geocoder, true);

    let picker = StubPicker {
        permission: PermissionStatus::Granted,
        images: Vec::new(),
        fail: true,
    };
    let err = workflow.pick_attachments(&picker).await.unwrap_err();
    assert!(matches!(err, WorkflowError::MediaPicker(_)));
}
