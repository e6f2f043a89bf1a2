//! Job-requirement capture workflow
//!
//! Owns the draft for one screen session: field setters, the Remote/On-site
//! toggle, catalog refresh, attachment picking, and the submit sequence
//! (validate, resolve location, hand off).

pub mod handoff;

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::domain::attachments::ImageRef;
use crate::domain::catalog::ServiceCatalog;
use crate::domain::job::{Coordinates, JobDraft, JobMode, SubmittedJob};
use crate::error::{WorkflowError, WorkflowResult};
use crate::services::{Geocoder, LocationPermissions, MediaPicker, RoleCatalogStore};
use crate::validation::{self, ValidationFailure};

use handoff::DraftHandoff;

/// Resolves free-text location into coordinates: permission gate first,
/// then forward geocoding, first candidate wins.
pub struct LocationResolver {
    permissions: Arc<dyn LocationPermissions>,
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(permissions: Arc<dyn LocationPermissions>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            permissions,
            geocoder,
        }
    }

    pub async fn resolve(&self, location_text: &str) -> WorkflowResult<Coordinates> {
        if !self
            .permissions
            .request_foreground_location()
            .await
            .is_granted()
        {
            warn!("Location permission denied");
            return Err(WorkflowError::LocationPermissionDenied);
        }

        let candidates = self.geocoder.forward_geocode(location_text).await?;
        match candidates.into_iter().next() {
            Some(coordinates) => {
                info!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "Location resolved"
                );
                Ok(coordinates)
            }
            None => {
                warn!(query = %location_text, "Geocoder returned no candidate");
                Err(WorkflowError::NoCoordinatesFound)
            }
        }
    }
}

/// Controller for one job-requirement capture session.
///
/// The draft is mutated only through the setters here; the session ends
/// with a successful handoff or by dropping the workflow on cancel.
pub struct JobRequirementsWorkflow {
    draft: JobDraft,
    catalog: ServiceCatalog,
    roles: Arc<dyn RoleCatalogStore>,
    resolver: LocationResolver,
    handoff: DraftHandoff,
    remote_default_region: String,
    submitting: bool,
}

impl JobRequirementsWorkflow {
    /// Creates the workflow for a fresh capture session. `preseeded_type`
    /// carries a freelancer type chosen on the upstream role-selection
    /// screen, if any. Call [`refresh_catalog`](Self::refresh_catalog)
    /// once after construction, as the screen does on mount.
    pub fn new(
        roles: Arc<dyn RoleCatalogStore>,
        permissions: Arc<dyn LocationPermissions>,
        geocoder: Arc<dyn Geocoder>,
        handoff: DraftHandoff,
        remote_default_region: impl Into<String>,
        preseeded_type: Option<String>,
    ) -> Self {
        Self {
            draft: JobDraft::new(preseeded_type),
            catalog: ServiceCatalog::default(),
            roles,
            resolver: LocationResolver::new(permissions, geocoder),
            handoff,
            remote_default_region: remote_default_region.into(),
            submitting: false,
        }
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn mode(&self) -> JobMode {
        self.draft.mode
    }

    // ---- field setters ----

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Editing the location invalidates any previously resolved point.
    pub fn set_location_text(&mut self, text: impl Into<String>) {
        self.draft.location_text = text.into();
        self.draft.coordinates = None;
    }

    pub fn set_freelancer_type(&mut self, value: impl Into<String>) {
        self.draft.freelancer_type = value.into();
    }

    pub fn set_deadline(&mut self, deadline: DateTime<Utc>) {
        self.draft.deadline = deadline;
    }

    pub fn set_budget(&mut self, raw: impl Into<String>) {
        self.draft.budget = raw.into();
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.draft.description = text.into();
    }

    /// The "+ add more skills" action: appends an empty input slot.
    pub fn add_skill_slot(&mut self) {
        self.draft.skills.push(String::new());
    }

    /// Writes one skill slot. Returns false for an out-of-range index.
    pub fn set_skill(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.draft.skills.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    // ---- attachments ----

    /// Appends already-picked refs in selection order. No cap, no dedup.
    pub fn add_attachments(&mut self, picked: impl IntoIterator<Item = ImageRef>) {
        self.draft.attachments.append(picked);
    }

    /// Requests media permission, opens the picker, and appends whatever
    /// the user selected. Returns how many refs were added (zero on
    /// cancel).
    pub async fn pick_attachments(&mut self, picker: &dyn MediaPicker) -> WorkflowResult<usize> {
        if !picker.request_permission().await.is_granted() {
            return Err(WorkflowError::MediaPermissionDenied);
        }
        let picked = picker.pick_images().await?;
        let added = picked.len();
        self.draft.attachments.append(picked);
        Ok(added)
    }

    /// Removes one attachment, shifting the rest left.
    pub fn remove_attachment(&mut self, index: usize) -> Option<ImageRef> {
        self.draft.attachments.remove(index)
    }

    // ---- catalog ----

    /// Re-fetches the option catalog for the active mode and replaces the
    /// cached list. On failure the last successful catalog stays in place
    /// and the error surfaces to the caller; there is no automatic retry.
    #[instrument(skip(self))]
    pub async fn refresh_catalog(&mut self) -> WorkflowResult<()> {
        let category = self.draft.mode.category();
        match self.roles.roles_for_category(category).await {
            Ok(records) => {
                self.catalog = ServiceCatalog::from_records(&records);
                info!(
                    category = %category,
                    options = self.catalog.len(),
                    "Service catalog loaded"
                );
                self.reconcile_freelancer_type();
                Ok(())
            }
            Err(e) => {
                warn!(category = %category, error = %e, "Service catalog fetch failed");
                Err(WorkflowError::CatalogFetch(e))
            }
        }
    }

    // Clears a selection the freshly loaded catalog no longer offers.
    // The original client left stale selections in place across mode
    // switches; clearing here is a deliberate behavior change.
    fn reconcile_freelancer_type(&mut self) {
        if !self.draft.freelancer_type.is_empty()
            && !self.catalog.contains(&self.draft.freelancer_type)
        {
            warn!(
                freelancer_type = %self.draft.freelancer_type,
                "Selected freelancer type absent from loaded catalog, clearing"
            );
            self.draft.freelancer_type.clear();
        }
    }

    // ---- mode toggle ----

    /// Flips Remote/On-site, resets the mode-scoped location default
    /// (empty for on-site entry, the fixed region for remote), drops any
    /// stale coordinates, and re-fetches the catalog for the new category.
    ///
    /// The mode change sticks even if the catalog fetch fails; the fetch
    /// error is returned so the form can surface it.
    #[instrument(skip(self))]
    pub async fn toggle_mode(&mut self) -> WorkflowResult<JobMode> {
        let next = self.draft.mode.toggled();
        self.draft.mode = next;
        self.draft.location_text = match next {
            JobMode::Remote => self.remote_default_region.clone(),
            JobMode::OnSite => String::new(),
        };
        self.draft.coordinates = None;

        info!(mode = %next, "Job mode toggled");

        self.refresh_catalog().await?;
        Ok(next)
    }

    // ---- submit ----

    /// Runs the submit sequence: validation, then location resolution,
    /// then the one-shot handoff, strictly in that order. At most one
    /// submission is in flight; a second call while resolution is pending
    /// is rejected. Any failure leaves the draft editable for another
    /// attempt.
    #[instrument(skip(self), fields(draft_id = %self.draft.id))]
    pub async fn submit(&mut self) -> WorkflowResult<()> {
        if self.submitting {
            warn!("Submit rejected, another submission is in flight");
            return Err(WorkflowError::SubmissionInFlight);
        }
        if self.handoff.is_delivered() {
            return Err(WorkflowError::AlreadyHandedOff);
        }

        self.submitting = true;
        let result = self.run_submit().await;
        self.submitting = false;

        if let Err(e) = &result {
            info!(code = e.code(), reason = %e, "Submission aborted");
        }
        result
    }

    async fn run_submit(&mut self) -> WorkflowResult<()> {
        let now = Utc::now();
        validation::validate(&self.draft, now)?;

        // Remote jobs always resolve against the fixed default region,
        // overwriting anything typed while the form was on-site.
        if self.draft.mode == JobMode::Remote {
            self.draft.location_text = self.remote_default_region.clone();
        }

        let coordinates = self.resolver.resolve(&self.draft.location_text).await?;
        self.draft.coordinates = Some(coordinates);

        let job = self.finalize(coordinates, now)?;
        info!(job_id = %job.id, mode = %job.mode, "Draft validated and resolved, handing off");
        self.handoff.deliver(job)
    }

    fn finalize(
        &self,
        coordinates: Coordinates,
        submitted_at: DateTime<Utc>,
    ) -> WorkflowResult<SubmittedJob> {
        // Validation has already accepted the budget text; a parse failure
        // here means the draft changed mid-submit and counts as invalid.
        let budget = Decimal::from_str(self.draft.budget.trim())
            .map_err(|_| WorkflowError::Validation(ValidationFailure::BudgetInvalid))?;

        Ok(SubmittedJob {
            id: self.draft.id,
            mode: self.draft.mode,
            location_text: self.draft.location_text.clone(),
            coordinates,
            title: self.draft.title.clone(),
            freelancer_type: self.draft.freelancer_type.clone(),
            deadline: self.draft.deadline,
            budget,
            skills: self.draft.skills.clone(),
            description: self.draft.description.clone(),
            attachments: self.draft.attachments.as_slice().to_vec(),
            submitted_at,
        })
    }
}
