//! Office list view.
//!
//! Headless model of the list screen: fetch state, cached offices, per-row
//! toggles, the create and edit forms and the success banner. A background
//! poller refetches on a fixed interval for as long as the view lives.

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::banner::{BannerKind, BannerSlot};
use super::form::{CreateForm, EditForm, FieldErrors, FormField};
use crate::client::ApiClient;
use crate::config::ViewConfig;
use crate::errors::ClientError;
use crate::models::OfficeRecord;

/// Coarse fetch state of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// No successful fetch yet
    Loading,
    /// The latest fetch failed
    Error,
    /// Offices are present
    Ready,
}

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server accepted the change
    Submitted,
    /// Some fields are empty; nothing was sent
    Invalid(FieldErrors),
    /// The call failed; the form stays open
    Failed(ClientError),
    /// No form to submit, or a submit is already in flight
    Ignored,
}

/// Per-row UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub office: OfficeRecord,
    pub expanded: bool,
    pub editing: bool,
}

/// Point-in-time copy of everything the view would draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub status: ViewStatus,
    pub fetching: bool,
    pub rows: Vec<RowSnapshot>,
    pub create_open: bool,
    pub banner: Option<BannerKind>,
}

impl ViewSnapshot {
    pub fn row(&self, id: &str) -> Option<&RowSnapshot> {
        self.rows.iter().find(|row| row.office.id == id)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.office.title.as_str()).collect()
    }
}

#[derive(Debug)]
struct ViewModel {
    status: ViewStatus,
    in_flight: usize,
    offices: Vec<OfficeRecord>,
    active_id: Option<String>,
    create: CreateForm,
    editing: Option<EditForm>,
    banner: BannerSlot,
}

impl ViewModel {
    fn new() -> Self {
        Self {
            status: ViewStatus::Loading,
            in_flight: 0,
            offices: Vec::new(),
            active_id: None,
            create: CreateForm::default(),
            editing: None,
            banner: BannerSlot::default(),
        }
    }

    fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(EditForm::id)
    }

    fn snapshot(&self) -> ViewSnapshot {
        let rows = self
            .offices
            .iter()
            .map(|office| RowSnapshot {
                office: office.clone(),
                expanded: self.active_id.as_deref() == Some(office.id.as_str()),
                editing: self.editing_id() == Some(office.id.as_str()),
            })
            .collect();

        ViewSnapshot {
            status: self.status,
            fetching: self.in_flight > 0,
            rows,
            create_open: self.create.is_open(),
            banner: self.banner.current(),
        }
    }

    fn render(&self, out: &mut String) -> fmt::Result {
        match self.status {
            ViewStatus::Loading => return writeln!(out, "Loading..."),
            ViewStatus::Error => return writeln!(out, "Error fetching data"),
            ViewStatus::Ready => {}
        }

        writeln!(out, "Offices")?;
        self.create.render(out)?;

        for office in &self.offices {
            writeln!(out, "----")?;
            if let Some(edit) = self.editing.as_ref().filter(|e| e.id() == office.id) {
                edit.render(out)?;
                continue;
            }

            let expanded = self.active_id.as_deref() == Some(office.id.as_str());
            let arrow = if expanded { "^" } else { "v" };
            writeln!(out, "{} [{}]", office.title, arrow)?;
            writeln!(out, "{}", office.address)?;
            if expanded {
                writeln!(out, "  {}", office.detail.fullname)?;
                writeln!(out, "  {}", office.detail.job)?;
                writeln!(out, "  {}", office.detail.email)?;
                writeln!(out, "  {}", office.detail.phone)?;
                writeln!(out, "  [Edit] [Delete]")?;
            }
        }

        if let Some(kind) = self.banner.current() {
            writeln!(out, "----")?;
            writeln!(out, "(ok) {} [x]", kind.message())?;
        }
        Ok(())
    }
}

/// Counts one fetch in flight until dropped, even if the fetch is cancelled.
struct InFlight<'a>(&'a Shared);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut model = self.0.model();
        model.in_flight = model.in_flight.saturating_sub(1);
    }
}

struct Shared {
    client: ApiClient,
    config: ViewConfig,
    model: Mutex<ViewModel>,
}

impl Shared {
    // No lock is held across an await, so a poisoned model is still consistent.
    fn model(&self) -> MutexGuard<'_, ViewModel> {
        self.model
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn refetch(&self) -> Result<(), ClientError> {
        self.model().in_flight += 1;
        let pending = InFlight(self);
        let result = self.client.fetch_offices().await;
        drop(pending);

        let mut model = self.model();
        match result {
            Ok(offices) => {
                tracing::debug!("Fetched {} offices", offices.len());
                let present = |id: &str| offices.iter().any(|o| o.id == id);
                if model.active_id.as_deref().is_some_and(|id| !present(id)) {
                    model.active_id = None;
                }
                if let Some(gone) = model.editing_id().filter(|id| !present(id)).map(str::to_owned) {
                    tracing::debug!("Office {} is gone, closing its edit form", gone);
                    model.editing = None;
                }
                model.offices = offices;
                model.status = ViewStatus::Ready;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Error fetching data: {}", err);
                model.status = ViewStatus::Error;
                Err(err)
            }
        }
    }

    fn show_banner(self: &Arc<Self>, model: &mut ViewModel, kind: BannerKind) {
        let generation = model.banner.show(kind);
        let timeout = self.config.banner_timeout;
        let weak = Arc::downgrade(self);

        model.banner.arm(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Some(shared) = weak.upgrade() {
                shared.model().banner.expire(generation);
            }
        }));
    }
}

/// The office list screen.
///
/// Must be created inside a tokio runtime. Dropping the view stops the
/// poller and any pending banner timer.
pub struct OfficeListView {
    shared: Arc<Shared>,
    poller: JoinHandle<()>,
}

impl OfficeListView {
    /// Start in `Loading` and begin polling immediately.
    pub fn mount(client: ApiClient, config: ViewConfig) -> Self {
        let shared = Arc::new(Shared {
            client,
            config,
            model: Mutex::new(ViewModel::new()),
        });
        let poller = tokio::spawn(poll(Arc::downgrade(&shared), config));

        Self { shared, poller }
    }

    /// Stop polling and drop all timers.
    pub fn unmount(self) {
        tracing::debug!("Unmounting office list");
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.shared.model().snapshot()
    }

    pub fn status(&self) -> ViewStatus {
        self.shared.model().status
    }

    /// Fetch the list now, outside the poll schedule.
    pub async fn refetch(&self) -> Result<(), ClientError> {
        self.shared.refetch().await
    }

    /// Show or hide the contact detail of a row. The row being edited is left alone.
    pub fn toggle_expanded(&self, id: &str) {
        let mut model = self.shared.model();
        if model.editing_id() == Some(id) {
            return;
        }
        model.active_id = match model.active_id.as_deref() {
            Some(active) if active == id => None,
            _ => Some(id.to_string()),
        };
    }

    /// Replace the row with the edit form. Returns `false` for an unknown id.
    pub fn start_edit(&self, id: &str) -> bool {
        let mut model = self.shared.model();
        let Some(office) = model.offices.iter().find(|o| o.id == id) else {
            return false;
        };

        let edit = EditForm::for_record(office);
        model.editing = Some(edit);
        model.active_id = None;
        true
    }

    pub fn cancel_edit(&self) {
        self.shared.model().editing = None;
    }

    /// Type into the edit form. Returns `false` when nothing is being edited.
    pub fn set_edit_field(&self, field: FormField, value: &str) -> bool {
        match self.shared.model().editing.as_mut() {
            Some(edit) => {
                edit.form_mut().set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn edit_form(&self) -> Option<EditForm> {
        self.shared.model().editing.clone()
    }

    pub fn open_create_form(&self) {
        self.shared.model().create.open();
    }

    /// Collapse the create form, dropping its input and its banner.
    pub fn close_create_form(&self) {
        let mut model = self.shared.model();
        model.create.close();
        if model.banner.current() == Some(BannerKind::Added) {
            model.banner.dismiss();
        }
    }

    pub fn set_create_field(&self, field: FormField, value: &str) {
        self.shared.model().create.form_mut().set(field, value);
    }

    pub fn create_form(&self) -> CreateForm {
        self.shared.model().create.clone()
    }

    /// Validate and send the create form.
    ///
    /// On success the form collapses, the `Added` banner shows and the list
    /// is refetched. Failures are logged and leave the form open.
    pub async fn submit_create(&self) -> SubmitOutcome {
        let body = {
            let mut model = self.shared.model();
            if !model.create.is_open() || model.create.is_saving() {
                return SubmitOutcome::Ignored;
            }
            match model.create.form_mut().validate() {
                Ok(body) => {
                    model.create.set_saving(true);
                    body
                }
                Err(errors) => return SubmitOutcome::Invalid(errors),
            }
        };

        match self.shared.client.add_office(&body).await {
            Ok(office) => {
                tracing::info!("Added office {}", office.id);
                {
                    let mut model = self.shared.model();
                    model.create.close();
                    self.shared.show_banner(&mut model, BannerKind::Added);
                }
                let _ = self.shared.refetch().await;
                SubmitOutcome::Submitted
            }
            Err(err) => {
                tracing::error!("Error while adding office: {}", err);
                self.shared.model().create.set_saving(false);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Validate and send the edit form.
    ///
    /// On success the cached row is patched, editing and expansion are
    /// cleared, the `Updated` banner shows and the list is refetched.
    pub async fn submit_edit(&self) -> SubmitOutcome {
        let (id, body) = {
            let mut model = self.shared.model();
            let Some(edit) = model.editing.as_mut() else {
                return SubmitOutcome::Ignored;
            };
            if edit.is_saving() {
                return SubmitOutcome::Ignored;
            }
            match edit.form_mut().validate() {
                Ok(body) => {
                    edit.set_saving(true);
                    (edit.id().to_string(), body)
                }
                Err(errors) => return SubmitOutcome::Invalid(errors),
            }
        };

        if let Err(err) = self.shared.client.update_office(&id, &body).await {
            tracing::error!("Error while updating office {}: {}", id, err);
            let mut model = self.shared.model();
            if let Some(edit) = model.editing.as_mut().filter(|e| e.id() == id) {
                edit.set_saving(false);
            }
            return SubmitOutcome::Failed(err);
        }
        tracing::info!("Updated office {}", id);

        {
            let mut model = self.shared.model();
            if let Some(office) = model.offices.iter_mut().find(|o| o.id == id) {
                office.apply(body);
            }
            if model.editing_id() == Some(id.as_str()) {
                model.editing = None;
            }
            model.active_id = None;
            self.shared.show_banner(&mut model, BannerKind::Updated);
        }
        let _ = self.shared.refetch().await;
        SubmitOutcome::Submitted
    }

    /// Delete a row on the server, then refetch and drop it locally.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        if let Err(err) = self.shared.client.delete_office(id).await {
            tracing::error!("Error deleting office {}: {}", id, err);
            return Err(err);
        }
        tracing::info!("Deleted office {}", id);

        {
            let mut model = self.shared.model();
            self.shared.show_banner(&mut model, BannerKind::Deleted);
        }
        let _ = self.shared.refetch().await;

        let mut model = self.shared.model();
        model.offices.retain(|o| o.id != id);
        if model.active_id.as_deref() == Some(id) {
            model.active_id = None;
        }
        if model.editing_id() == Some(id) {
            model.editing = None;
        }
        Ok(())
    }

    /// Close the banner now.
    pub fn dismiss_banner(&self) {
        self.shared.model().banner.dismiss();
    }

    /// Plain-text rendering of the screen.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.shared.model().render(&mut out);
        out
    }
}

impl Drop for OfficeListView {
    fn drop(&mut self) {
        self.poller.abort();
        self.shared.model().banner.dismiss();
    }
}

async fn poll(shared: Weak<Shared>, config: ViewConfig) {
    let mut ticker = tokio::time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(shared) = shared.upgrade() else {
            break;
        };
        let _ = shared.refetch().await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::transport::{ApiReply, ApiRequest, Transport, TransportError};

    /// Never answers.
    struct SilentTransport;

    #[async_trait]
    impl Transport for SilentTransport {
        async fn send(&self, _request: ApiRequest) -> Result<ApiReply, TransportError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_fetch_is_no_longer_counted() {
        let shared = Shared {
            client: ApiClient::new(Arc::new(SilentTransport)),
            config: ViewConfig::default(),
            model: Mutex::new(ViewModel::new()),
        };

        let cancelled = tokio::time::timeout(Duration::from_millis(50), shared.refetch()).await;

        assert!(cancelled.is_err());
        assert!(!shared.model().snapshot().fetching);
        assert_eq!(shared.model().status, ViewStatus::Loading);
    }
}
