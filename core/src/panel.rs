//! The vehicles management panel: remote mirror plus form session.
//!
//! # Design
//! Every operation that needs the server returns a `PendingRequest` instead of
//! performing I/O. The host executes it and hands the outcome to
//! [`VehiclesPanel::complete`], which applies it and returns follow-up
//! requests (the list reload after a successful mutation). Outcomes are
//! applied in arrival order, so when two loads overlap the later response
//! wins.
//!
//! The mirror is only ever replaced wholesale by a successful load; drafts and
//! mutations never patch it.

use crate::client::VehiclesClient;
use crate::config::PanelConfig;
use crate::error::{ApiError, PanelError};
use crate::host::Dialogs;
use crate::http::{HttpRequest, HttpResponse};
use crate::labels::Labels;
use crate::session::{current_year, DraftField, FormSession};
use crate::types::{User, Vehicle, VehicleId};
use crate::view::{self, FormView, ListView};

/// What a request was issued for; decides how its outcome is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadVehicles,
    LoadUsers,
    Create,
    Update(VehicleId),
    Delete(VehicleId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub operation: Operation,
    pub request: HttpRequest,
}

/// Last known snapshot of the server-owned collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMirror {
    vehicles: Vec<Vehicle>,
    users: Vec<User>,
}

impl RemoteMirror {
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }
}

pub struct VehiclesPanel<D> {
    client: VehiclesClient,
    config: PanelConfig,
    mirror: RemoteMirror,
    session: FormSession,
    dialogs: D,
}

impl<D: Dialogs> VehiclesPanel<D> {
    pub fn new(config: PanelConfig, dialogs: D) -> Self {
        Self {
            client: VehiclesClient::new(&config.base_url),
            config,
            mirror: RemoteMirror::default(),
            session: FormSession::default(),
            dialogs,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn labels(&self) -> &'static Labels {
        Labels::for_locale(self.config.locale)
    }

    pub fn mirror(&self) -> &RemoteMirror {
        &self.mirror
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        self.mirror.vehicles()
    }

    pub fn users(&self) -> &[User] {
        self.mirror.users()
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    /// Initial loads issued when the panel is activated.
    pub fn mount(&self) -> Vec<PendingRequest> {
        vec![self.load_vehicles(), self.load_users()]
    }

    pub fn load_vehicles(&self) -> PendingRequest {
        PendingRequest {
            operation: Operation::LoadVehicles,
            request: self.client.build_list_vehicles(),
        }
    }

    pub fn load_users(&self) -> PendingRequest {
        PendingRequest {
            operation: Operation::LoadUsers,
            request: self.client.build_list_users(),
        }
    }

    pub fn toggle_add(&mut self) {
        self.session.toggle_add(current_year());
        tracing::debug!(open = self.session.is_open(), "toggled add form");
    }

    /// Open the form on a listed vehicle.
    pub fn edit(&mut self, id: VehicleId) -> Result<(), PanelError> {
        let vehicle = self
            .mirror
            .vehicle(id)
            .ok_or(PanelError::UnknownVehicle(id))?;
        self.session.edit(vehicle);
        tracing::debug!(%id, "editing vehicle");
        Ok(())
    }

    pub fn set_field(&mut self, field: DraftField, raw: &str) -> Result<(), PanelError> {
        self.session.set_field(field, raw)
    }

    /// Build the create or update request for the open draft.
    ///
    /// The session stays as is until the outcome arrives.
    pub fn submit(&self) -> Result<PendingRequest, PanelError> {
        let draft = self.session.validated_draft()?;
        let pending = match self.session.editing_id() {
            Some(id) => PendingRequest {
                operation: Operation::Update(id),
                request: self.client.build_update_vehicle(id, draft)?,
            },
            None => PendingRequest {
                operation: Operation::Create,
                request: self.client.build_create_vehicle(draft)?,
            },
        };
        tracing::debug!(operation = ?pending.operation, "submitting vehicle form");
        Ok(pending)
    }

    /// Ask for confirmation, then build the delete request. `None` when the
    /// user declines.
    pub fn delete(&mut self, id: VehicleId) -> Option<PendingRequest> {
        let labels = self.labels();
        if !self.dialogs.confirm(labels.confirm_delete) {
            tracing::debug!(%id, "delete declined");
            return None;
        }
        Some(PendingRequest {
            operation: Operation::Delete(id),
            request: self.client.build_delete_vehicle(id),
        })
    }

    /// Apply the outcome of a request issued earlier and return follow-ups.
    pub fn complete(
        &mut self,
        operation: Operation,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Vec<PendingRequest> {
        let labels = self.labels();
        match operation {
            Operation::LoadVehicles => {
                match outcome.and_then(|response| self.client.parse_list_vehicles(response)) {
                    Ok(vehicles) => self.mirror.vehicles = vehicles,
                    Err(err) => tracing::error!(error = %err, "failed to load vehicles"),
                }
                Vec::new()
            }
            Operation::LoadUsers => {
                match outcome.and_then(|response| self.client.parse_list_users(response)) {
                    Ok(users) => self.mirror.users = users,
                    Err(err) => tracing::error!(error = %err, "failed to load users"),
                }
                Vec::new()
            }
            Operation::Create | Operation::Update(_) => {
                match outcome.and_then(|response| self.client.parse_save_vehicle(response)) {
                    Ok(()) => {
                        tracing::info!(?operation, "vehicle saved");
                        let message = match operation {
                            Operation::Update(_) => labels.updated,
                            _ => labels.created,
                        };
                        self.dialogs.notify(message);
                        self.session.close();
                        vec![self.load_vehicles()]
                    }
                    Err(err) => {
                        tracing::error!(?operation, error = %err, "failed to save vehicle");
                        self.dialogs.notify(labels.save_failed);
                        Vec::new()
                    }
                }
            }
            Operation::Delete(id) => {
                match outcome.and_then(|response| self.client.parse_delete_vehicle(response)) {
                    Ok(()) => {
                        tracing::info!(%id, "vehicle deleted");
                        self.dialogs.notify(labels.deleted);
                        self.session.close();
                        vec![self.load_vehicles()]
                    }
                    Err(err) => {
                        tracing::error!(%id, error = %err, "failed to delete vehicle");
                        if self.config.notify_delete_failure {
                            self.dialogs.notify(labels.delete_failed);
                        }
                        Vec::new()
                    }
                }
            }
        }
    }

    pub fn heading(&self) -> &'static str {
        self.labels().title
    }

    pub fn toggle_label(&self) -> &'static str {
        view::toggle_label(&self.session, self.labels())
    }

    pub fn list_view(&self) -> ListView {
        view::list_view(self.vehicles(), self.labels())
    }

    pub fn form_view(&self) -> Option<FormView> {
        view::form_view(&self.session, self.users(), self.labels())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::host::{run_until_idle, Transport};
    use crate::http::HttpMethod;
    use crate::labels::Locale;
    use crate::types::{UserId, VehicleStatus};

    const BASE_URL: &str = "http://admin.local/";

    #[derive(Default)]
    struct RecordingDialogs {
        answer: bool,
        prompts: Vec<String>,
        notices: Vec<String>,
    }

    impl Dialogs for RecordingDialogs {
        fn confirm(&mut self, message: &str) -> bool {
            self.prompts.push(message.to_string());
            self.answer
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    /// Answers requests from a script and records what was sent.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: VecDeque<Result<HttpResponse, ApiError>>,
        sent: Vec<HttpRequest>,
    }

    impl ScriptedTransport {
        fn reply(mut self, status: u16, body: &str) -> Self {
            self.replies.push_back(Ok(response(status, body)));
            self
        }

        fn fail(mut self) -> Self {
            self.replies
                .push_back(Err(ApiError::Transport("connection refused".to_string())));
            self
        }

        fn sent_summary(&self) -> Vec<(HttpMethod, String)> {
            self.sent
                .iter()
                .map(|req| (req.method, req.path.clone()))
                .collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.push(request.clone());
            self.replies
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request to {}", request.path))
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn panel(answer: bool) -> VehiclesPanel<RecordingDialogs> {
        VehiclesPanel::new(
            PanelConfig::new(BASE_URL),
            RecordingDialogs {
                answer,
                ..RecordingDialogs::default()
            },
        )
    }

    const ONE_VEHICLE: &str = r#"[{"id":7,"brand":"Toyota","model":"Yaris","year":2020,"license_plate":"AB-123-CD","owner_id":null,"owner_name":null,"status":"available"}]"#;
    const TWO_VEHICLES: &str = r#"[{"id":7,"brand":"Toyota","model":"Yaris","year":2020,"license_plate":"AB-123-CD","owner_id":null,"owner_name":null,"status":"available"},{"id":8,"brand":"Dacia","model":"Sandero","year":2022,"license_plate":"QR-678-ST","owner_id":2,"owner_name":"Inès Roux","status":"repair"}]"#;
    const USERS: &str = r#"[{"id":2,"firstname":"Inès","lastname":"Roux"}]"#;

    fn mounted(answer: bool, vehicles: &str) -> VehiclesPanel<RecordingDialogs> {
        let mut panel = panel(answer);
        let mut transport = ScriptedTransport::default()
            .reply(200, vehicles)
            .reply(200, USERS);
        let pending = panel.mount();
        run_until_idle(&mut panel, &mut transport, pending);
        panel
    }

    fn fill_yaris(panel: &mut VehiclesPanel<RecordingDialogs>) {
        panel.set_field(DraftField::Brand, "Toyota").unwrap();
        panel.set_field(DraftField::Model, "Yaris").unwrap();
        panel.set_field(DraftField::Year, "2020").unwrap();
        panel.set_field(DraftField::LicensePlate, "AB-123-CD").unwrap();
        panel.set_field(DraftField::OwnerId, "").unwrap();
        panel.set_field(DraftField::Status, "available").unwrap();
    }

    #[test]
    fn mount_loads_vehicles_and_users() {
        let panel = mounted(true, TWO_VEHICLES);
        assert_eq!(panel.vehicles().len(), 2);
        assert_eq!(panel.users().len(), 1);
        assert_eq!(panel.users()[0].id, UserId(2));
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let mut panel = mounted(true, ONE_VEHICLE);
        let mut transport = ScriptedTransport::default().reply(500, "oops");
        let pending = vec![panel.load_vehicles()];
        run_until_idle(&mut panel, &mut transport, pending);
        assert_eq!(panel.vehicles().len(), 1);

        let mut transport = ScriptedTransport::default().fail().reply(200, "{not json");
        let pending = vec![panel.load_users(), panel.load_vehicles()];
        run_until_idle(&mut panel, &mut transport, pending);
        assert_eq!(panel.users().len(), 1);
        assert_eq!(panel.vehicles().len(), 1);
        assert!(panel.dialogs().notices.is_empty(), "load failures are not user-facing");
    }

    #[test]
    fn unrecognised_status_degrades_only_its_row() {
        let body = r#"[{"id":7,"brand":"Toyota","model":"Yaris","year":2020,"license_plate":"AB-123-CD","owner_id":null,"owner_name":null,"status":"available"},{"id":9,"brand":"Kia","model":"Picanto","year":2021,"license_plate":"YZ-234-AB","owner_id":null,"owner_name":null,"status":"reserved"}]"#;
        let panel = mounted(true, body);
        assert_eq!(panel.vehicles().len(), 2);
        assert_eq!(panel.vehicles()[1].status, VehicleStatus::Unknown);

        let ListView::Table { rows, .. } = panel.list_view() else {
            panic!("expected a table");
        };
        assert_eq!(rows[0].status_label, "Disponible");
        assert_eq!(rows[1].status_label, "");
    }

    #[test]
    fn submit_new_vehicle_posts_to_collection_then_reloads() {
        let mut panel = mounted(true, "[]");
        panel.toggle_add();
        fill_yaris(&mut panel);

        let pending = panel.submit().unwrap();
        assert_eq!(pending.operation, Operation::Create);
        assert_eq!(pending.request.method, HttpMethod::Post);
        assert_eq!(pending.request.path, "http://admin.local/api/vehicles");
        let body: serde_json::Value =
            serde_json::from_str(pending.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "brand": "Toyota",
                "model": "Yaris",
                "year": 2020,
                "license_plate": "AB-123-CD",
                "owner_id": "",
                "status": "available"
            })
        );

        let mut transport = ScriptedTransport::default()
            .reply(201, "{}")
            .reply(200, ONE_VEHICLE);
        run_until_idle(&mut panel, &mut transport, vec![pending]);

        assert_eq!(
            transport.sent_summary(),
            vec![
                (HttpMethod::Post, "http://admin.local/api/vehicles".to_string()),
                (HttpMethod::Get, "http://admin.local/api/vehicles".to_string()),
            ]
        );
        assert_eq!(panel.session(), &FormSession::Closed);
        assert_eq!(panel.vehicles().len(), 1);
        assert_eq!(panel.dialogs().notices, vec!["Véhicule ajouté avec succès"]);
    }

    #[test]
    fn submit_edit_puts_to_item_endpoint() {
        let mut panel = mounted(true, TWO_VEHICLES);
        panel.edit(VehicleId(8)).unwrap();
        panel.set_field(DraftField::Status, "sold").unwrap();

        let pending = panel.submit().unwrap();
        assert_eq!(pending.operation, Operation::Update(VehicleId(8)));
        assert_eq!(pending.request.method, HttpMethod::Put);
        assert_eq!(pending.request.path, "http://admin.local/api/vehicles/8");

        let mut transport = ScriptedTransport::default()
            .reply(200, "{}")
            .reply(200, TWO_VEHICLES);
        run_until_idle(&mut panel, &mut transport, vec![pending]);
        assert_eq!(transport.sent.len(), 2);
        assert_eq!(transport.sent[1].method, HttpMethod::Get);
        assert!(!panel.session().is_open());
        assert_eq!(panel.session().editing_id(), None);
        assert_eq!(panel.dialogs().notices, vec!["Véhicule modifié avec succès"]);
    }

    #[test]
    fn edits_do_not_touch_the_mirror() {
        let mut panel = mounted(true, TWO_VEHICLES);
        panel.edit(VehicleId(7)).unwrap();
        panel.set_field(DraftField::Brand, "Lexus").unwrap();
        assert_eq!(panel.mirror().vehicle(VehicleId(7)).unwrap().brand, "Toyota");
    }

    #[test]
    fn edit_without_owner_gives_empty_owner_field() {
        let mut panel = mounted(true, ONE_VEHICLE);
        panel.edit(VehicleId(7)).unwrap();
        let draft = panel.session().draft().unwrap();
        assert_eq!(draft.owner_id, None);
        assert_eq!(serde_json::to_value(draft).unwrap()["owner_id"], "");
    }

    #[test]
    fn edit_of_unknown_vehicle_is_rejected() {
        let mut panel = mounted(true, ONE_VEHICLE);
        let err = panel.edit(VehicleId(99)).unwrap_err();
        assert!(matches!(err, PanelError::UnknownVehicle(VehicleId(99))));
        assert!(!panel.session().is_open());
    }

    #[test]
    fn failed_submit_keeps_form_and_draft() {
        let mut panel = mounted(true, "[]");
        panel.toggle_add();
        fill_yaris(&mut panel);
        let before = panel.session().clone();

        let pending = panel.submit().unwrap();
        let mut transport = ScriptedTransport::default().reply(400, "bad plate");
        run_until_idle(&mut panel, &mut transport, vec![pending]);
        assert_eq!(transport.sent.len(), 1, "no reload after a failure");
        assert_eq!(panel.session(), &before);
        assert_eq!(panel.dialogs().notices, vec!["Erreur lors de l'opération"]);

        let pending = panel.submit().unwrap();
        let mut transport = ScriptedTransport::default().fail();
        run_until_idle(&mut panel, &mut transport, vec![pending]);
        assert_eq!(panel.session(), &before);
        assert_eq!(panel.dialogs().notices.len(), 2);
    }

    #[test]
    fn toggling_open_form_closes_without_requests() {
        let mut panel = mounted(true, ONE_VEHICLE);
        panel.toggle_add();
        assert!(matches!(panel.session(), FormSession::CreatingNew(_)));
        panel.toggle_add();
        assert_eq!(panel.session(), &FormSession::Closed);

        panel.edit(VehicleId(7)).unwrap();
        panel.toggle_add();
        assert_eq!(panel.session(), &FormSession::Closed);
        assert!(matches!(panel.submit(), Err(PanelError::FormClosed)));
    }

    #[test]
    fn incomplete_draft_is_not_submitted() {
        let mut panel = mounted(true, "[]");
        panel.toggle_add();
        panel.set_field(DraftField::Brand, "Toyota").unwrap();
        let err = panel.submit().unwrap_err();
        assert!(matches!(err, PanelError::MissingField(DraftField::Model)));
    }

    #[test]
    fn confirmed_delete_reloads_on_success() {
        let mut panel = mounted(true, TWO_VEHICLES);
        let pending = panel.delete(VehicleId(7)).unwrap();
        assert_eq!(pending.request.method, HttpMethod::Delete);
        assert_eq!(pending.request.path, "http://admin.local/api/vehicles/7");

        let mut transport = ScriptedTransport::default()
            .reply(204, "")
            .reply(200, ONE_VEHICLE);
        run_until_idle(&mut panel, &mut transport, vec![pending]);
        assert_eq!(transport.sent.len(), 2);
        assert_eq!(panel.vehicles().len(), 1);
        assert_eq!(
            panel.dialogs().prompts,
            vec!["Êtes-vous sûr de vouloir supprimer ce véhicule ?"]
        );
        assert_eq!(panel.dialogs().notices, vec!["Véhicule supprimé avec succès"]);
    }

    #[test]
    fn delete_of_record_being_edited_closes_form() {
        let mut panel = mounted(true, ONE_VEHICLE);
        panel.edit(VehicleId(7)).unwrap();
        let pending = panel.delete(VehicleId(7)).unwrap();

        let mut transport = ScriptedTransport::default()
            .reply(204, "")
            .reply(200, "[]");
        run_until_idle(&mut panel, &mut transport, vec![pending]);
        assert_eq!(transport.sent.len(), 2, "exactly one reload");
        assert!(panel.vehicles().is_empty());
        assert_eq!(panel.session(), &FormSession::Closed);
        assert!(matches!(panel.submit(), Err(PanelError::FormClosed)));
    }

    #[test]
    fn delete_closes_open_create_form() {
        let mut panel = mounted(true, TWO_VEHICLES);
        panel.toggle_add();
        let pending = panel.delete(VehicleId(8)).unwrap();
        let follow_up = panel.complete(pending.operation, Ok(response(204, "")));
        assert_eq!(follow_up.len(), 1);
        assert_eq!(follow_up[0].operation, Operation::LoadVehicles);
        assert!(!panel.session().is_open());
    }

    #[test]
    fn failed_delete_keeps_list_and_stays_silent() {
        let mut panel = mounted(true, TWO_VEHICLES);
        let pending = panel.delete(VehicleId(7)).unwrap();
        let mut transport = ScriptedTransport::default().reply(500, "locked");
        run_until_idle(&mut panel, &mut transport, vec![pending]);
        assert_eq!(transport.sent.len(), 1, "no reload after a failed delete");
        assert_eq!(panel.vehicles().len(), 2);
        assert!(panel.dialogs().notices.is_empty());
    }

    #[test]
    fn failed_delete_notifies_when_enabled() {
        let mut panel = VehiclesPanel::new(
            PanelConfig::new(BASE_URL)
                .with_locale(Locale::En)
                .with_delete_failure_notice(true),
            RecordingDialogs {
                answer: true,
                ..RecordingDialogs::default()
            },
        );
        let pending = panel.delete(VehicleId(3)).unwrap();
        let mut transport = ScriptedTransport::default().reply(404, "");
        run_until_idle(&mut panel, &mut transport, vec![pending]);
        assert_eq!(panel.dialogs().notices, vec!["The vehicle could not be deleted"]);
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let mut panel = mounted(false, TWO_VEHICLES);
        assert!(panel.delete(VehicleId(7)).is_none());
        assert_eq!(panel.dialogs().prompts.len(), 1);
        assert_eq!(panel.vehicles().len(), 2);
    }

    #[test]
    fn overlapping_loads_last_response_wins() {
        let mut panel = panel(true);
        let first = panel.load_vehicles();
        let second = panel.load_vehicles();
        // The second request's response arrives first.
        panel.complete(second.operation, Ok(response(200, TWO_VEHICLES)));
        panel.complete(first.operation, Ok(response(200, ONE_VEHICLE)));
        assert_eq!(panel.vehicles().len(), 1);
    }

    #[test]
    fn success_closes_form_even_if_reopened_meanwhile() {
        let mut panel = mounted(true, TWO_VEHICLES);
        panel.toggle_add();
        fill_yaris(&mut panel);
        let pending = panel.submit().unwrap();
        panel.edit(VehicleId(8)).unwrap();

        let follow_up = panel.complete(pending.operation, Ok(response(201, "{}")));
        assert_eq!(follow_up.len(), 1);
        assert_eq!(follow_up[0].operation, Operation::LoadVehicles);
        assert_eq!(panel.session(), &FormSession::Closed);
    }

    #[test]
    fn views_follow_state() {
        let mut panel = mounted(true, TWO_VEHICLES);
        assert_eq!(panel.heading(), "Gestion des véhicules");
        assert_eq!(panel.toggle_label(), "Ajouter un véhicule");
        assert!(panel.form_view().is_none());
        let ListView::Table { rows, .. } = panel.list_view() else {
            panic!("expected a table");
        };
        assert_eq!(rows[1].owner, "Inès Roux");
        assert_eq!(rows[1].status_label, "En réparation");

        panel.edit(VehicleId(8)).unwrap();
        assert_eq!(panel.toggle_label(), "Annuler");
        assert_eq!(panel.form_view().unwrap().submit_label, "Modifier");
        assert_eq!(
            panel.session().draft().unwrap().status,
            VehicleStatus::Repair
        );
    }
}
