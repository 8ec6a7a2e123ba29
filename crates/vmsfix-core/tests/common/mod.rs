// In-memory stand-in for the VMS management API, served through wiremock.
//
// Keeps just enough state for create → list → delete cycles and records
// every RPC payload so tests can assert on what was sent.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use vmsfix_core::{FixtureConfig, FixtureContext, PollConfig};

#[derive(Debug, Default)]
struct State {
    cameras: Vec<Value>,
    groups: Vec<Value>,
    roles: Vec<Value>,
    users: Vec<Value>,
    assignments: Vec<Value>,
    maps: Vec<Value>,
    layouts: Vec<Value>,
    current_layout: Option<String>,
    macros: Vec<Value>,
    calls: Vec<(String, Value)>,
    failing: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeVms {
    state: Arc<Mutex<State>>,
}

impl FakeVms {
    /// Mount the RPC endpoint plus `/hosts` and `/product/version` under
    /// any prefix.
    pub async fn mount(server: &MockServer) -> Self {
        let fake = Self::default();
        Mock::given(method("POST"))
            .and(path_regex(r"/grpc$"))
            .respond_with(fake.clone())
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"/hosts$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Server1"])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"/product/version$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "2.0.0" })))
            .mount(server)
            .await;
        fake
    }

    /// Make every later call to `method` answer HTTP 500.
    pub fn fail(&self, method: &str) {
        self.state.lock().unwrap().failing.insert(method.to_owned());
    }

    /// `data` payloads sent to `method`, oldest first.
    pub fn calls(&self, method: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, data)| data.clone())
            .collect()
    }

    pub fn seed_user(&self, index: &str, login: &str) {
        self.state.lock().unwrap().users.push(json!({
            "index": index,
            "login": login,
            "name": login,
            "enabled": true,
        }));
    }

    pub fn seed_macro(&self, guid: &str, name: &str) {
        self.state.lock().unwrap().macros.push(json!({
            "guid": guid,
            "name": name,
            "enabled": true,
            "mode": { "common": {} },
        }));
    }
}

// ── Payload helpers ─────────────────────────────────────────────────

fn array(data: &Value, key: &str) -> Vec<Value> {
    data.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn strings(data: &Value, key: &str) -> Vec<String> {
    array(data, key)
        .iter()
        .filter_map(|v| v.as_str().map(str::to_owned))
        .collect()
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn property(unit: &Value, id: &str) -> Option<Value> {
    array(unit, "properties")
        .into_iter()
        .find(|p| p["id"] == id)
        .and_then(|p| {
            ["value_string", "value_int32", "value_bool"]
                .iter()
                .find_map(|k| p.get(*k).cloned())
        })
}

fn property_text(unit: &Value, id: &str) -> String {
    property(unit, id)
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}

fn camera(binding: &str, channel: usize, display_id: &str, name: &str) -> Value {
    let access_point = format!("{binding}/SourceEndpoint.video:{channel}:0");
    json!({
        "access_point": access_point,
        "display_id": display_id,
        "display_name": name,
        "is_activated": true,
        "detectors": [{
            "access_point": format!("{binding}/AVDetector.{channel}/EventSupplier"),
            "display_id": "1",
            "display_name": "Motion",
            "type": "MotionDetection",
            "is_activated": true,
        }],
    })
}

/// Whether config unit `uid` is the unit behind camera endpoint `ap`.
fn owns(uid: &str, access_point: &str) -> bool {
    match uid.split_once("/VideoChannel.") {
        Some((device, channel)) => {
            access_point.starts_with(&format!("{device}/SourceEndpoint.video:{channel}:"))
        }
        None => access_point.starts_with(&format!("{uid}/SourceEndpoint.")),
    }
}

fn retain_unless_listed(items: &mut Vec<Value>, key: &str, removed: &[String]) {
    items.retain(|item| !removed.contains(&text(item, key)));
}

// ── Method handlers ─────────────────────────────────────────────────

impl State {
    fn change_config(&mut self, data: &Value) -> Value {
        for added in array(data, "added") {
            let host = text(&added, "uid");
            for unit in array(&added, "units") {
                let device_id = property_text(&unit, "display_id");
                let binding = format!("{host}/DeviceIpint.{device_id}");
                let channels = array(&unit, "units");
                if channels.is_empty() {
                    let name = property_text(&unit, "display_name");
                    self.cameras.push(camera(&binding, 0, &device_id, &name));
                }
                for (index, channel) in channels.iter().enumerate() {
                    self.cameras.push(camera(
                        &binding,
                        index,
                        &property_text(channel, "display_id"),
                        &property_text(channel, "display_name"),
                    ));
                }
            }
        }

        for changed in array(data, "changed") {
            let uid = text(&changed, "uid");
            for cam in &mut self.cameras {
                if !owns(&uid, &text(cam, "access_point")) {
                    continue;
                }
                for key in ["display_id", "display_name"] {
                    if let Some(value) = property(&changed, key) {
                        cam[key] = value;
                    }
                }
            }
        }

        for removed in array(data, "removed") {
            let prefix = format!("{}/", text(&removed, "uid"));
            self.cameras
                .retain(|c| !text(c, "access_point").starts_with(&prefix));
        }

        json!({ "failed": [], "added": [] })
    }

    fn change_groups(&mut self, data: &Value) -> Value {
        self.groups.extend(array(data, "added_groups"));
        for change in array(data, "changed_groups_info") {
            let id = text(&change, "group_id");
            if let Some(group) = self.groups.iter_mut().find(|g| text(g, "group_id") == id) {
                for key in ["name", "description", "parent"] {
                    if let Some(value) = change.get(key) {
                        group[key] = value.clone();
                    }
                }
            }
        }
        retain_unless_listed(&mut self.groups, "group_id", &strings(data, "removed_groups"));
        json!({})
    }

    fn change_security(&mut self, data: &Value) -> Value {
        self.roles.extend(array(data, "added_roles"));
        self.users.extend(array(data, "added_users"));
        self.assignments.extend(array(data, "added_users_assignments"));

        let removed_roles = strings(data, "removed_roles");
        let removed_users = strings(data, "removed_users");
        retain_unless_listed(&mut self.roles, "index", &removed_roles);
        retain_unless_listed(&mut self.users, "index", &removed_users);
        retain_unless_listed(&mut self.assignments, "role_id", &removed_roles);
        retain_unless_listed(&mut self.assignments, "user_id", &removed_users);
        json!({})
    }

    fn change_maps(&mut self, data: &Value) -> Value {
        self.maps.extend(array(data, "created"));
        retain_unless_listed(&mut self.maps, "id", &strings(data, "removed"));
        json!({})
    }

    fn update_layouts(&mut self, data: &Value) -> Value {
        self.layouts.extend(array(data, "created"));
        for changed in array(data, "changed") {
            let id = text(&changed, "id");
            if let Some(layout) = self.layouts.iter_mut().find(|l| text(l, "id") == id) {
                *layout = changed;
            }
        }
        retain_unless_listed(&mut self.layouts, "id", &strings(data, "removed"));

        let order = strings(data, "order");
        if !order.is_empty() {
            self.layouts.sort_by_key(|l| {
                let id = text(l, "id");
                order.iter().position(|o| *o == id).unwrap_or(usize::MAX)
            });
        }
        if let Some(id) = data.get("default_layout_id").and_then(Value::as_str) {
            self.current_layout = Some(id.to_owned());
        }
        json!({})
    }

    fn handle(&mut self, method: &str, data: &Value) -> Option<Value> {
        let reply = match method {
            "axxonsoft.bl.config.ConfigurationService.ChangeConfig" => self.change_config(data),
            "axxonsoft.bl.domain.DomainService.ListCameras" => json!({ "items": self.cameras }),
            "axxonsoft.bl.domain.DomainService.ListArchives" => json!({ "items": [] }),
            "axxonsoft.bl.groups.GroupManager.ListGroups" => json!({ "groups": self.groups }),
            "axxonsoft.bl.groups.GroupManager.ChangeGroups" => self.change_groups(data),
            "axxonsoft.bl.security.SecurityService.ListConfig" => json!({
                "roles": self.roles,
                "users": self.users,
                "user_assignments": self.assignments,
            }),
            "axxonsoft.bl.security.SecurityService.ChangeConfig" => self.change_security(data),
            "axxonsoft.bl.maps.MapService.ListMaps" => json!({ "items": self.maps }),
            "axxonsoft.bl.maps.MapService.ChangeMaps" => self.change_maps(data),
            "axxonsoft.bl.layout.LayoutManager.ListLayouts" => json!({
                "items": self.layouts,
                "current": self.current_layout,
            }),
            "axxonsoft.bl.layout.LayoutManager.Update" => self.update_layouts(data),
            "axxonsoft.bl.logic.LogicService.ListMacros" => json!({ "items": self.macros }),
            "axxonsoft.bl.logic.LogicService.ChangeMacros" => {
                retain_unless_listed(&mut self.macros, "guid", &strings(data, "removed_macros"));
                json!({})
            }
            "axxonsoft.bl.groups.GroupManager.SetObjectsMembership"
            | "axxonsoft.bl.maps.MapService.ChangeMarkers"
            | "axxonsoft.bl.security.SecurityService.SetGlobalPermissions"
            | "axxonsoft.bl.security.SecurityService.SetObjectPermissions" => json!({}),
            _ => return None,
        };
        Some(reply)
    }
}

impl Respond for FakeVms {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let envelope: Value = serde_json::from_slice(&request.body).unwrap();
        let method = text(&envelope, "method");
        let data = envelope.get("data").cloned().unwrap_or(Value::Null);

        let mut state = self.state.lock().unwrap();
        state.calls.push((method.clone(), data.clone()));
        if state.failing.contains(&method) {
            return ResponseTemplate::new(500).set_body_string("injected failure");
        }
        match state.handle(&method, &data) {
            Some(reply) => ResponseTemplate::new(200).set_body_json(reply),
            None => ResponseTemplate::new(404).set_body_string(format!("unknown method {method}")),
        }
    }
}

// ── Context setup ───────────────────────────────────────────────────

pub fn config_for(server: &MockServer) -> FixtureConfig {
    let mut config = FixtureConfig::new(Url::parse(&server.uri()).unwrap());
    config.readiness = PollConfig {
        max_attempts: 3,
        interval: Duration::from_millis(10),
    };
    config
}

pub async fn setup_with(
    configure: impl FnOnce(&mut FixtureConfig),
) -> (MockServer, FakeVms, FixtureContext) {
    let server = MockServer::start().await;
    let fake = FakeVms::mount(&server).await;
    let mut config = config_for(&server);
    configure(&mut config);
    let ctx = FixtureContext::new(config).unwrap();
    (server, fake, ctx)
}

pub async fn setup() -> (MockServer, FakeVms, FixtureContext) {
    setup_with(|_| {}).await
}
