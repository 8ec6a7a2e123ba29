#![allow(clippy::unwrap_used)]
// Fixture context tests against an in-memory VMS served by wiremock.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use vmsfix_core::{
    AnnihilationReport, CameraBatch, CoreError, Creation, DeleteTolerance, DisplayIdPlan,
    EntityKind, FailurePolicy, FixtureContext, GeoPoint, GlobalPermissions, LayoutSpec,
    MarkerPosition, Outcome, PanelKind, Readiness, Selection,
};

use common::{config_for, setup, setup_with};

const CHANGE_GROUPS: &str = "axxonsoft.bl.groups.GroupManager.ChangeGroups";
const LIST_GROUPS: &str = "axxonsoft.bl.groups.GroupManager.ListGroups";
const CHANGE_SECURITY: &str = "axxonsoft.bl.security.SecurityService.ChangeConfig";
const CHANGE_CONFIG: &str = "axxonsoft.bl.config.ConfigurationService.ChangeConfig";
const LIST_CAMERAS: &str = "axxonsoft.bl.domain.DomainService.ListCameras";
const CHANGE_MAPS: &str = "axxonsoft.bl.maps.MapService.ChangeMaps";
const CHANGE_MARKERS: &str = "axxonsoft.bl.maps.MapService.ChangeMarkers";
const UPDATE_LAYOUTS: &str = "axxonsoft.bl.layout.LayoutManager.Update";
const SET_GLOBAL_PERMISSIONS: &str = "axxonsoft.bl.security.SecurityService.SetGlobalPermissions";

fn confirmed<I: Clone>(creation: &Creation<I>) -> I {
    creation
        .confirmed()
        .cloned()
        .unwrap_or_else(|| panic!("creation not confirmed: {:?}", creation.failure()))
}

// ── Groups ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_created_group_is_listed_under_its_id() {
    let (_server, _fake, mut ctx) = setup().await;

    let id = confirmed(&ctx.create_group("Entrance", None).await.unwrap());

    let groups = ctx.list_groups().await.unwrap().success().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, id);
    assert_eq!(groups[0].name, "Entrance");
    assert_eq!(ctx.snapshot().group_id("Entrance").unwrap(), id);
}

#[tokio::test]
async fn test_set_group_reparents_and_returns_to_root() {
    let (_server, _fake, mut ctx) = setup().await;

    let parent = confirmed(&ctx.create_group("Building", None).await.unwrap());
    let child = confirmed(&ctx.create_group("Floor 1", None).await.unwrap());

    let outcome = ctx.set_group("Floor 1", Some("Building")).await.unwrap();
    assert!(outcome.is_success());
    let floor = ctx.snapshot().groups().iter().find(|g| g.id == child).unwrap();
    assert_eq!(floor.parent.as_deref(), Some(parent.as_str()));

    ctx.set_group("Floor 1", None).await.unwrap().into_result().unwrap();
    let floor = ctx.snapshot().groups().iter().find(|g| g.id == child).unwrap();
    assert_eq!(floor.parent, None);
}

#[tokio::test]
async fn test_rename_group_changes_only_the_name() {
    let (_server, fake, mut ctx) = setup().await;
    let id = confirmed(&ctx.create_group("Old", None).await.unwrap());

    ctx.rename_group("Old", "New").await.unwrap().into_result().unwrap();

    let change = fake.calls(CHANGE_GROUPS).pop().unwrap();
    assert_eq!(
        change,
        json!({ "changed_groups_info": [{ "group_id": id, "name": "New" }] })
    );
    assert_eq!(ctx.snapshot().group_id("New").unwrap(), id);
}

#[tokio::test]
async fn test_cameras_join_group_by_access_point() {
    let (_server, fake, mut ctx) = setup().await;
    ctx.create_cameras(CameraBatch::new(1)).await.unwrap();
    let group = confirmed(&ctx.create_group("Lobby", None).await.unwrap());

    ctx.add_cameras_to_group("Lobby", &["1"]).await.unwrap().into_result().unwrap();

    let membership = fake
        .calls("axxonsoft.bl.groups.GroupManager.SetObjectsMembership")
        .pop()
        .unwrap();
    assert_eq!(
        membership,
        json!({ "added_objects": [{
            "group_id": group,
            "object": "hosts/Server1/DeviceIpint.1/SourceEndpoint.video:0:0",
        }] })
    );
}

#[tokio::test]
async fn test_annihilate_all_groups_empties_the_list() {
    let (_server, _fake, mut ctx) = setup().await;
    for name in ["A", "B", "C"] {
        confirmed(&ctx.create_group(name, None).await.unwrap());
    }

    let report = ctx.annihilate(EntityKind::Groups, Selection::All).await.unwrap();

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.deleted.len(), 3);
    let groups = ctx.list_groups().await.unwrap().success().unwrap();
    assert!(groups.is_empty());
}

// ── Roles & users ───────────────────────────────────────────────────

#[tokio::test]
async fn test_role_user_assignment_uses_resolved_ids() {
    let (_server, fake, mut ctx) = setup().await;

    let role_id = confirmed(&ctx.create_role("Operators").await.unwrap());
    let user_id = confirmed(&ctx.create_user("alice").await.unwrap());
    ctx.assign_role("alice", "Operators").await.unwrap().into_result().unwrap();
    ctx.set_user_password("alice", "s3cret").await.unwrap().into_result().unwrap();

    let calls = fake.calls(CHANGE_SECURITY);
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0]["added_roles"][0]["index"], role_id.as_str());
    assert_eq!(
        calls[0]["added_roles"][0]["timezone_id"],
        "00000000-0000-0000-0000-000000000000"
    );
    assert_eq!(calls[1]["added_users"][0]["index"], user_id.as_str());
    assert_eq!(
        calls[2],
        json!({ "added_users_assignments": [{ "user_id": user_id, "role_id": role_id }] })
    );
    assert_eq!(
        calls[3],
        json!({ "user_passwords": [{ "user_index": user_id, "password": "s3cret" }] })
    );

    let alice = ctx.snapshot().user("alice").unwrap();
    assert_eq!(alice.roles, vec![role_id]);
}

#[tokio::test]
async fn test_unknown_role_is_not_found_and_nothing_is_sent() {
    let (_server, fake, mut ctx) = setup().await;
    confirmed(&ctx.create_user("bob").await.unwrap());
    let before = fake.calls(CHANGE_SECURITY).len();

    let err = ctx.assign_role("bob", "Ghosts").await.unwrap_err();

    assert!(
        matches!(err, CoreError::NotFound { kind: EntityKind::Roles, ref name } if name == "Ghosts"),
        "unexpected error: {err}"
    );
    assert_eq!(fake.calls(CHANGE_SECURITY).len(), before);
}

#[tokio::test]
async fn test_role_permissions_are_keyed_by_role_id() {
    let (_server, fake, mut ctx) = setup().await;
    let role_id = confirmed(&ctx.create_role("Admins").await.unwrap());

    ctx.set_role_permissions("Admins", GlobalPermissions::full())
        .await
        .unwrap()
        .into_result()
        .unwrap();

    let sent = fake.calls(SET_GLOBAL_PERMISSIONS).pop().unwrap();
    let permissions = &sent["permissions"][role_id.as_str()];
    assert_eq!(permissions["default_camera_access"], "CAMERA_ACCESS_FULL");
    assert_eq!(permissions["unrestricted_access"], true);
}

#[tokio::test]
async fn test_annihilate_users_spares_the_root_account() {
    let (_server, fake, mut ctx) = setup().await;
    fake.seed_user("root-id", "root");
    confirmed(&ctx.create_user("carol").await.unwrap());

    let report = ctx.annihilate(EntityKind::Users, Selection::All).await.unwrap();

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.skipped, vec!["root-id".to_owned()]);
    let (_, users) = ctx.list_security_config().await.unwrap().success().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].login, "root");
}

#[tokio::test]
async fn test_annihilate_all_roles_empties_the_list() {
    let (_server, fake, mut ctx) = setup().await;
    let guards = confirmed(&ctx.create_role("Guards").await.unwrap());
    let operators = confirmed(&ctx.create_role("Operators").await.unwrap());

    let report = ctx.annihilate(EntityKind::Roles, Selection::All).await.unwrap();

    assert!(report.is_clean(), "{report:?}");
    let removal = fake.calls(CHANGE_SECURITY).pop().unwrap();
    assert_eq!(removal, json!({ "removed_roles": [guards, operators] }));
    let (roles, _users) = ctx.list_security_config().await.unwrap().success().unwrap();
    assert!(roles.is_empty());
}

// ── Failure policy ──────────────────────────────────────────────────

#[tokio::test]
async fn test_lenient_failure_is_unconfirmed_creation() {
    let (_server, fake, mut ctx) = setup().await;
    fake.fail(CHANGE_GROUPS);

    let creation = ctx.create_group("Doomed", None).await.unwrap();

    assert!(!creation.is_confirmed());
    assert!(!creation.minted().is_empty());
    let failure = creation.failure().unwrap();
    assert_eq!(failure.status, Some(500));
    assert_eq!(failure.method, CHANGE_GROUPS);
    assert!(ctx.snapshot().group_id("Doomed").is_err());
}

#[tokio::test]
async fn test_strict_failure_is_an_error() {
    let (_server, fake, mut ctx) = setup_with(|c| c.policy = FailurePolicy::Strict).await;
    fake.fail(CHANGE_GROUPS);

    let err = ctx.create_group("Doomed", None).await.unwrap_err();

    assert!(matches!(err, CoreError::Rpc { .. }), "unexpected error: {err}");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_failed_list_keeps_stale_slice() {
    let (_server, fake, mut ctx) = setup().await;
    confirmed(&ctx.create_group("Kept", None).await.unwrap());
    let stamp = ctx.snapshot().collected_at(EntityKind::Groups).unwrap();
    fake.fail(LIST_GROUPS);

    let slice = ctx.refresh(EntityKind::Groups).await.unwrap();

    assert_eq!(slice.len(), 1);
    assert_eq!(ctx.snapshot().collected_at(EntityKind::Groups), Some(stamp));
}

// ── Annihilator tolerance ───────────────────────────────────────────

#[tokio::test]
async fn test_verify_skips_ids_the_server_does_not_report() {
    let (_server, fake, mut ctx) = setup().await;
    let id = confirmed(&ctx.create_group("Real", None).await.unwrap());

    let report = ctx
        .annihilate(EntityKind::Groups, Selection::ids([id.as_str(), "missing"]))
        .await
        .unwrap();

    assert_eq!(report.deleted, vec![id.clone()]);
    assert_eq!(report.skipped, vec!["missing".to_owned()]);
    assert!(report.is_clean());
    let removal = fake.calls(CHANGE_GROUPS).pop().unwrap();
    assert_eq!(removal, json!({ "removed_groups": [id] }));
}

#[tokio::test]
async fn test_assume_partial_sends_every_requested_id() {
    let (_server, fake, mut ctx) =
        setup_with(|c| c.delete_tolerance = DeleteTolerance::AssumePartial).await;
    let id = confirmed(&ctx.create_group("Real", None).await.unwrap());

    let report = ctx
        .annihilate(EntityKind::Groups, Selection::ids([id.as_str(), "missing"]))
        .await
        .unwrap();

    assert!(report.skipped.is_empty());
    let removal = fake.calls(CHANGE_GROUPS).pop().unwrap();
    assert_eq!(removal, json!({ "removed_groups": [id, "missing"] }));
}

#[tokio::test]
async fn test_assume_partial_resolves_cameras_on_a_fresh_context() {
    let (server, fake, mut seeder) = setup().await;
    seeder.create_cameras(CameraBatch::new(1)).await.unwrap();

    let mut config = config_for(&server);
    config.delete_tolerance = DeleteTolerance::AssumePartial;
    let mut ctx = FixtureContext::new(config).unwrap();
    assert!(ctx.snapshot().cameras().is_empty());

    let report = ctx
        .annihilate(EntityKind::Cameras, Selection::ids(["1"]))
        .await
        .unwrap();

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.deleted, vec!["hosts/Server1/DeviceIpint.1".to_owned()]);
    let removal = fake.calls(CHANGE_CONFIG).pop().unwrap();
    assert_eq!(removal, json!({ "removed": [{ "uid": "hosts/Server1/DeviceIpint.1" }] }));
    let cameras = ctx.list_cameras().await.unwrap().success().unwrap();
    assert!(cameras.is_empty());
}

#[tokio::test]
async fn test_unresolvable_ids_make_the_report_unclean() {
    let (server, fake, mut seeder) = setup().await;
    seeder.create_cameras(CameraBatch::new(1)).await.unwrap();
    let removals_before = fake.calls(CHANGE_CONFIG).len();
    fake.fail(LIST_CAMERAS);

    let mut config = config_for(&server);
    config.delete_tolerance = DeleteTolerance::AssumePartial;
    let mut ctx = FixtureContext::new(config).unwrap();

    let report = ctx
        .annihilate(EntityKind::Cameras, Selection::ids(["1"]))
        .await
        .unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.unresolved, vec!["1".to_owned()]);
    assert!(report.deleted.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(fake.calls(CHANGE_CONFIG).len(), removals_before);
}

#[tokio::test]
async fn test_verify_with_failed_refresh_reports_ids_unresolved() {
    let (_server, fake, mut ctx) = setup().await;
    fake.fail(LIST_GROUPS);

    let report = ctx
        .annihilate(EntityKind::Groups, Selection::ids(["g-1"]))
        .await
        .unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.unresolved, vec!["g-1".to_owned()]);
    assert!(fake.calls(CHANGE_GROUPS).is_empty());
}

#[tokio::test]
async fn test_read_only_kinds_cannot_be_annihilated() {
    let (_server, _fake, mut ctx) = setup().await;

    let err = ctx
        .annihilate(EntityKind::Archives, Selection::All)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Unsupported { .. }));
}

#[tokio::test]
async fn test_macros_are_listed_and_annihilated() {
    let (_server, fake, mut ctx) = setup().await;
    fake.seed_macro("m-1", "Recorded by UI test");

    let macros = ctx.list_macros().await.unwrap().success().unwrap();
    assert_eq!(macros.len(), 1);
    assert_eq!(macros[0].id, "m-1");

    let report: AnnihilationReport = ctx.annihilate_records(&macros).await.unwrap();
    assert!(report.is_clean());
    assert!(ctx.snapshot().macros().is_empty());
}

// ── Cameras ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_standalone_cameras_number_after_existing_ones() {
    let (_server, _fake, mut ctx) = setup().await;

    let first = ctx.create_cameras(CameraBatch::new(2)).await.unwrap();
    assert_eq!(
        confirmed(&first),
        DisplayIdPlan::Standalone(vec!["1".into(), "2".into()])
    );

    let second = ctx.create_cameras(CameraBatch::new(1)).await.unwrap();
    assert_eq!(confirmed(&second).camera_ids(), ["3"]);

    let ids: Vec<_> = ctx
        .snapshot()
        .cameras()
        .iter()
        .map(|c| c.display_id.clone())
        .collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[tokio::test]
async fn test_display_id_change_targets_binding_or_videochannel() {
    let (_server, fake, mut ctx) = setup().await;
    ctx.create_cameras(CameraBatch::new(1).starting_at(2))
        .await
        .unwrap();
    let nvr = ctx
        .create_cameras(CameraBatch::new(2).ip_server())
        .await
        .unwrap();
    assert_eq!(confirmed(&nvr).camera_ids(), ["3.0", "3.1"]);

    ctx.change_camera_display_id("2", "20").await.unwrap().into_result().unwrap();
    ctx.change_camera_display_id("3.1", "7.1").await.unwrap().into_result().unwrap();

    let changes: Vec<_> = fake
        .calls(CHANGE_CONFIG)
        .into_iter()
        .filter(|c| c.get("changed").is_some())
        .map(|c| c["changed"][0]["uid"].clone())
        .collect();
    assert_eq!(
        changes,
        vec![
            json!("hosts/Server1/DeviceIpint.2"),
            json!("hosts/Server1/DeviceIpint.3/VideoChannel.1"),
        ]
    );

    let snapshot = ctx.snapshot();
    assert!(snapshot.camera_by_display_id("20").is_ok());
    assert!(snapshot.camera_by_display_id("7.1").unwrap().is_ip_server());
    assert_eq!(
        snapshot.camera_by_display_id("3.0").unwrap().display_id,
        "3.0"
    );
}

#[tokio::test]
async fn test_camera_annihilation_removes_each_device_once() {
    let (_server, fake, mut ctx) = setup().await;
    ctx.create_cameras(CameraBatch::new(1)).await.unwrap();
    ctx.create_cameras(CameraBatch::new(3).ip_server())
        .await
        .unwrap();
    assert_eq!(ctx.snapshot().cameras().len(), 4);

    let report = ctx.annihilate(EntityKind::Cameras, Selection::All).await.unwrap();

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(
        report.deleted,
        vec![
            "hosts/Server1/DeviceIpint.1".to_owned(),
            "hosts/Server1/DeviceIpint.2".to_owned(),
        ]
    );
    let removal = fake.calls(CHANGE_CONFIG).pop().unwrap();
    assert_eq!(
        removal,
        json!({ "removed": [
            { "uid": "hosts/Server1/DeviceIpint.1" },
            { "uid": "hosts/Server1/DeviceIpint.2" },
        ] })
    );
    assert!(ctx.snapshot().cameras().is_empty());
}

#[tokio::test]
async fn test_detectors_are_derived_from_cameras() {
    let (_server, _fake, mut ctx) = setup().await;
    ctx.create_cameras(CameraBatch::new(2)).await.unwrap();

    let detectors = ctx.list_detectors().await.unwrap().success().unwrap();

    assert_eq!(detectors.len(), 2);
    assert_eq!(detectors[0].detector_type.as_deref(), Some("MotionDetection"));
    assert_eq!(
        detectors[1].camera_access_point,
        "hosts/Server1/DeviceIpint.2/SourceEndpoint.video:0:0"
    );
}

// ── Maps ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_raster_map_reads_image_dimensions_and_size() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("floor.png");
    image::RgbImage::new(64, 48).save(&file).unwrap();
    let size = std::fs::metadata(&file).unwrap().len();

    let data_dir = dir.path().to_path_buf();
    let (_server, fake, mut ctx) = setup_with(move |c| c.test_data_dir = data_dir).await;

    let id = confirmed(&ctx.create_raster_map("Floor", "floor.png").await.unwrap());

    let created = fake.calls(CHANGE_MAPS).pop().unwrap();
    assert_eq!(
        created["created"][0],
        json!({
            "id": id,
            "name": "Floor",
            "type": "MAP_TYPE_RASTER",
            "image": { "file_name": "floor.png", "width": 64, "height": 48, "size": size },
        })
    );
    assert_eq!(ctx.snapshot().map_id("Floor").unwrap(), id);
}

#[tokio::test]
async fn test_missing_raster_image_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_path_buf();
    let (_server, fake, mut ctx) = setup_with(move |c| c.test_data_dir = data_dir).await;

    let err = ctx.create_raster_map("Floor", "absent.png").await.unwrap_err();

    assert!(matches!(err, CoreError::Image { .. }), "unexpected error: {err}");
    assert!(fake.calls(CHANGE_MAPS).is_empty());
}

#[tokio::test]
async fn test_markers_point_at_cameras_and_maps() {
    let (_server, fake, mut ctx) = setup().await;
    ctx.create_cameras(CameraBatch::new(1)).await.unwrap();
    let center = GeoPoint {
        latitude: 55.75,
        longitude: 37.62,
    };
    let city = confirmed(&ctx.create_geo_map("City", center, 12).await.unwrap());
    let district = confirmed(&ctx.create_geo_map("District", center, 15).await.unwrap());

    ctx.add_camera_marker("City", "1", MarkerPosition::Geo(center))
        .await
        .unwrap();
    ctx.add_transition_marker("City", "District", MarkerPosition::Pixel { x: 10.0, y: 20.0 })
        .await
        .unwrap();

    let markers = fake.calls(CHANGE_MARKERS);
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0]["map_id"], city.as_str());
    assert_eq!(
        markers[0]["created"][0]["target"],
        json!({ "camera": { "access_point": "hosts/Server1/DeviceIpint.1/SourceEndpoint.video:0:0" } })
    );
    assert_eq!(
        markers[1]["created"][0]["target"],
        json!({ "transition": { "map_id": district } })
    );
}

#[tokio::test]
async fn test_annihilate_all_maps_empties_the_list() {
    let (_server, fake, mut ctx) = setup().await;
    let center = GeoPoint {
        latitude: 55.75,
        longitude: 37.62,
    };
    let city = confirmed(&ctx.create_geo_map("City", center, 12).await.unwrap());
    let district = confirmed(&ctx.create_geo_map("District", center, 15).await.unwrap());

    let report = ctx.annihilate(EntityKind::Maps, Selection::All).await.unwrap();

    assert!(report.is_clean(), "{report:?}");
    let removal = fake.calls(CHANGE_MAPS).pop().unwrap();
    assert_eq!(removal, json!({ "removed": [city, district] }));
    let maps = ctx.list_maps().await.unwrap().success().unwrap();
    assert!(maps.is_empty());
}

// ── Layouts ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_layouts_are_created_ordered_shared_and_defaulted() {
    let (_server, fake, mut ctx) = setup().await;
    ctx.create_cameras(CameraBatch::new(2)).await.unwrap();
    let role_id = confirmed(&ctx.create_role("Guards").await.unwrap());

    let first = confirmed(
        &ctx.create_layout(LayoutSpec::for_cameras("Both", &["1", "2"]))
            .await
            .unwrap(),
    );
    let second = confirmed(
        &ctx.create_layout(LayoutSpec::grid("Alarms", 1, 1).panel(0, 0, PanelKind::Alarms))
            .await
            .unwrap(),
    );

    ctx.order_layouts(&["Alarms"]).await.unwrap().into_result().unwrap();
    let order = fake.calls(UPDATE_LAYOUTS).pop().unwrap();
    assert_eq!(order, json!({ "order": [second, first] }));

    ctx.set_default_layout("Both").await.unwrap().into_result().unwrap();
    ctx.share_layout("Both", &["Guards"]).await.unwrap().into_result().unwrap();

    let layouts = ctx.snapshot().layouts();
    assert_eq!(layouts[0].name, "Alarms");
    let both = layouts.iter().find(|l| l.id == first).unwrap();
    assert!(both.is_default);
    assert_eq!(both.shared_with, vec![role_id]);
    assert_eq!((both.rows, both.columns), (1, 2));
}

#[tokio::test]
async fn test_annihilate_all_layouts_empties_the_list() {
    let (_server, fake, mut ctx) = setup().await;
    let alarms = confirmed(
        &ctx.create_layout(LayoutSpec::grid("Alarms", 1, 1).panel(0, 0, PanelKind::Alarms))
            .await
            .unwrap(),
    );
    let events = confirmed(
        &ctx.create_layout(LayoutSpec::grid("Events", 1, 1).panel(0, 0, PanelKind::Events))
            .await
            .unwrap(),
    );

    let report = ctx.annihilate(EntityKind::Layouts, Selection::All).await.unwrap();

    assert!(report.is_clean(), "{report:?}");
    let removal = fake.calls(UPDATE_LAYOUTS).pop().unwrap();
    assert_eq!(removal, json!({ "removed": [alarms, events] }));
    let layouts = ctx.list_layouts().await.unwrap().success().unwrap();
    assert!(layouts.is_empty());
}

// ── Snapshot & hosts ────────────────────────────────────────────────

#[tokio::test]
async fn test_collect_all_stamps_every_kind() {
    let (_server, _fake, mut ctx) = setup().await;

    ctx.collect(None).await.unwrap();

    for kind in [
        EntityKind::Cameras,
        EntityKind::Groups,
        EntityKind::Users,
        EntityKind::Roles,
        EntityKind::Maps,
        EntityKind::Layouts,
        EntityKind::Archives,
        EntityKind::Macros,
        EntityKind::Detectors,
    ] {
        assert!(ctx.snapshot().is_collected(kind), "{kind} not collected");
    }
}

#[tokio::test]
async fn test_active_host_builds_unit_uids() {
    let (_server, _fake, mut ctx) = setup().await;

    assert_eq!(ctx.active_host().await.unwrap(), "Server1");
    assert_eq!(
        ctx.unit_uid("HttpServer.0").await.unwrap(),
        "hosts/Server1/HttpServer.0"
    );
    match ctx.hosts().await.unwrap() {
        Outcome::Success(hosts) => assert_eq!(hosts, vec!["Server1".to_owned()]),
        Outcome::Failure(f) => panic!("hosts failed: {f}"),
    }
}

// ── Web server ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_web_server_move_retargets_and_waits() {
    let (server, fake, mut ctx) = setup().await;
    let port = server.address().port();

    let readiness = ctx.change_web_server(port, "asip-api").await.unwrap();

    assert_eq!(
        readiness.success(),
        Some(Readiness::Ready { attempts: 1 })
    );
    assert_eq!(ctx.origin().path(), "/asip-api");
    let change = fake.calls(CHANGE_CONFIG).pop().unwrap();
    assert_eq!(
        change,
        json!({ "changed": [{
            "uid": "hosts/Server1/HttpServer.0",
            "properties": [
                { "id": "port", "value_int32": port },
                { "id": "prefix", "value_string": "asip-api" },
            ],
        }] })
    );

    // Later calls travel under the new prefix.
    confirmed(&ctx.create_group("After move", None).await.unwrap());

    ctx.restore_web_server().await.unwrap();
    assert_eq!(ctx.origin().path(), "/");
}
