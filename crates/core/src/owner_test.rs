// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::{AppId, BuildId, DropletId, LifecycleOwner};

#[test]
fn serializes_as_string() {
    let app = LifecycleOwner::App(AppId::from_string("app-abc123"));
    assert_eq!(serde_json::to_string(&app).unwrap(), r#""app:app-abc123""#);

    let build = LifecycleOwner::build(BuildId::from_string("bld-xyz789"));
    assert_eq!(
        serde_json::to_string(&build).unwrap(),
        r#""build:bld-xyz789""#
    );

    let staged = LifecycleOwner::staged(
        BuildId::from_string("bld-xyz789"),
        DropletId::from_string("drp-out456"),
    );
    assert_eq!(
        serde_json::to_string(&staged).unwrap(),
        r#""build:bld-xyz789+drp-out456""#
    );
}

#[test]
fn deserializes_from_string() {
    let owner: LifecycleOwner = serde_json::from_str(r#""app:app-test123""#).unwrap();
    assert!(matches!(owner, LifecycleOwner::App(_)));

    let owner: LifecycleOwner = serde_json::from_str(r#""build:bld-run456""#).unwrap();
    assert!(matches!(
        owner,
        LifecycleOwner::Build { droplet: None, .. }
    ));

    let owner: LifecycleOwner = serde_json::from_str(r#""build:bld-run456+drp-d1""#).unwrap();
    assert_eq!(owner.droplet(), Some(&DropletId::from_string("drp-d1")));
}

#[test]
fn roundtrip() {
    let original = LifecycleOwner::staged(
        BuildId::from_string("bld-test123"),
        DropletId::from_string("drp-test456"),
    );
    let json = serde_json::to_string(&original).unwrap();
    let decoded: LifecycleOwner = serde_json::from_str(&json).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn accessors_match_variant() {
    let app_id = AppId::from_string("app-1");
    let build_id = BuildId::from_string("bld-1");

    let app = LifecycleOwner::app(app_id.clone());
    assert_eq!(app.as_app(), Some(&app_id));
    assert_eq!(app.as_build(), None);
    assert!(app.is_app());
    assert!(app.try_build().is_err());

    let build = LifecycleOwner::build(build_id.clone());
    assert_eq!(build.as_build(), Some(&build_id));
    assert_eq!(build.as_app(), None);
    assert!(build.is_build());
    assert!(build.try_app().is_err());
    assert_eq!(build.droplet(), None);
}

#[test]
fn owner_equals_its_id() {
    let app_id = AppId::from_string("app-1");
    let owner = LifecycleOwner::app(app_id.clone());
    assert_eq!(owner, app_id);

    let build_id = BuildId::from_string("bld-1");
    assert_eq!(LifecycleOwner::build(build_id.clone()), build_id);
}

#[test]
fn bare_string_parses_as_app() {
    let owner = LifecycleOwner::parse("app-legacy");
    assert_eq!(owner.as_app(), Some(&AppId::from_string("app-legacy")));
}
