//! Integration tests for the layered merge engine.
//!
//! Exercises the laws every registered shape obeys, using the built-in
//! settings blocks through the public registry API.

use game_settings::merge::{FieldKind, Sentinel, ShapeRegistry};
use game_settings::settings::{
    GamemodeCommon, HorseSettings, PvpMode, PvpSettings, RespawnMode, RespawnSettings,
    TitanHealthMode, TitanSettings,
};

fn registry() -> ShapeRegistry {
    ShapeRegistry::standard().expect("Failed to build standard registry")
}

fn pvp(mode: PvpMode, friendly_fire: bool, bomb: bool, cannons: bool) -> PvpSettings {
    PvpSettings {
        mode,
        friendly_fire,
        bomb,
        cannons,
    }
}

#[test]
fn single_source_copies_exactly_the_explicit_fields() {
    let registry = registry();
    let source = RespawnSettings {
        mode: RespawnMode::Never,
        delay_seconds: 0,
        spawn_protection_seconds: 2.5,
    };
    let merged: RespawnSettings = registry.create_from(&[Some(&source)]).unwrap();
    assert_eq!(merged.mode, RespawnMode::Never);
    assert_eq!(merged.delay_seconds, i32::sentinel());
    assert_eq!(merged.spawn_protection_seconds, 2.5);
}

#[test]
fn every_pvp_field_follows_single_source_law() {
    let registry = registry();
    let sources = [
        pvp(PvpMode::Disabled, false, false, false),
        pvp(PvpMode::Teams, false, false, false),
        pvp(PvpMode::Disabled, true, false, true),
        pvp(PvpMode::FreeForAll, true, true, true),
    ];
    for source in &sources {
        let merged: PvpSettings = registry.create_from(&[Some(source)]).unwrap();
        // Every PvP field's sentinel equals the shape default, so a single
        // source reproduces itself.
        assert_eq!(&merged, source);
    }
}

#[test]
fn higher_default_does_not_blank_lower_value() {
    let registry = registry();
    let low = HorseSettings {
        enabled: true,
        speed: 10.0,
        acceleration: 1.0,
    };
    let mid = HorseSettings {
        speed: 15.0,
        ..Default::default()
    };
    let high = HorseSettings::default();

    let merged: HorseSettings = registry
        .create_from(&[Some(&low), Some(&mid), Some(&high)])
        .unwrap();
    assert!(merged.enabled);
    assert_eq!(merged.speed, 15.0);
    assert_eq!(merged.acceleration, 1.0);
}

#[test]
fn later_explicit_values_win() {
    let registry = registry();
    let a = pvp(PvpMode::Teams, true, false, false);
    let b = pvp(PvpMode::FreeForAll, false, true, false);

    let ab: PvpSettings = registry.create_from(&[Some(&a), Some(&b)]).unwrap();
    let ba: PvpSettings = registry.create_from(&[Some(&b), Some(&a)]).unwrap();
    assert_eq!(ab, pvp(PvpMode::FreeForAll, true, true, false));
    assert_eq!(ba, pvp(PvpMode::Teams, true, true, false));

    // Stable across repeated runs.
    for _ in 0..3 {
        let again: PvpSettings = registry.create_from(&[Some(&a), Some(&b)]).unwrap();
        assert_eq!(again, ab);
    }
}

#[test]
fn create_from_is_idempotent() {
    let registry = registry();
    let a = TitanSettings {
        start: 5,
        limit: 40,
        health_mode: TitanHealthMode::Scaled,
        size_maximum: 3.0,
        ..Default::default()
    };
    let once: TitanSettings = registry.create_from(&[Some(&a)]).unwrap();
    let twice: TitanSettings = registry.create_from(&[Some(&once)]).unwrap();
    let doubled: TitanSettings = registry.create_from(&[Some(&a), Some(&a)]).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once, doubled);
    assert_eq!(once, a);
}

#[test]
fn merge_into_existing_target() {
    let registry = registry();
    let mut target = RespawnSettings {
        delay_seconds: 4,
        ..Default::default()
    };
    let override_mode = RespawnSettings {
        mode: RespawnMode::NewRound,
        ..Default::default()
    };
    registry
        .merge(&mut target, &[None, Some(&override_mode)])
        .unwrap();
    assert_eq!(target.delay_seconds, 4);
    assert_eq!(target.mode, RespawnMode::NewRound);
}

#[test]
fn intentional_zero_cannot_override() {
    // Documented limitation: zero and false always read as "not set".
    let registry = registry();
    let low = RespawnSettings {
        delay_seconds: 5,
        spawn_protection_seconds: 1.0,
        ..Default::default()
    };
    let high = RespawnSettings {
        delay_seconds: 0,
        spawn_protection_seconds: 0.0,
        ..Default::default()
    };
    let merged: RespawnSettings = registry.create_from(&[Some(&low), Some(&high)]).unwrap();
    assert_eq!(merged, low);
}

#[test]
fn gamemode_tables_expose_nested_blocks() {
    let registry = registry();
    let table = registry
        .table::<game_settings::settings::EndlessSettings>()
        .unwrap();
    let nested: Vec<_> = table
        .fields()
        .iter()
        .filter(|f| f.kind() == FieldKind::Nested)
        .map(|f| f.name())
        .collect();
    assert_eq!(nested, ["pvp", "titan", "horse", "respawn"]);

    let field = table.field("pvp").unwrap();
    let source = game_settings::settings::EndlessSettings {
        common: GamemodeCommon::default(),
        point_limit: 3,
    };
    let err = field.is_override(&source).unwrap_err();
    assert_eq!(err.to_string(), "pvp of PvP is unassigned in Endless");
}
