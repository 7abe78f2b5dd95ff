use super::*;
use crate::config::{DEFAULT_MOON_ICON, DEFAULT_SUN_ICON};
use crate::host::Host;
use crate::host::memory::{MemoryControl, MemoryHost, MemoryRoot, MemoryStore, StorageMode};

const KEY: &str = "theme";
const ATTR: &str = "data-bs-theme";
const TOGGLE: &str = "theme-toggle";

fn state(host: &MemoryHost) -> ThemeState<MemoryStore> {
    ThemeState::new(host.local_store().unwrap(), KEY)
}

fn controller(host: &MemoryHost) -> ThemeController<MemoryStore, MemoryRoot, MemoryControl> {
    let config = ChromeConfig::default();
    let toggle = host.element_by_id(TOGGLE).unwrap();
    ThemeController::new(state(host), host.document_root().unwrap(), &config).with_toggle(toggle)
}

fn page() -> MemoryHost {
    MemoryHost::new().with_element(TOGGLE)
}

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_default_is_light() {
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn theme_parse_is_strict() {
    assert_eq!(Theme::parse("light"), Some(Theme::Light));
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse("Dark"), None);
    assert_eq!(Theme::parse(""), None);
}

#[test]
fn theme_from_attribute_treats_anything_but_dark_as_light() {
    assert_eq!(Theme::from_attribute(Some("dark")), Theme::Dark);
    assert_eq!(Theme::from_attribute(Some("light")), Theme::Light);
    assert_eq!(Theme::from_attribute(Some("sepia")), Theme::Light);
    assert_eq!(Theme::from_attribute(None), Theme::Light);
}

#[test]
fn theme_toggled_twice_is_identity() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_ne!(theme.toggled(), theme);
        assert_eq!(theme.toggled().toggled(), theme);
    }
}

#[test]
fn theme_display_matches_as_str() {
    assert_eq!(Theme::Dark.to_string(), "dark");
    assert_eq!(Theme::Light.to_string(), "light");
}

// =============================================================
// ThemeState
// =============================================================

#[test]
fn state_get_defaults_to_light_when_never_set() {
    let host = page();
    let state = state(&host);
    assert_eq!(state.load().unwrap(), None);
    assert_eq!(state.get(), Theme::Light);
}

#[test]
fn state_round_trips_each_theme() {
    let host = page();
    let state = state(&host);
    for theme in [Theme::Dark, Theme::Light] {
        state.set(theme).unwrap();
        assert_eq!(state.get(), theme);
        assert_eq!(host.stored(KEY).as_deref(), Some(theme.as_str()));
    }
}

#[test]
fn state_unrecognized_value_counts_as_absent() {
    let host = page().with_stored(KEY, "solarized");
    let state = state(&host);
    assert_eq!(state.load().unwrap(), None);
    assert_eq!(state.get(), Theme::Light);
}

#[test]
fn state_distinguishes_unreadable_store_from_absent_key() {
    let host = page().with_storage(StorageMode::Failing);
    let state = state(&host);
    assert!(matches!(state.load(), Err(ChromeError::Storage(_))));
    assert_eq!(state.get(), Theme::Light);
}

#[test]
fn state_system_preference_applies_only_when_nothing_stored() {
    let host = page();
    let state = state(&host).with_system_preference(true);
    assert_eq!(state.get(), Theme::Dark);

    state.set(Theme::Light).unwrap();
    assert_eq!(state.get(), Theme::Light);
}

// =============================================================
// ThemeController
// =============================================================

#[test]
fn set_theme_dark_updates_root_store_and_icon() {
    let host = page();
    controller(&host).set_theme(Theme::Dark).unwrap();

    assert_eq!(host.root_attribute(ATTR).as_deref(), Some("dark"));
    assert_eq!(host.stored(KEY).as_deref(), Some("dark"));
    assert_eq!(host.inner_html(TOGGLE).as_deref(), Some(DEFAULT_SUN_ICON));
}

#[test]
fn set_theme_light_updates_root_store_and_icon() {
    let host = page();
    controller(&host).set_theme(Theme::Light).unwrap();

    assert_eq!(host.root_attribute(ATTR).as_deref(), Some("light"));
    assert_eq!(host.stored(KEY).as_deref(), Some("light"));
    assert_eq!(host.inner_html(TOGGLE).as_deref(), Some(DEFAULT_MOON_ICON));
}

#[test]
fn init_applies_stored_preference() {
    let host = page().with_stored(KEY, "dark");
    let applied = controller(&host).init().unwrap();

    assert_eq!(applied, Theme::Dark);
    assert_eq!(host.root_attribute(ATTR).as_deref(), Some("dark"));
    assert_eq!(host.inner_html(TOGGLE).as_deref(), Some(DEFAULT_SUN_ICON));
}

#[test]
fn init_without_stored_value_applies_and_persists_light() {
    let host = page();
    assert_eq!(controller(&host).init().unwrap(), Theme::Light);
    assert_eq!(host.stored(KEY).as_deref(), Some("light"));
}

#[test]
fn toggle_flips_and_double_toggle_restores() {
    let host = page();
    let ctrl = controller(&host);
    ctrl.set_theme(Theme::Dark).unwrap();

    assert_eq!(ctrl.toggle().unwrap(), Theme::Light);
    assert_eq!(host.stored(KEY).as_deref(), Some("light"));
    assert_eq!(ctrl.toggle().unwrap(), Theme::Dark);
    assert_eq!(host.root_attribute(ATTR).as_deref(), Some("dark"));
}

#[test]
fn toggle_reads_root_attribute_not_storage() {
    let host = page().with_stored(KEY, "dark");
    let ctrl = controller(&host);
    // Root has no attribute yet: anything but "dark" toggles to dark.
    assert_eq!(ctrl.current_theme(), Theme::Light);
    assert_eq!(ctrl.toggle().unwrap(), Theme::Dark);
}

#[test]
fn set_theme_without_toggle_still_syncs_root_and_store() {
    let host = MemoryHost::new();
    let ctrl: ThemeController<_, _, MemoryControl> =
        ThemeController::new(state(&host), host.document_root().unwrap(), &ChromeConfig::default());

    ctrl.set_theme(Theme::Dark).unwrap();

    assert_eq!(host.root_attribute(ATTR).as_deref(), Some("dark"));
    assert_eq!(host.stored(KEY).as_deref(), Some("dark"));
}

#[test]
fn set_theme_stops_when_store_rejects_write() {
    let host = page().with_storage(StorageMode::Failing);
    let err = controller(&host).set_theme(Theme::Dark).unwrap_err();

    assert!(matches!(err, ChromeError::Storage(_)));
    assert_eq!(host.inner_html(TOGGLE).as_deref(), Some(""));
}

#[test]
fn custom_icons_come_from_config() {
    let host = page();
    let config = ChromeConfig {
        sun_icon: "SUN".to_owned(),
        moon_icon: "MOON".to_owned(),
        ..ChromeConfig::default()
    };
    let toggle = host.element_by_id(TOGGLE).unwrap();
    let ctrl = ThemeController::new(state(&host), host.document_root().unwrap(), &config)
        .with_toggle(toggle);

    ctrl.set_theme(Theme::Dark).unwrap();
    assert_eq!(host.inner_html(TOGGLE).as_deref(), Some("SUN"));
    ctrl.set_theme(Theme::Light).unwrap();
    assert_eq!(host.inner_html(TOGGLE).as_deref(), Some("MOON"));
}
