//! Integration tests for `debounced-input`
//!
//! Drives full field lifecycles through the public API: a host store fed back
//! into the controller, settings loaded from disk, and several fields sharing
//! one scheduler.

use debounced_input::{
    ChangeEvent, DebouncedInput, FieldPath, FormSettings, InputProps, InputSettings,
    ManualScheduler, SettingsManager, TeardownPolicy, change_fn,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

type Store = Arc<Mutex<HashMap<FieldPath, String>>>;
type Log = Arc<Mutex<Vec<(String, Option<String>, Duration)>>>;

/// Host store whose handler records each commit with the virtual time
fn host(scheduler: &Arc<ManualScheduler>) -> (Store, Log, debounced_input::ChangeFn<String>) {
    let store: Store = Arc::new(Mutex::new(HashMap::new()));
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let handler = {
        let (store, log, clock) = (Arc::clone(&store), Arc::clone(&log), Arc::clone(scheduler));
        change_fn(move |path: &FieldPath, value: Option<String>| {
            log.lock()
                .push((path.to_string(), value.clone(), clock.now()));
            let mut store = store.lock();
            match value {
                Some(value) => store.insert(path.clone(), value),
                None => store.remove(path),
            };
        })
    };
    (store, log, handler)
}

/// Test a typing session round-tripping through the host store
#[test]
fn test_store_round_trip_integration() {
    let scheduler = Arc::new(ManualScheduler::new());
    let (store, log, handler) = host(&scheduler);
    let path = FieldPath::from("profile.bio");
    store.lock().insert(path.clone(), "abc".to_string());

    let base: InputProps<ChangeEvent<String>, String> =
        InputProps::new(path.clone(), Some("abc".to_string()), handler);
    let mut input = DebouncedInput::mount(scheduler.clone(), &base);
    let binding = input.update(&base);
    assert_eq!(binding.value, "abc");

    for (i, text) in ["abcd", "abcde", "abcdef"].into_iter().enumerate() {
        binding.on_change.call(&ChangeEvent::new(text)).unwrap();
        assert_eq!(input.display_value(), text);
        if i < 2 {
            scheduler.advance(Duration::from_millis(100));
        }
    }
    assert!(log.lock().is_empty());

    scheduler.advance(Duration::from_millis(300));
    assert_eq!(
        *log.lock(),
        vec![(
            "profile.bio".to_string(),
            Some("abcdef".to_string()),
            Duration::from_millis(500)
        )]
    );

    // Host re-renders with the committed value; display is unchanged
    let data = store.lock().get(&path).cloned();
    let rerender = input.update(&base.clone().data(data));
    assert_eq!(rerender.value, "abcdef");
    assert!(Arc::ptr_eq(&binding.on_change, &rerender.on_change));
}

/// Test that an external reset wins for display while the edit still commits
#[test]
fn test_external_reset_integration() {
    let scheduler = Arc::new(ManualScheduler::new());
    let (_store, log, handler) = host(&scheduler);

    let base: InputProps<ChangeEvent<String>, String> =
        InputProps::new("title", Some("draft".to_string()), handler);
    let mut input = DebouncedInput::mount(scheduler.clone(), &base);
    let binding = input.update(&base);

    binding.on_change.call(&ChangeEvent::new("draft 2")).unwrap();
    let reset = input.update(&base.clone().data(Some("undo".to_string())));
    assert_eq!(reset.value, "undo");

    scheduler.advance(Duration::from_millis(300));
    assert_eq!(log.lock().len(), 1);
    assert_eq!(log.lock()[0].1.as_deref(), Some("draft 2"));
}

/// Test clear semantics end to end
#[test]
fn test_clear_integration() {
    let scheduler = Arc::new(ManualScheduler::new());
    let (store, log, handler) = host(&scheduler);
    let path = FieldPath::from("search");
    store.lock().insert(path.clone(), "rust".to_string());

    let base: InputProps<ChangeEvent<String>, String> =
        InputProps::new(path.clone(), Some("rust".to_string()), handler);
    let mut input = DebouncedInput::mount(scheduler.clone(), &base);
    let binding = input.update(&base);

    binding.on_change.call(&ChangeEvent::new("rusty")).unwrap();
    binding.on_clear.call();

    assert_eq!(input.display_value(), "");
    assert!(store.lock().get(&path).is_none());
    assert_eq!(*log.lock(), vec![("search".to_string(), None, Duration::ZERO)]);

    // A keystroke typed before the clear still commits on its timer
    scheduler.run_until_idle();
    assert_eq!(
        *log.lock(),
        vec![
            ("search".to_string(), None, Duration::ZERO),
            (
                "search".to_string(),
                Some("rusty".to_string()),
                Duration::from_millis(300)
            ),
        ]
    );
    assert_eq!(store.lock().get(&path).map(String::as_str), Some("rusty"));
}

/// Test that independent fields keep independent timers
#[test]
fn test_fields_are_independent() {
    let scheduler = Arc::new(ManualScheduler::new());
    let (store, _log, handler) = host(&scheduler);

    let first: InputProps<ChangeEvent<String>, String> =
        InputProps::new("first", None, Arc::clone(&handler));
    let second: InputProps<ChangeEvent<String>, String> =
        InputProps::new("second", None, handler).timeout(Duration::from_millis(100));

    let mut a = DebouncedInput::mount(scheduler.clone(), &first);
    let mut b = DebouncedInput::mount(scheduler.clone(), &second);
    let bind_a = a.update(&first);
    let bind_b = b.update(&second);

    bind_a.on_change.call(&ChangeEvent::new("A")).unwrap();
    bind_b.on_change.call(&ChangeEvent::new("B")).unwrap();

    scheduler.advance(Duration::from_millis(100));
    assert_eq!(store.lock().get("second").map(String::as_str), Some("B"));
    assert!(store.lock().get("first").is_none());

    scheduler.advance(Duration::from_millis(200));
    assert_eq!(store.lock().get("first").map(String::as_str), Some("A"));
}

/// Test numeric fields with a custom extractor
#[test]
fn test_custom_value_type_integration() {
    let scheduler = Arc::new(ManualScheduler::new());
    let committed: Arc<Mutex<Vec<Option<i64>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&committed);
    let handler = change_fn(move |_: &FieldPath, value: Option<i64>| sink.lock().push(value));

    let extract = debounced_input::event_to_value(|raw: &String| {
        if raw.is_empty() {
            return Ok(None);
        }
        raw.trim()
            .parse::<i64>()
            .map(Some)
            .map_err(debounced_input::DebounceError::extraction)
    });
    let props = InputProps::with_extractor("age", Some(30), handler, extract);
    let mut input = DebouncedInput::mount(scheduler.clone(), &props);
    let binding = input.update(&props);

    binding.on_change.call(&"31".to_string()).unwrap();
    assert!(binding.on_change.call(&"thirty".to_string()).is_err());
    assert_eq!(input.display_value(), 31);

    binding.on_change.call(&String::new()).unwrap();
    assert_eq!(input.display_value(), 0, "empty input shows the default");

    scheduler.advance(Duration::from_millis(300));
    assert_eq!(*committed.lock(), vec![None]);
}

/// Test that settings loaded from disk drive timeout, blur and teardown
#[test]
fn test_settings_file_integration() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");

    let mut settings = FormSettings::default();
    settings.fields.insert(
        "notes".to_string(),
        InputSettings {
            timeout_ms: 1000,
            flush_on_blur: true,
            teardown: TeardownPolicy::Flush,
        },
    );
    SettingsManager::save_to(&settings_path, &settings).unwrap();
    let loaded = SettingsManager::load_from(&settings_path).unwrap();

    let scheduler = Arc::new(ManualScheduler::new());
    let (store, log, handler) = host(&scheduler);
    let path = FieldPath::from("notes");
    let field = loaded.for_path(&path);

    let focused: InputProps<ChangeEvent<String>, String> =
        InputProps::new(path.clone(), None, handler)
            .settings(field)
            .focused(true);
    let mut input =
        DebouncedInput::mount(scheduler.clone(), &focused).with_teardown(field.teardown);
    let binding = input.update(&focused);

    binding.on_change.call(&ChangeEvent::new("first thought")).unwrap();
    scheduler.advance(Duration::from_millis(999));
    assert!(log.lock().is_empty());

    input.update(&focused.clone().focused(false));
    assert_eq!(store.lock().get(&path).map(String::as_str), Some("first thought"));

    input.update(&focused);
    binding.on_change.call(&ChangeEvent::new("second thought")).unwrap();
    input.unmount();
    assert_eq!(store.lock().get(&path).map(String::as_str), Some("second thought"));

    scheduler.run_until_idle();
    assert_eq!(log.lock().len(), 2);
}
