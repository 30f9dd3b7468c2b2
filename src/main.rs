//! `debounced-input` demo host
//!
//! Binds one debounced field to an in-memory store and drives it from stdin.
//! Each line is typed into the field, except for these commands:
//!
//! - `:blur` / `:focus` change the focus state
//! - `:clear` clears the field
//! - `:flush` commits any pending value now
//! - `:set <value>` changes the stored value as another writer would
//! - `:quit` unmounts the field and exits

use anyhow::{Context, Result};
use debounced_input::{
    ChangeEvent, DebouncedInput, FieldPath, InputProps, SettingsManager, ThreadScheduler,
    change_fn, error::get_user_friendly_error, utils,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;
use tracing::{info, warn};

/// Field the demo binds
const DEMO_PATH: &str = "demo.field";

/// One line of input, interpreted
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Type(String),
    Blur,
    Focus,
    Clear,
    Flush,
    Set(String),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line {
            ":blur" => Self::Blur,
            ":focus" => Self::Focus,
            ":clear" => Self::Clear,
            ":flush" => Self::Flush,
            ":quit" => Self::Quit,
            _ => match line.strip_prefix(":set ") {
                Some(value) => Self::Set(value.to_string()),
                None => Self::Type(line.to_string()),
            },
        }
    }
}

type Store = Arc<Mutex<HashMap<FieldPath, String>>>;

fn main() -> Result<()> {
    utils::init_logging(None).context("Failed to initialize logging system")?;

    let settings = SettingsManager::load().context("Failed to load debounce settings")?;
    let path = FieldPath::from(DEMO_PATH);
    let field_settings = settings.for_path(&path).clone();
    info!(
        "Field {} debounced by {}ms (flush on blur: {})",
        path, field_settings.timeout_ms, field_settings.flush_on_blur
    );

    let scheduler = Arc::new(ThreadScheduler::new().context("Failed to start timer thread")?);
    let store: Store = Arc::new(Mutex::new(HashMap::new()));

    let handler = {
        let store = Arc::clone(&store);
        change_fn(move |path: &FieldPath, value: Option<String>| {
            println!("commit {path} -> {value:?}");
            let mut store = store.lock();
            match value {
                Some(value) => store.insert(path.clone(), value),
                None => store.remove(path),
            };
        })
    };

    let base: InputProps<ChangeEvent<String>, String> =
        InputProps::new(path.clone(), None, handler)
            .settings(&field_settings)
            .focused(true);

    let mut input = DebouncedInput::mount(scheduler.clone(), &base)
        .with_teardown(field_settings.teardown);
    let mut focused = true;
    let mut binding = input.update(&base);
    println!("display: {:?}", binding.value);

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match Command::parse(line.trim_end()) {
            Command::Type(text) => {
                if let Err(e) = binding.on_change.call(&ChangeEvent::new(text)) {
                    warn!("{}", get_user_friendly_error(&e));
                }
            }
            Command::Blur => focused = false,
            Command::Focus => focused = true,
            Command::Clear => binding.on_clear.call(),
            Command::Flush => {
                if !input.flush() {
                    println!("nothing pending");
                }
            }
            Command::Set(value) => {
                store.lock().insert(path.clone(), value);
            }
            Command::Quit => break,
        }

        let data = store.lock().get(&path).cloned();
        let props = base.clone().data(data).focused(focused);
        binding = input.update(&props);
        println!("display: {:?}", binding.value);
    }

    input.unmount();
    info!("Field {} unmounted", path);
    Ok(())
}
