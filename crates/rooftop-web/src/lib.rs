pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use rooftop_engine::WorldConfig;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Calls made before `game_init` are
/// logged and return `default`.
fn with_runner<R>(default: R, f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("Game not initialized. Call game_init() first.");
            default
        }
    })
}

fn js_error(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Create the world with the built-in level. `config_json` may be empty to
/// use the default tuning.
#[wasm_bindgen]
pub fn game_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        WorldConfig::default()
    } else {
        WorldConfig::from_json(config_json).map_err(js_error)?
    };
    let runner = GameRunner::new(config);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("rooftop: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn game_load_level(json: &str) -> Result<(), JsValue> {
    with_runner(Ok(()), |r| r.load_level(json).map_err(js_error))
}

#[wasm_bindgen]
pub fn game_set_bindings(json: &str) -> Result<(), JsValue> {
    with_runner(Ok(()), |r| r.set_bindings(json).map_err(js_error))
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner((), |r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_key_down(code: &str) {
    with_runner((), |r| r.key_down(code));
}

#[wasm_bindgen]
pub fn game_key_up(code: &str) {
    with_runner((), |r| r.key_up(code));
}

#[wasm_bindgen]
pub fn game_blur() {
    with_runner((), |r| r.release_all());
}

#[wasm_bindgen]
pub fn game_restart() {
    with_runner((), |r| r.restart());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_len() -> u32 {
    with_runner(0, |r| r.buffer_len())
}

#[wasm_bindgen]
pub fn get_hud_json() -> String {
    with_runner("{}".to_string(), |r| r.hud_json())
}

#[wasm_bindgen]
pub fn get_frame_json() -> String {
    with_runner("{}".to_string(), |r| r.frame_json())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(0.0, |r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(0.0, |r| r.world_height())
}
