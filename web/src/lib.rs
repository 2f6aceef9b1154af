mod storage;
mod submit;
mod timers;

use chrono::Local;
use common::{
    check_form, count_up, AppConfig, ExportRecord, FormValues, PredictionRequest, Predictor,
    Preferences, SharePayload, Toast,
};
use json_schema::ToJsonSchema;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{de::DeserializeOwned, Serialize};
use storage::LocalStorage;
use wasm_bindgen::prelude::*;

pub use submit::{predict_step, validate_step, SubmitOutcome};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

// Missing or `undefined` config means defaults.
fn config_from_js(config: JsValue) -> Result<AppConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        Ok(AppConfig::default())
    } else {
        from_js(config)
    }
}

fn browser_rng() -> SmallRng {
    SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

fn anyhow_to_js(error: anyhow::Error) -> JsError {
    JsError::new(&format!("{error:#}"))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// `{ valid, errors }` for the current form values.
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form: JsValue) -> Result<JsValue, JsError> {
    let form: FormValues = from_js(form)?;
    to_js(&check_form(&form))
}

/// Validates, waits the simulated latency, then predicts. Resolves to a
/// `SubmitOutcome`; invalid forms resolve immediately.
#[wasm_bindgen(js_name = submitForm)]
pub async fn submit_form(form: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let form: FormValues = from_js(form)?;
    let config = config_from_js(config)?;

    let request = match validate_step(&form) {
        Ok(request) => request,
        Err(outcome) => return to_js(&outcome),
    };

    timers::sleep(config.submit_delay_ms)
        .await
        .map_err(|e| JsError::new(&format!("Submit delay failed: {:?}", e)))?;

    let outcome = predict_step(&form, &request, &Predictor::new(), &mut browser_rng());
    if outcome.prediction.is_none() {
        web_sys::console::error_1(&JsValue::from_str(&outcome.toast.message));
    }
    to_js(&outcome)
}

/// Number to show on an animation frame `elapsed_ms` into the count-up.
#[wasm_bindgen(js_name = animatedValue)]
pub fn animated_value(end: u32, elapsed_ms: f64, duration_ms: f64) -> u32 {
    count_up(0, i64::from(end), elapsed_ms, duration_ms) as u32
}

/// `{ file_name, contents, toast }` for the CSV download, stamped with the
/// browser's local time.
#[wasm_bindgen(js_name = exportCsv)]
pub fn export_csv(prediction: u32, request: JsValue) -> Result<JsValue, JsError> {
    #[derive(Serialize)]
    struct ExportFile {
        file_name: String,
        contents: String,
        toast: Toast,
    }

    let file = match from_js::<PredictionRequest>(request) {
        Ok(request) => {
            let record = ExportRecord::new(prediction, request, &Local::now());
            ExportFile {
                file_name: record.file_name(),
                contents: record.to_csv(),
                toast: Toast::export_succeeded(),
            }
        }
        Err(_) => ExportFile {
            file_name: String::new(),
            contents: String::new(),
            toast: Toast::export_failed(),
        },
    };
    to_js(&file)
}

/// `{ title, text, url }` for `navigator.share` or the clipboard fallback.
#[wasm_bindgen(js_name = sharePayload)]
pub fn share_payload(prediction: u32, request: JsValue, url: String) -> Result<JsValue, JsError> {
    let request: PredictionRequest = from_js(request)?;
    to_js(&SharePayload::new(prediction, &request, url))
}

/// Toast for a share attempt: `shared` picks the Web Share wording,
/// otherwise the clipboard wording.
#[wasm_bindgen(js_name = shareToast)]
pub fn share_toast(shared: bool, succeeded: bool) -> Result<JsValue, JsError> {
    let toast = match (shared, succeeded) {
        (true, true) => Toast::shared(),
        (true, false) => Toast::share_failed(),
        (false, true) => Toast::copied(),
        (false, false) => Toast::copy_failed(),
    };
    to_js(&toast)
}

#[wasm_bindgen(js_name = loadPreferences)]
pub fn load_preferences() -> Result<JsValue, JsError> {
    let store = LocalStorage::open().map_err(anyhow_to_js)?;
    to_js(&Preferences::load(&store))
}

/// Flips and persists the theme; resolves to `{ preferences, icon, toast }`.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> Result<JsValue, JsError> {
    #[derive(Serialize)]
    struct ThemeChange {
        preferences: Preferences,
        icon: &'static str,
        toast: Toast,
    }

    let mut store = LocalStorage::open().map_err(anyhow_to_js)?;
    let mut preferences = Preferences::load(&store);
    let theme = preferences.toggle_theme(&mut store).map_err(anyhow_to_js)?;
    to_js(&ThemeChange {
        preferences,
        icon: theme.icon(),
        toast: Toast::theme_changed(theme),
    })
}

#[wasm_bindgen(js_name = toggleSidebar)]
pub fn toggle_sidebar() -> Result<bool, JsError> {
    let mut store = LocalStorage::open().map_err(anyhow_to_js)?;
    let mut preferences = Preferences::load(&store);
    preferences.toggle_sidebar(&mut store).map_err(anyhow_to_js)
}

/// Whether the sidebar should be collapsed at this viewport width.
#[wasm_bindgen(js_name = sidebarCollapsedAt)]
pub fn sidebar_collapsed_at(viewport_width: u32, config: JsValue) -> Result<bool, JsError> {
    let config = config_from_js(config)?;
    let store = LocalStorage::open().map_err(anyhow_to_js)?;
    Ok(Preferences::load(&store).sidebar_collapsed_at(viewport_width, config.mobile_breakpoint_px))
}

#[wasm_bindgen(js_name = aboutToast)]
pub fn about_toast(button_text: &str) -> Result<JsValue, JsError> {
    to_js(&Toast::for_about_button(button_text))
}

/// JSON Schema of the prediction request, for rendering the form.
#[wasm_bindgen(js_name = formSchema)]
pub fn form_schema() -> Result<JsValue, JsError> {
    to_js(&PredictionRequest::to_json_schema())
}
