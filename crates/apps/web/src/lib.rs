use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use formats::{LOCALIZATIONS_PATH, Localizations, RenderStats, ViewerConfig, contents_from_json_str};
use foundation::MapPoint;
use layers::{LayerId, MarkerKind};
use viewer::ViewController;
use viewstate::link;

mod glue;
mod host;
use host::LeafletHost;

pub(crate) struct WebViewer {
    pub controller: ViewController,
    pub host: LeafletHost,
}

thread_local! {
    static STATE: RefCell<Option<WebViewer>> = const { RefCell::new(None) };
}

pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Runs `f` against the live viewer.
///
/// Returns `None` before startup and for events the map fires while the
/// viewer is already busy driving it (e.g. `moveend` during `setView`).
pub(crate) fn with_viewer<R>(f: impl FnOnce(&mut WebViewer) -> R) -> Option<R> {
    STATE.with(|state| {
        let mut guard = state.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the viewer inside the element `element_id`.
///
/// `contents_json` is the map list written by the renderer; `config_json`
/// and `stats_json` may be empty.
#[wasm_bindgen]
pub fn run(element_id: String, contents_json: String, config_json: String, stats_json: String) {
    spawn_local(async move {
        if let Err(err) = run_inner(&element_id, &contents_json, &config_json, &stats_json).await {
            log(&format!("viewer start error: {:?}", err));
        }
    });
}

/// Refetches the translation table and redraws chest popups.
#[wasm_bindgen]
pub fn reload_localizations() {
    spawn_local(async move {
        let localizations = fetch_localizations().await;
        with_viewer(|v| v.controller.set_localizations(&mut v.host, localizations));
    });
}

/// Shareable link to the current view.
#[wasm_bindgen]
pub fn current_link() -> Option<String> {
    let fragment = with_viewer(|v| v.controller.fragment())?;
    let href = web_sys::window()?.location().href().ok()?;
    Some(link(&href, &fragment))
}

async fn run_inner(
    element_id: &str,
    contents_json: &str,
    config_json: &str,
    stats_json: &str,
) -> Result<(), JsValue> {
    let contents = contents_from_json_str(contents_json).map_err(to_js)?;
    let config = if config_json.trim().is_empty() {
        ViewerConfig::default()
    } else {
        ViewerConfig::from_json_str(config_json).map_err(to_js)?
    };
    let stats = match RenderStats::from_json_str(stats_json) {
        Ok(stats) => stats,
        Err(_) if stats_json.trim().is_empty() => RenderStats::default(),
        Err(err) => {
            log(&format!("render stats unavailable: {err}"));
            RenderStats::default()
        }
    };

    let localizations = fetch_localizations().await;
    let mut controller = ViewController::from_contents(&contents, &config, localizations).map_err(to_js)?;
    controller.set_render_stats(stats);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let location = window.location();
    let fragment = location.hash()?;
    let query = location.search()?;

    let mut host = LeafletHost::new(element_id, &config, &callbacks()?);
    controller.start(&mut host, &fragment, &query);
    glue::tec_set_map_info(&controller.map_info_html());

    STATE.with(|state| *state.borrow_mut() = Some(WebViewer { controller, host }));
    Ok(())
}

/// Map event handlers. They live for the whole page, so they are leaked.
fn callbacks() -> Result<JsValue, JsValue> {
    let handlers = js_sys::Object::new();

    let on_move = Closure::<dyn FnMut(f64, f64, f64)>::new(|lat: f64, lng: f64, zoom: f64| {
        with_viewer(|v| {
            v.controller
                .on_view_changed(&mut v.host, MapPoint::new(lat, lng), zoom.round() as i64)
        });
    });
    js_sys::Reflect::set(&handlers, &JsValue::from_str("onMove"), on_move.as_ref())?;
    on_move.forget();

    let on_layer = Closure::<dyn FnMut(String)>::new(|id: String| {
        let switched = with_viewer(|v| {
            let result = v.controller.switch_layer(&mut v.host, &LayerId(id));
            if result.is_ok() {
                glue::tec_set_map_info(&v.controller.map_info_html());
            }
            result
        });
        if let Some(Err(err)) = switched {
            log(&format!("layer switch error: {err}"));
        }
    });
    js_sys::Reflect::set(&handlers, &JsValue::from_str("onLayer"), on_layer.as_ref())?;
    on_layer.forget();

    let on_toggle = Closure::<dyn FnMut(String) -> bool>::new(|title: String| {
        let Some(kind) = MarkerKind::ALL.into_iter().find(|k| k.title() == title) else {
            return false;
        };
        with_viewer(|v| v.controller.toggle(&mut v.host, kind)).unwrap_or(false)
    });
    js_sys::Reflect::set(&handlers, &JsValue::from_str("onToggle"), on_toggle.as_ref())?;
    on_toggle.forget();

    Ok(handlers.into())
}

async fn fetch_localizations() -> Localizations {
    match fetch_text(LOCALIZATIONS_PATH).await {
        Ok(text) => Localizations::from_json_or_disabled(&text),
        Err(err) => {
            log(&format!("Failed to fetch localizations: {:?}", err));
            Localizations::disabled()
        }
    }
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    resp.text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
