//! WebAssembly bindings for Algoview.
//!
//! Provides thin wrappers around [`SortSession`] and [`SearchSession`] for
//! browser environments. Callers feed `performance.now()` readings into
//! `setRunning`/`tick`; the engine never reads a clock itself.

use serde::Serialize;
use std::time::Duration;
use wasm_bindgen::prelude::*;

use crate::{
    playback::{PlaybackStatus, SearchSession, SortSession, VisualElement},
    schema::{PlaybackConfig, SearchAlgorithm, SortAlgorithm},
    trace::SearchOutcome,
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

/// Serializable snapshot of a session for the rendering layer.
#[derive(Serialize)]
struct SessionSnapshot<'a> {
    elements: &'a [VisualElement],
    step: usize,
    total_steps: usize,
    description: Option<&'a str>,
    status: &'a str,
    /// Terminal search outcome; present only on the completing tick.
    outcome: Option<SearchOutcome>,
}

fn status_name(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Idle => "idle",
        PlaybackStatus::Playing => "playing",
        PlaybackStatus::Paused => "paused",
        PlaybackStatus::Completed => "completed",
    }
}

fn clock(now_ms: f64) -> Duration {
    Duration::from_secs_f64(now_ms.max(0.0) / 1000.0)
}

/// WebAssembly wrapper for a sorting visualizer session.
#[wasm_bindgen]
pub struct WasmSortVisualizer {
    session: SortSession,
}

#[wasm_bindgen]
impl WasmSortVisualizer {
    /// Create a session over the given array.
    ///
    /// # Arguments
    /// * `array` - Values to sort
    /// * `algorithm` - One of bubble/selection/insertion/merge/quick
    /// * `speed` - Playback speed, 1-100
    #[wasm_bindgen(constructor)]
    pub fn new(array: Vec<u32>, algorithm: &str, speed: u32) -> Result<WasmSortVisualizer, JsValue> {
        let algorithm: SortAlgorithm = algorithm
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        let session = SortSession::new(array, algorithm, PlaybackConfig::with_speed(speed))
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(WasmSortVisualizer { session })
    }

    /// Raise or lower the running flag at time `now_ms`.
    #[wasm_bindgen(js_name = setRunning)]
    pub fn set_running(&mut self, running: bool, now_ms: f64) {
        self.session.set_running(running, clock(now_ms));
    }

    /// Apply due emissions and return the current snapshot.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> Result<JsValue, JsValue> {
        self.session.poll(clock(now_ms));
        self.snapshot()
    }

    /// Replace the input array, cancelling any in-flight run.
    #[wasm_bindgen(js_name = setArray)]
    pub fn set_array(&mut self, array: Vec<u32>) {
        self.session.set_array(array);
    }

    /// Switch algorithm, cancelling any in-flight run.
    #[wasm_bindgen(js_name = setAlgorithm)]
    pub fn set_algorithm(&mut self, algorithm: &str) -> Result<(), JsValue> {
        let algorithm: SortAlgorithm = algorithm
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        self.session.set_algorithm(algorithm);
        Ok(())
    }

    /// Change playback speed; a live run pauses and resumes from its
    /// cursor at the new cadence.
    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, speed: u32) -> Result<(), JsValue> {
        self.session
            .set_speed(speed)
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Current visual state as a JS object.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        self.snapshot()
    }

    fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = SessionSnapshot {
            elements: self.session.visual().elements(),
            step: self.session.current_step(),
            total_steps: self.session.total_steps(),
            description: self.session.description(),
            status: status_name(self.session.status()),
            outcome: None,
        };
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&format!("{e}")))
    }
}

/// WebAssembly wrapper for a searching visualizer session.
#[wasm_bindgen]
pub struct WasmSearchVisualizer {
    session: SearchSession,
    outcome: Option<SearchOutcome>,
}

#[wasm_bindgen]
impl WasmSearchVisualizer {
    /// Create a session over the given array and target.
    ///
    /// # Arguments
    /// * `array` - Values to search
    /// * `target` - Value to look for
    /// * `algorithm` - One of linear/binary/dfs/bfs
    /// * `speed` - Playback speed, 1-100
    #[wasm_bindgen(constructor)]
    pub fn new(
        array: Vec<u32>,
        target: u32,
        algorithm: &str,
        speed: u32,
    ) -> Result<WasmSearchVisualizer, JsValue> {
        let algorithm: SearchAlgorithm = algorithm
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        let session =
            SearchSession::new(array, target, algorithm, PlaybackConfig::with_speed(speed))
                .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(WasmSearchVisualizer {
            session,
            outcome: None,
        })
    }

    /// Raise or lower the running flag at time `now_ms`.
    #[wasm_bindgen(js_name = setRunning)]
    pub fn set_running(&mut self, running: bool, now_ms: f64) {
        self.session.set_running(running, clock(now_ms));
    }

    /// Apply due emissions and return the current snapshot. The snapshot's
    /// `outcome` field is populated exactly once, on the completing tick.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> Result<JsValue, JsValue> {
        self.outcome = self.session.poll(clock(now_ms));
        let snapshot = SessionSnapshot {
            elements: self.session.visual().elements(),
            step: self.session.current_step(),
            total_steps: self.session.total_steps(),
            description: self.session.description(),
            status: status_name(self.session.status()),
            outcome: self.outcome,
        };
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// The array playback renders: the sorted copy for binary search, the
    /// caller's order otherwise.
    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> Vec<u32> {
        self.session.view().to_vec()
    }

    /// Replace the input array, cancelling any in-flight run.
    #[wasm_bindgen(js_name = setArray)]
    pub fn set_array(&mut self, array: Vec<u32>) {
        self.session.set_array(array);
        self.outcome = None;
    }

    /// Change the search target, cancelling any in-flight run.
    #[wasm_bindgen(js_name = setTarget)]
    pub fn set_target(&mut self, target: u32) {
        self.session.set_target(target);
        self.outcome = None;
    }

    /// Switch algorithm, cancelling any in-flight run.
    #[wasm_bindgen(js_name = setAlgorithm)]
    pub fn set_algorithm(&mut self, algorithm: &str) -> Result<(), JsValue> {
        let algorithm: SearchAlgorithm = algorithm
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        self.session.set_algorithm(algorithm);
        self.outcome = None;
        Ok(())
    }

    /// Change playback speed; a live run pauses and resumes from its
    /// cursor at the new cadence.
    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, speed: u32) -> Result<(), JsValue> {
        self.session
            .set_speed(speed)
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }
}
