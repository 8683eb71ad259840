//! WASM host boundary: thin `#[wasm_bindgen]` wrapper structs around the
//! native types, following the teacher's `src/wasm.rs` pattern
//! (`WasmCard(Card)`, `WasmHand(Hand)`, ...) rather than a blanket
//! `serde_wasm_bindgen::to_value` conversion. The flat-array placement
//! input mirrors the prior WASM port at
//! `beachale-Offset-to-Coordinate-GUI/wasm/grassfinder_wasm/src/lib.rs`.

use crate::cancel::CancelToken;
use crate::hash::HashVersion;
use crate::sample::{BlockPos, Placement};
use crate::scan::Match;
use crate::solver::{RequestedMode, ScanParams, Solver};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct WasmMatch(Match);

#[wasm_bindgen]
impl WasmMatch {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> i32 {
        self.0.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> i32 {
        self.0.y
    }

    #[wasm_bindgen(getter)]
    pub fn z(&self) -> i32 {
        self.0.z
    }

    /// `-1` when this match carries no score (strict mode).
    #[wasm_bindgen(getter)]
    pub fn score(&self) -> i32 {
        self.0.score.map(|s| s as i32).unwrap_or(-1)
    }
}

#[wasm_bindgen]
pub struct WasmCrackResult {
    matches: Vec<Match>,
    warning: Option<String>,
}

#[wasm_bindgen]
impl WasmCrackResult {
    #[wasm_bindgen]
    pub fn matches(&self) -> js_sys::Array {
        self.matches
            .iter()
            .copied()
            .map(WasmMatch)
            .map(JsValue::from)
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn warning(&self) -> Option<String> {
        self.warning.clone()
    }
}

#[wasm_bindgen]
#[derive(Clone)]
pub struct WasmCancelToken(CancelToken);

#[wasm_bindgen]
impl WasmCancelToken {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self(CancelToken::new())
    }

    #[wasm_bindgen]
    pub fn cancel(&self) {
        self.0.cancel();
    }

    #[wasm_bindgen(js_name = "isCancelled")]
    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

impl Default for WasmCancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub struct WasmSolver;

#[wasm_bindgen]
impl WasmSolver {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self
    }

    /// Runs one scan. Placements travel as parallel flat arrays (block
    /// coords, offset nibbles, kind tags) rather than an array of
    /// structs, matching the calling convention `wasm-bindgen` makes
    /// cheap across the JS boundary.
    ///
    /// `use_workers` is forwarded as-is: `Solver::crack` itself forces
    /// the single-threaded fallback on `wasm32`, since `std::thread::spawn`
    /// is unavailable there and this boundary must never panic.
    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen]
    pub fn crack(
        &self,
        xs: &[i32],
        ys: &[i32],
        zs: &[i32],
        off_xs: &[u8],
        off_ys: &[u8],
        off_zs: &[u8],
        kinds: Vec<String>,
        center_x: f64,
        center_z: f64,
        radius: u32,
        y_min: i32,
        y_max: i32,
        classic: bool,
        scored: bool,
        tol: u8,
        max_score: u32,
        max_results: usize,
        use_workers: bool,
        cancel: &WasmCancelToken,
        on_progress: js_sys::Function,
    ) -> Result<WasmCrackResult, JsValue> {
        let n = xs.len();
        if ys.len() != n
            || zs.len() != n
            || off_xs.len() != n
            || off_ys.len() != n
            || off_zs.len() != n
            || kinds.len() != n
        {
            return Err(JsValue::from_str("placement arrays must have the same length"));
        }

        let placements: Vec<Placement> = (0..n)
            .map(|i| {
                let kind = crate::format::parse_kind(&kinds[i], None);
                Placement::new(BlockPos::new(xs[i], ys[i], zs[i]), kind, off_xs[i], off_ys[i], off_zs[i])
            })
            .collect();

        let params = ScanParams {
            center_x,
            center_z,
            radius,
            y_min,
            y_max,
            version: if classic { HashVersion::Classic } else { HashVersion::Modern },
            mode: if scored {
                RequestedMode::Scored { tol, max_score }
            } else {
                RequestedMode::Strict
            },
            max_results,
            use_workers,
        };

        let this = JsValue::null();
        let result = Solver::crack(&placements, params, cancel.0.clone(), |done, total| {
            let _ = on_progress.call2(&this, &JsValue::from(done as f64), &JsValue::from(total as f64));
        });

        Ok(WasmCrackResult { matches: result.matches, warning: result.warning })
    }
}

impl Default for WasmSolver {
    fn default() -> Self {
        Self::new()
    }
}
