pub mod runner;

pub use runner::OrreryRunner;

/// Generate all `#[wasm_bindgen]` exports for an orrery demo.
///
/// This macro generates:
/// - `thread_local!` storage for the OrreryRunner
/// - `with_runner()` helper that falls back to a default before init
/// - All wasm-bindgen exports (init, tick, control setters, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod bodies;
///
/// orrery_web::export_orrery!(bodies::solar_system, "solar-system");
/// ```
///
/// # Arguments
///
/// - `$catalog_fn`: a `fn() -> orrery::BodyCatalog` providing the built-in bodies
/// - `$name`: A string literal used in log messages
#[macro_export]
macro_rules! export_orrery {
    ($catalog_fn:path, $name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::OrreryRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(fallback: R, f: impl FnOnce(&mut $crate::OrreryRunner) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    log::warn!("{}: not initialized, call orrery_init() first", $name);
                    fallback
                }
            })
        }

        fn install(result: orrery::Result<$crate::OrreryRunner>) -> bool {
            match result {
                Ok(runner) => {
                    log::info!("{}: initialized with {} bodies", $name, runner.orrery().len());
                    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
                    true
                }
                Err(err) => {
                    log::error!("{}: init failed: {}", $name, err);
                    false
                }
            }
        }

        fn init_logging() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        }

        fn parse_config(config_json: &str) -> orrery::OrreryConfig {
            if config_json.trim().is_empty() {
                return orrery::OrreryConfig::default();
            }
            match orrery::OrreryConfig::from_json(config_json) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("{}: bad config, using defaults: {}", $name, err);
                    orrery::OrreryConfig::default()
                }
            }
        }

        /// Build the orrery from the built-in catalog.
        #[wasm_bindgen]
        pub fn orrery_init() -> bool {
            init_logging();
            let catalog = $catalog_fn();
            install($crate::OrreryRunner::new(&catalog, orrery::OrreryConfig::default()))
        }

        /// Build the orrery from a JSON body catalog and optional JSON config.
        #[wasm_bindgen]
        pub fn orrery_init_json(catalog_json: &str, config_json: &str) -> bool {
            init_logging();
            let config = parse_config(config_json);
            install($crate::OrreryRunner::from_json(catalog_json, config))
        }

        #[wasm_bindgen]
        pub fn orrery_tick(dt: f32) -> u32 {
            with_runner(0, |r| r.tick(dt))
        }

        #[wasm_bindgen]
        pub fn orrery_step() {
            with_runner((), |r| {
                r.step_once();
            });
        }

        // ---- Controls ----

        #[wasm_bindgen]
        pub fn orrery_set_orbit_speed(multiplier: f64) {
            with_runner((), |r| r.push_control(orrery::ControlMessage::SetOrbitSpeed(multiplier)));
        }

        #[wasm_bindgen]
        pub fn orrery_set_spin_speed(multiplier: f64) {
            with_runner((), |r| r.push_control(orrery::ControlMessage::SetSpinSpeed(multiplier)));
        }

        #[wasm_bindgen]
        pub fn orrery_show_orbit_paths(show: bool) {
            with_runner((), |r| r.push_control(orrery::ControlMessage::ShowOrbitPaths(show)));
        }

        #[wasm_bindgen]
        pub fn orrery_show_satellites(show: bool) {
            with_runner((), |r| r.push_control(orrery::ControlMessage::ShowSatellites(show)));
        }

        #[wasm_bindgen]
        pub fn orrery_select(name: &str) -> bool {
            with_runner(false, |r| r.select(name))
        }

        #[wasm_bindgen]
        pub fn orrery_clear_selection() {
            with_runner((), |r| r.push_control(orrery::ControlMessage::Select(None)));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_poses_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.poses_ptr())
        }

        #[wasm_bindgen]
        pub fn get_pose_count() -> u32 {
            with_runner(0, |r| r.pose_count())
        }

        #[wasm_bindgen]
        pub fn get_path_vertices_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.path_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_path_vertex_count() -> u32 {
            with_runner(0, |r| r.path_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_header() -> Vec<f32> {
            with_runner(Vec::new(), |r| r.header().to_vec())
        }

        #[wasm_bindgen]
        pub fn get_tick_count() -> f64 {
            with_runner(0.0, |r| r.tick_count() as f64)
        }

        #[wasm_bindgen]
        pub fn get_selected_index() -> i32 {
            with_runner(-1, |r| r.selected_index())
        }

        #[wasm_bindgen]
        pub fn get_body_name(index: u32) -> String {
            with_runner(String::new(), |r| {
                r.orrery()
                    .body(orrery::BodyId(index))
                    .map(|b| b.name.to_string())
                    .unwrap_or_default()
            })
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_bodies() -> u32 {
            with_runner(0, |r| r.max_bodies())
        }

        #[wasm_bindgen]
        pub fn get_max_path_vertices() -> u32 {
            with_runner(0, |r| r.max_path_vertices())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(0, |r| r.buffer_total_floats())
        }
    };
}
