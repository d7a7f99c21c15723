//! Curve Kick entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use curve_kick::Settings;
    use curve_kick::goal::GoalPart;
    use curve_kick::input::{apply_command, command_for_key};
    use curve_kick::scene::{LapReporter, SceneSink, apply_event, populate, present};
    use curve_kick::sim::{CameraPose, CardLook, Marker, MarkerId, SessionState, SimEvent, tick};

    // Renderer hooks provided by the page (three.js side)
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = curveKickScene, catch)]
        fn add_goal_part(name: &str, material: &str, shape: &str, transform: &[f32]) -> Result<(), JsValue>;
        #[wasm_bindgen(js_namespace = curveKickScene, catch)]
        fn add_mover(radius: f32, texture: &str) -> Result<(), JsValue>;
        #[wasm_bindgen(js_namespace = curveKickScene, catch)]
        fn add_card(
            id: u32,
            kind: &str,
            texture: &str,
            fallback_rgb: &[f32],
            size: &[f32],
            position: &[f32],
        ) -> Result<(), JsValue>;
        #[wasm_bindgen(js_namespace = curveKickScene, catch)]
        fn remove_card(id: u32) -> Result<(), JsValue>;
        #[wasm_bindgen(js_namespace = curveKickScene, catch)]
        fn set_ball_transform(transform: &[f32]) -> Result<(), JsValue>;
        #[wasm_bindgen(js_namespace = curveKickScene, catch)]
        fn set_camera(eye_x: f32, eye_y: f32, eye_z: f32, x: f32, y: f32, z: f32) -> Result<(), JsValue>;
        #[wasm_bindgen(js_namespace = curveKickScene, catch)]
        fn set_wireframe(enabled: bool) -> Result<(), JsValue>;
        #[wasm_bindgen(js_namespace = curveKickScene, catch)]
        fn set_orbit_enabled(enabled: bool) -> Result<(), JsValue>;
    }

    /// Forwards scene updates to the page; a missing hook is logged once
    #[derive(Default)]
    struct JsScene {
        warned: bool,
    }

    impl JsScene {
        fn check(&mut self, result: Result<(), JsValue>) {
            if let Err(e) = result {
                if !self.warned {
                    log::warn!("Scene hook failed: {:?}", e);
                    self.warned = true;
                }
            }
        }
    }

    impl SceneSink for JsScene {
        fn add_goal_part(&mut self, part: &GoalPart) {
            let material = format!("{:?}", part.material);
            let shape = serde_json::to_string(&part.shape).unwrap_or_default();
            let r = add_goal_part(part.name, &material, &shape, &part.transform.to_cols_array());
            self.check(r);
        }

        fn add_mover(&mut self, radius: f32, texture: &str) {
            let r = add_mover(radius, texture);
            self.check(r);
        }

        fn add_card(&mut self, marker: &Marker, look: &CardLook) {
            let r = add_card(
                marker.id,
                marker.kind.as_str(),
                look.texture,
                &look.fallback_rgb,
                &look.size.to_array(),
                &marker.position.to_array(),
            );
            self.check(r);
        }

        fn remove_card(&mut self, id: MarkerId) {
            let r = remove_card(id);
            self.check(r);
        }

        fn set_mover_transform(&mut self, transform: glam::Mat4) {
            let r = set_ball_transform(&transform.to_cols_array());
            self.check(r);
        }

        fn set_camera(&mut self, pose: &CameraPose) {
            let (e, t) = (pose.eye, pose.target);
            let r = set_camera(e.x, e.y, e.z, t.x, t.y, t.z);
            self.check(r);
        }

        fn set_wireframe(&mut self, enabled: bool) {
            let r = set_wireframe(enabled);
            self.check(r);
        }
    }

    /// Lap results go to a blocking alert
    struct AlertReporter;

    impl LapReporter for AlertReporter {
        fn report(&mut self, message: &str) {
            log::info!("{}", message);
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: SessionState,
        scene: JsScene,
        reporter: AlertReporter,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                state: SessionState::new(settings, seed),
                scene: JsScene::default(),
                reporter: AlertReporter,
            }
        }

        fn frame(&mut self, now_ms: f64) {
            let outcome = tick(&mut self.state, now_ms);
            present(&outcome, &mut self.scene, &mut self.reporter);
        }

        fn key(&mut self, key: &str, now_ms: f64) {
            let Some(command) = command_for_key(key) else {
                return;
            };
            let event = apply_command(&mut self.state, command, now_ms);
            apply_event(&event, &mut self.scene, &mut self.reporter);
            if matches!(event, SimEvent::SpeedChanged(_)) {
                self.state.settings.save();
            }
            let r = set_orbit_enabled(self.state.free_camera);
            self.scene.check(r);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Curve Kick starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        {
            let mut g = game.borrow_mut();
            let Game { state, scene, .. } = &mut *g;
            populate(state, scene);
        }
        log::info!("Session initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        request_animation_frame(game);

        log::info!("Curve Kick running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, keyboard disabled");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            game.borrow_mut().key(&event.key(), js_sys::Date::now());
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        // Wall clock, not the rAF timestamp: progress is tied to absolute time
        game.borrow_mut().frame(js_sys::Date::now());
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use curve_kick::Settings;
    use curve_kick::input::{Command, apply_command};
    use curve_kick::scene::{HeadlessScene, LogReporter, apply_event, populate, present};
    use curve_kick::sim::{SessionState, SimEvent, tick};

    env_logger::init();
    log::info!("Curve Kick (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the 3D scene");

    let settings = Settings::load();
    let period = settings.lap_period_ms;
    let mut state = SessionState::new(settings, 0x5eed);
    let mut scene = HeadlessScene::default();
    let mut reporter = LogReporter::default();
    populate(&state, &mut scene);

    // Three laps at 60 fps, one per route
    let frame_ms = 1000.0 / 60.0;
    let frames = (3.0 * period / frame_ms).ceil() as u64 + 2;
    for frame in 0..frames {
        let now = frame as f64 * frame_ms;
        let outcome = tick(&mut state, now);
        present(&outcome, &mut scene, &mut reporter);
        if outcome
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::LapCompleted(_)))
        {
            let event = apply_command(&mut state, Command::CycleRoute(1), now);
            apply_event(&event, &mut scene, &mut reporter);
        }
    }

    state.settings.save();
    println!("Completed {} laps", state.laps);
    for report in &reporter.reports {
        println!("  {}", report);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
