//! Keyboard commands
//!
//! Keys map to discrete commands; commands only call the session mutators.

use crate::consts::{SLOW_DOWN_STEP, SPEED_UP_STEP};
use crate::sim::{SessionState, SimEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ToggleFreeCamera,
    ToggleWireframe,
    /// Step the selected route by the given delta
    CycleRoute(i32),
    SpeedUp,
    SlowDown,
}

/// Map a `KeyboardEvent.key` value to a command
#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "o" | "O" => Some(Command::ToggleFreeCamera),
        "w" | "W" => Some(Command::ToggleWireframe),
        "ArrowLeft" => Some(Command::CycleRoute(1)),
        "ArrowRight" => Some(Command::CycleRoute(-1)),
        "+" | "ArrowUp" => Some(Command::SpeedUp),
        "-" | "ArrowDown" => Some(Command::SlowDown),
        _ => None,
    }
}

/// Apply a command to the session at wall-clock time `now_ms`
pub fn apply_command(state: &mut SessionState, command: Command, now_ms: f64) -> SimEvent {
    match command {
        Command::ToggleFreeCamera => {
            state.free_camera = !state.free_camera;
            log::info!("Free camera: {}", state.free_camera);
            SimEvent::FreeCameraChanged(state.free_camera)
        }
        Command::ToggleWireframe => {
            state.wireframe = !state.wireframe;
            SimEvent::WireframeChanged(state.wireframe)
        }
        Command::CycleRoute(delta) => {
            let route = state.curves.select(delta);
            log::debug!("Route {} selected", route);
            SimEvent::RouteChanged(route)
        }
        Command::SpeedUp => scale_speed(state, SPEED_UP_STEP, now_ms),
        Command::SlowDown => scale_speed(state, SLOW_DOWN_STEP, now_ms),
    }
}

/// Speed lives in the clock; settings mirror it so a save keeps it
fn scale_speed(state: &mut SessionState, factor: f32, now_ms: f64) -> SimEvent {
    state.clock.scale_speed(now_ms, factor);
    let speed = state.clock.speed();
    state.settings.speed = speed;
    log::debug!("Speed x{:.2}", speed);
    SimEvent::SpeedChanged(speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_key_mapping() {
        assert_eq!(command_for_key("o"), Some(Command::ToggleFreeCamera));
        assert_eq!(command_for_key("w"), Some(Command::ToggleWireframe));
        assert_eq!(command_for_key("ArrowLeft"), Some(Command::CycleRoute(1)));
        assert_eq!(command_for_key("ArrowRight"), Some(Command::CycleRoute(-1)));
        assert_eq!(command_for_key("+"), Some(Command::SpeedUp));
        assert_eq!(command_for_key("ArrowUp"), Some(Command::SpeedUp));
        assert_eq!(command_for_key("-"), Some(Command::SlowDown));
        assert_eq!(command_for_key("ArrowDown"), Some(Command::SlowDown));
        assert_eq!(command_for_key("x"), None);
        assert_eq!(command_for_key(" "), None);
    }

    #[test]
    fn test_route_cycling() {
        let mut state = SessionState::new(Settings::default(), 1);
        assert_eq!(
            apply_command(&mut state, Command::CycleRoute(-1), 0.0),
            SimEvent::RouteChanged(2)
        );
        apply_command(&mut state, Command::CycleRoute(1), 0.0);
        apply_command(&mut state, Command::CycleRoute(1), 0.0);
        assert_eq!(state.curves.selected(), 1);
    }

    #[test]
    fn test_toggles() {
        let mut state = SessionState::new(Settings::default(), 1);
        assert_eq!(
            apply_command(&mut state, Command::ToggleWireframe, 0.0),
            SimEvent::WireframeChanged(true)
        );
        assert_eq!(
            apply_command(&mut state, Command::ToggleFreeCamera, 0.0),
            SimEvent::FreeCameraChanged(true)
        );
        apply_command(&mut state, Command::ToggleFreeCamera, 0.0);
        assert!(!state.free_camera);
    }

    #[test]
    fn test_speed_applies_to_clock() {
        let mut state = SessionState::new(Settings::default(), 1);
        apply_command(&mut state, Command::SpeedUp, 500.0);
        assert!((state.clock.speed() - 1.1).abs() < 1e-6);
        apply_command(&mut state, Command::SlowDown, 900.0);
        assert!((state.clock.speed() - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_speed_is_mirrored_in_settings() {
        let mut state = SessionState::new(Settings::default(), 1);
        for _ in 0..3 {
            apply_command(&mut state, Command::SpeedUp, 100.0);
        }
        assert_eq!(state.settings.speed, state.clock.speed());

        // A session built from the mirrored settings resumes at that speed
        let resumed = SessionState::new(state.settings.clone(), 2);
        assert_eq!(resumed.clock.speed(), state.clock.speed());
    }
}
