//! Scene and report collaborators
//!
//! The simulation never touches the renderer directly. Each frame's outcome
//! is replayed onto a `SceneSink` in tick order, and lap reports go to a
//! `LapReporter` (an alert box in the browser, the log elsewhere).

use std::collections::HashMap;

use glam::{Mat4, Vec3};

use crate::consts::{BALL_RADIUS, BALL_TEXTURE};
use crate::goal::{GoalPart, goal_frame};
use crate::sim::{CameraPose, CardLook, FrameOutcome, Marker, MarkerId, SessionState, SimEvent};

/// Renderable scene owned by the host
pub trait SceneSink {
    fn add_goal_part(&mut self, part: &GoalPart);
    /// Textured sphere for the ball; placed by `set_mover_transform`
    fn add_mover(&mut self, radius: f32, texture: &str);
    fn add_card(&mut self, marker: &Marker, look: &CardLook);
    /// Removing an unknown card must be a no-op
    fn remove_card(&mut self, id: MarkerId);
    fn set_mover_transform(&mut self, transform: Mat4);
    fn set_camera(&mut self, pose: &CameraPose);
    fn set_wireframe(&mut self, enabled: bool);
}

/// Receives one message per completed lap
pub trait LapReporter {
    fn report(&mut self, message: &str);
}

/// Initial scene: goal frame, ball, live cards and the kickoff camera
pub fn populate(state: &SessionState, scene: &mut dyn SceneSink) {
    for part in goal_frame() {
        scene.add_goal_part(&part);
    }
    scene.add_mover(BALL_RADIUS, BALL_TEXTURE);
    let route = state.curves.selected();
    scene.set_mover_transform(Mat4::from_translation(state.curves.evaluate(route, 0.0)));
    for marker in &state.markers {
        scene.add_card(marker, &marker.kind.look());
    }
    scene.set_camera(&state.camera);
    scene.set_wireframe(state.wireframe);
}

/// Apply a single event to the collaborators
pub fn apply_event(event: &SimEvent, scene: &mut dyn SceneSink, reporter: &mut dyn LapReporter) {
    match event {
        SimEvent::CardSpawned(marker) => scene.add_card(marker, &marker.kind.look()),
        SimEvent::CardRemoved(id) => scene.remove_card(*id),
        SimEvent::CardCaptured(marker) => scene.remove_card(marker.id),
        SimEvent::LapCompleted(report) => reporter.report(&report.to_string()),
        SimEvent::WireframeChanged(enabled) => scene.set_wireframe(*enabled),
        SimEvent::RouteChanged(_) | SimEvent::FreeCameraChanged(_) | SimEvent::SpeedChanged(_) => {}
    }
}

/// Replay a frame onto the collaborators: events first, then poses
pub fn present(
    outcome: &FrameOutcome,
    scene: &mut dyn SceneSink,
    reporter: &mut dyn LapReporter,
) {
    for event in &outcome.events {
        apply_event(event, scene, reporter);
    }
    scene.set_mover_transform(outcome.mover.transform());
    if let Some(camera) = &outcome.camera {
        scene.set_camera(camera);
    }
}

/// Headless scene that only tracks what would be on screen
#[derive(Debug, Default)]
pub struct HeadlessScene {
    pub goal_parts: usize,
    /// Ball radius and texture once added
    pub mover: Option<(f32, String)>,
    pub cards: Vec<Marker>,
    pub card_looks: HashMap<MarkerId, CardLook>,
    pub ball: Mat4,
    pub camera: Option<CameraPose>,
    pub wireframe: bool,
}

impl HeadlessScene {
    pub fn ball_position(&self) -> Vec3 {
        self.ball.transform_point3(Vec3::ZERO)
    }
}

impl SceneSink for HeadlessScene {
    fn add_goal_part(&mut self, _part: &GoalPart) {
        self.goal_parts += 1;
    }

    fn add_mover(&mut self, radius: f32, texture: &str) {
        self.mover = Some((radius, texture.to_string()));
    }

    fn add_card(&mut self, marker: &Marker, look: &CardLook) {
        self.cards.push(marker.clone());
        self.card_looks.insert(marker.id, *look);
    }

    fn remove_card(&mut self, id: MarkerId) {
        self.cards.retain(|m| m.id != id);
        self.card_looks.remove(&id);
    }

    fn set_mover_transform(&mut self, transform: Mat4) {
        self.ball = transform;
    }

    fn set_camera(&mut self, pose: &CameraPose) {
        self.camera = Some(*pose);
    }

    fn set_wireframe(&mut self, enabled: bool) {
        log::debug!("Wireframe: {}", enabled);
        self.wireframe = enabled;
    }
}

/// Reporter that writes lap results to the log
#[derive(Debug, Default)]
pub struct LogReporter {
    pub reports: Vec<String>,
}

impl LapReporter for LogReporter {
    fn report(&mut self, message: &str) {
        log::info!("{}", message);
        self.reports.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{CARD_SIZE, CardCounts, CardKind, LapReport, tick};

    #[test]
    fn test_populate_mirrors_state() {
        let state = SessionState::new(Settings::default(), 5);
        let mut scene = HeadlessScene::default();
        populate(&state, &mut scene);
        assert_eq!(scene.goal_parts, goal_frame().len());
        assert_eq!(
            scene.mover,
            Some((BALL_RADIUS, "textures/soccer_ball.jpg".to_string()))
        );
        assert_eq!(scene.ball_position(), crate::consts::KICKOFF);
        assert_eq!(scene.cards, state.markers);
        assert_eq!(scene.camera, Some(CameraPose::default()));
    }

    #[test]
    fn test_cards_carry_placeholder_look() {
        let state = SessionState::new(Settings::default(), 5);
        let mut scene = HeadlessScene::default();
        populate(&state, &mut scene);

        assert_eq!(scene.card_looks.len(), state.markers.len());
        for marker in &state.markers {
            let look = scene.card_looks[&marker.id];
            assert_eq!(look.size, CARD_SIZE);
            assert_eq!(look.texture, marker.kind.texture_name());
            assert_eq!(look.fallback_rgb, marker.kind.fallback_rgb());
        }
        let red = CardKind::Red.look().fallback_rgb;
        let yellow = CardKind::Yellow.look().fallback_rgb;
        assert_ne!(red, yellow);

        let first = state.markers[0].id;
        scene.remove_card(first);
        assert!(!scene.card_looks.contains_key(&first));
    }

    #[test]
    fn test_present_moves_ball_and_camera() {
        let mut state = SessionState::new(Settings::default(), 5);
        let mut scene = HeadlessScene::default();
        let mut reporter = LogReporter::default();
        populate(&state, &mut scene);

        tick(&mut state, 0.0);
        let outcome = tick(&mut state, 2000.0);
        present(&outcome, &mut scene, &mut reporter);

        assert!((scene.ball_position() - outcome.mover.position).length() < 1e-3);
        assert_eq!(scene.camera, outcome.camera);
        assert!(reporter.reports.is_empty());
    }

    #[test]
    fn test_events_reach_collaborators() {
        let state = SessionState::new(Settings::default(), 5);
        let mut scene = HeadlessScene::default();
        let mut reporter = LogReporter::default();
        populate(&state, &mut scene);

        let first = state.markers[0].clone();
        apply_event(&SimEvent::CardCaptured(first.clone()), &mut scene, &mut reporter);
        assert!(scene.cards.iter().all(|m| m.id != first.id));
        // Second removal is a no-op
        apply_event(&SimEvent::CardRemoved(first.id), &mut scene, &mut reporter);
        assert_eq!(scene.cards.len(), state.markers.len() - 1);

        apply_event(&SimEvent::WireframeChanged(true), &mut scene, &mut reporter);
        assert!(scene.wireframe);

        let report = LapReport::new(0, CardCounts { yellow: 0, red: 1 });
        apply_event(&SimEvent::LapCompleted(report), &mut scene, &mut reporter);
        assert_eq!(
            reporter.reports,
            vec![
                "Curve completed. Fair Play score: 50.00. Yellow cards collected: 0, Red cards collected: 1"
                    .to_string()
            ]
        );
    }
}
