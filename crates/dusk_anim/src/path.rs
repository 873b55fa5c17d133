//! Recorded camera path playback
//!
//! The player lays clip deltas over the pose the camera held at start: the
//! cursor walks the keyframes forward only, poses between keyframes are
//! interpolated, and the final keyframe is applied exactly so cutscenes
//! always end on the authored pose. If the final pose would leave the
//! camera too close to the ground (clips recorded at a different world
//! scale sit low), a short settle phase eases it up to a minimum clearance
//! before control is handed back.

use dusk_core::{BodyId, BodyTransforms, CameraRig};
use glam::{Quat, Vec3};

use crate::clip::CameraClip;
use crate::easing::Easing;

/// Handed back to the caller the frame a path completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathFinished {
    /// Final camera rotation, for the character rig to resume from.
    pub rotation: Quat,
    pub restore_input: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Playing,
    Settling,
}

#[derive(Debug, Clone, Copy)]
pub struct PathConfig {
    /// Keep the final pose at least this far above the ground.
    pub min_ground_clearance: f32,
    pub settle_duration: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            min_ground_clearance: 1.2,
            settle_duration: 0.35,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Settle {
    from_y: f32,
    to_y: f32,
    elapsed: f32,
}

/// Plays one camera clip at a time.
#[derive(Debug)]
pub struct PathPlayer {
    config: PathConfig,
    clip: Option<CameraClip>,
    restore_input: bool,
    base_rotation: Quat,
    base_position: Vec3,
    elapsed: f32,
    cursor: usize,
    phase: Phase,
    settle: Option<Settle>,
    /// Body dragged along under the camera, if any.
    driven_body: Option<(BodyId, f32)>,
}

impl PathPlayer {
    pub fn new(config: PathConfig) -> Self {
        Self {
            config,
            clip: None,
            restore_input: true,
            base_rotation: Quat::IDENTITY,
            base_position: Vec3::ZERO,
            elapsed: 0.0,
            cursor: 0,
            phase: Phase::Idle,
            settle: None,
            driven_body: None,
        }
    }

    /// Drag a body along `eye_height` below the camera while playing, so
    /// the physics world follows the cutscene.
    pub fn with_driven_body(mut self, body: BodyId, eye_height: f32) -> Self {
        self.driven_body = Some((body, eye_height));
        self
    }

    pub fn is_playing(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn current_clip(&self) -> Option<&str> {
        self.clip.as_ref().map(|c| c.name())
    }

    /// Begin playback from the camera's current pose. A path already in
    /// flight is replaced; schedulers are expected to prevent that.
    pub fn start(&mut self, clip: CameraClip, restore_input: bool, rig: &dyn CameraRig) {
        if self.is_playing() {
            log::warn!(
                "camera path `{}` started over a running path",
                clip.name()
            );
        }
        log::info!("camera path `{}` ({:.2}s)", clip.name(), clip.duration());
        self.base_rotation = rig.rotation();
        self.base_position = rig.position();
        self.restore_input = restore_input;
        self.elapsed = 0.0;
        self.cursor = 0;
        self.settle = None;
        self.clip = Some(clip);
        self.phase = Phase::Playing;
    }

    /// Abandon playback, leaving the camera where it is.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.clip = None;
        self.settle = None;
    }

    pub fn update(
        &mut self,
        dt: f32,
        rig: &mut dyn CameraRig,
        mut bodies: Option<&mut dyn BodyTransforms>,
    ) -> Option<PathFinished> {
        match self.phase {
            Phase::Idle => None,
            Phase::Playing => {
                self.elapsed += dt;
                let clip = self.clip.as_ref()?;
                if self.elapsed >= clip.duration() {
                    let last = *clip.final_frame();
                    self.apply_delta(last.rotation, last.translation, rig, bodies.as_deref_mut());
                    self.begin_settle_or_finish(rig, bodies)
                } else {
                    let (rotation, translation) =
                        sample(clip.frames(), &mut self.cursor, self.elapsed);
                    self.apply_delta(rotation, translation, rig, bodies);
                    None
                }
            }
            Phase::Settling => {
                let settle = match self.settle.as_mut() {
                    Some(s) => s,
                    None => {
                        self.phase = Phase::Idle;
                        return Some(self.finished(rig));
                    }
                };
                settle.elapsed += dt;
                let t = if self.config.settle_duration > 0.0 {
                    settle.elapsed / self.config.settle_duration
                } else {
                    1.0
                };
                let done = t >= 1.0;
                let y = if done {
                    settle.to_y
                } else {
                    settle.from_y
                        + (settle.to_y - settle.from_y) * Easing::QuadOut.apply(t)
                };
                let mut position = rig.position();
                position.y = y;
                rig.set_position(position);
                self.drive_body(position, rig.rotation(), bodies);
                if done {
                    self.phase = Phase::Idle;
                    self.clip = None;
                    Some(self.finished(rig))
                } else {
                    None
                }
            }
        }
    }

    fn apply_delta(
        &self,
        rotation: Quat,
        translation: Vec3,
        rig: &mut dyn CameraRig,
        bodies: Option<&mut (dyn BodyTransforms + '_)>,
    ) {
        let world_rotation = self.base_rotation * rotation;
        let world_position = self.base_position + self.base_rotation * translation;
        rig.set_rotation(world_rotation);
        rig.set_position(world_position);
        self.drive_body(world_position, world_rotation, bodies);
    }

    fn drive_body(
        &self,
        camera_position: Vec3,
        camera_rotation: Quat,
        bodies: Option<&mut (dyn BodyTransforms + '_)>,
    ) {
        let (Some((body, eye_height)), Some(bodies)) = (self.driven_body, bodies) else {
            return;
        };
        bodies.set_translation(body, camera_position - Vec3::Y * eye_height);
        bodies.set_rotation(body, camera_rotation);
        bodies.wake(body);
    }

    fn begin_settle_or_finish(
        &mut self,
        rig: &mut dyn CameraRig,
        bodies: Option<&mut (dyn BodyTransforms + '_)>,
    ) -> Option<PathFinished> {
        let position = rig.position();
        let ground = bodies
            .as_ref()
            .and_then(|b| b.ground_height_at(position));
        if let Some(ground) = ground {
            let clearance = position.y - ground;
            if clearance < self.config.min_ground_clearance {
                log::debug!(
                    "camera path `{}` ended {clearance:.2}m above ground, settling up",
                    self.clip.as_ref().map(|c| c.name()).unwrap_or("?")
                );
                self.settle = Some(Settle {
                    from_y: position.y,
                    to_y: ground + self.config.min_ground_clearance,
                    elapsed: 0.0,
                });
                self.phase = Phase::Settling;
                return None;
            }
        }
        self.phase = Phase::Idle;
        self.clip = None;
        Some(self.finished(rig))
    }

    fn finished(&self, rig: &dyn CameraRig) -> PathFinished {
        PathFinished {
            rotation: rig.rotation(),
            restore_input: self.restore_input,
        }
    }
}

/// Interpolated deltas at time `t`. The cursor only moves forward.
fn sample(frames: &[crate::clip::ClipFrame], cursor: &mut usize, t: f32) -> (Quat, Vec3) {
    while *cursor + 1 < frames.len() && frames[*cursor + 1].t <= t {
        *cursor += 1;
    }
    let a = frames[*cursor];
    if *cursor + 1 >= frames.len() {
        return (a.rotation, a.translation);
    }
    let b = frames[*cursor + 1];
    let span = b.t - a.t;
    let s = if span > 0.0 { (t - a.t) / span } else { 1.0 };
    (
        a.rotation.slerp(b.rotation, s),
        a.translation.lerp(b.translation, s),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct TestRig {
        position: Vec3,
        rotation: Quat,
        fov: f32,
    }

    impl TestRig {
        fn new() -> Self {
            Self {
                position: Vec3::new(0.0, 1.6, 0.0),
                rotation: Quat::IDENTITY,
                fov: 1.2,
            }
        }
    }

    impl CameraRig for TestRig {
        fn position(&self) -> Vec3 {
            self.position
        }
        fn rotation(&self) -> Quat {
            self.rotation
        }
        fn set_position(&mut self, position: Vec3) {
            self.position = position;
        }
        fn set_rotation(&mut self, rotation: Quat) {
            self.rotation = rotation;
        }
        fn fov(&self) -> f32 {
            self.fov
        }
        fn set_fov(&mut self, fov: f32) {
            self.fov = fov;
        }
        fn set_depth_of_field(&mut self, _aperture: f32, _focus_distance: f32) {}
    }

    struct FlatGround {
        height: f32,
    }

    impl BodyTransforms for FlatGround {
        fn translation(&self, _body: BodyId) -> Option<Vec3> {
            None
        }
        fn rotation(&self, _body: BodyId) -> Option<Quat> {
            None
        }
        fn set_translation(&mut self, _body: BodyId, _translation: Vec3) {}
        fn set_rotation(&mut self, _body: BodyId, _rotation: Quat) {}
        fn wake(&mut self, _body: BodyId) {}
        fn remove(&mut self, _body: BodyId) {}
        fn ground_height_at(&self, _point: Vec3) -> Option<f32> {
            Some(self.height)
        }
    }

    fn slide_clip() -> CameraClip {
        CameraClip::from_json(
            "slide",
            r#"{
                "frames": [
                    { "t": 0.0, "q": [0, 0, 0, 1], "p": [0, 0, 0] },
                    { "t": 1.0, "q": [0, 0, 0, 1], "p": [0, 0, -2] }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn plays_deltas_on_top_of_the_start_pose() {
        let mut rig = TestRig::new();
        rig.position = Vec3::new(5.0, 1.6, 5.0);
        let mut player = PathPlayer::new(PathConfig::default());
        player.start(slide_clip(), true, &rig);

        assert!(player.update(0.5, &mut rig, None).is_none());
        assert_relative_eq!(rig.position.z, 4.0, epsilon = 1e-5);
        assert_relative_eq!(rig.position.x, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn final_pose_is_exact() {
        let mut rig = TestRig::new();
        let base_position = rig.position;
        let mut player = PathPlayer::new(PathConfig::default());
        let clip = slide_clip();
        let expected = base_position + clip.final_frame().translation;
        player.start(clip, true, &rig);

        // Overshooting the duration in one step still lands exactly.
        let finished = player.update(5.0, &mut rig, None).unwrap();
        assert_eq!(rig.position, expected);
        assert!(finished.restore_input);
        assert!(!player.is_playing());
    }

    #[test]
    fn cursor_survives_tiny_steps_across_many_frames() {
        let mut rig = TestRig::new();
        let mut player = PathPlayer::new(PathConfig::default());
        player.start(slide_clip(), true, &rig);

        let mut finished = None;
        for _ in 0..120 {
            if let Some(f) = player.update(0.01, &mut rig, None) {
                finished = Some(f);
                break;
            }
        }
        assert!(finished.is_some());
    }

    #[test]
    fn low_endings_settle_up_to_clearance() {
        let mut rig = TestRig::new();
        // Clip dives to 0.3m above the ground.
        let clip = CameraClip::from_json(
            "dive",
            r#"{
                "frames": [
                    { "t": 0.0, "q": [0, 0, 0, 1], "p": [0, 0, 0] },
                    { "t": 1.0, "q": [0, 0, 0, 1], "p": [0, -1.3, 0] }
                ]
            }"#,
        )
        .unwrap();
        let mut ground = FlatGround { height: 0.0 };
        let config = PathConfig {
            min_ground_clearance: 1.2,
            settle_duration: 0.2,
        };
        let mut player = PathPlayer::new(config);
        player.start(clip, true, &rig);

        // Path ends low; settle phase begins instead of finishing.
        assert!(player
            .update(1.0, &mut rig, Some(&mut ground as &mut dyn BodyTransforms))
            .is_none());
        assert!(player.is_playing());
        assert_relative_eq!(rig.position.y, 0.3, epsilon = 1e-5);

        let finished = player
            .update(0.2, &mut rig, Some(&mut ground as &mut dyn BodyTransforms))
            .unwrap();
        assert_relative_eq!(rig.position.y, 1.2, epsilon = 1e-5);
        assert!(finished.restore_input);
    }

    #[test]
    fn high_endings_skip_the_settle() {
        let mut rig = TestRig::new();
        let mut ground = FlatGround { height: 0.0 };
        let mut player = PathPlayer::new(PathConfig::default());
        player.start(slide_clip(), false, &rig);

        let finished = player
            .update(2.0, &mut rig, Some(&mut ground as &mut dyn BodyTransforms))
            .unwrap();
        assert!(!finished.restore_input);
    }

    #[test]
    fn idle_player_reports_nothing() {
        let mut rig = TestRig::new();
        let mut player = PathPlayer::new(PathConfig::default());
        assert!(player.update(1.0, &mut rig, None).is_none());
        assert!(!player.is_playing());
    }
}
