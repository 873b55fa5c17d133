//! Recorded camera clips
//!
//! Clips come from an in-game recorder: a list of timestamped camera poses
//! dumped to JSON. On load the first frame becomes the reference pose and
//! every frame is rebased to a rotation/translation *delta* from it, so a
//! clip replays from whatever pose the camera holds when playback starts.
//!
//! ```json
//! {
//!   "name": "phone_pickup",
//!   "world_scale": 1.0,
//!   "frames": [
//!     { "t": 0.0,  "q": [0, 0, 0, 1], "p": [0, 1.6, 0] },
//!     { "t": 0.05, "q": [0, 0.01, 0, 0.999], "p": [0, 1.58, -0.02] }
//!   ]
//! }
//! ```
//!
//! Recorders that store no per-frame time write `fps` once instead.

use glam::{Quat, Vec3};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipError {
    #[error("failed to parse camera clip: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("camera clip `{0}` has no frames")]
    Empty(String),
    #[error("camera clip `{name}` has neither frame times nor fps (frame {frame})")]
    MissingTiming { name: String, frame: usize },
    #[error("camera clip `{name}` goes backwards in time at frame {frame}")]
    NonMonotonic { name: String, frame: usize },
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default)]
    t: Option<f32>,
    q: [f32; 4],
    #[serde(default)]
    p: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize)]
struct ClipDoc {
    #[serde(default)]
    name: Option<String>,
    /// Frames per second for recordings without per-frame times.
    #[serde(default)]
    fps: Option<f32>,
    /// Recorded positions are multiplied into world units.
    #[serde(default = "default_world_scale")]
    world_scale: f32,
    frames: Vec<RawFrame>,
}

fn default_world_scale() -> f32 {
    1.0
}

/// One keyframe, rebased to the clip's first frame. Times start at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipFrame {
    pub t: f32,
    /// Rotation delta in the reference pose's local frame.
    pub rotation: Quat,
    /// Translation delta in the reference pose's local frame.
    pub translation: Vec3,
}

/// A loaded, rebased camera clip. Guaranteed non-empty and time-ordered.
#[derive(Debug, Clone)]
pub struct CameraClip {
    name: String,
    frames: Vec<ClipFrame>,
    duration: f32,
}

impl CameraClip {
    pub fn from_json(fallback_name: &str, json: &str) -> Result<Self, ClipError> {
        let doc: ClipDoc = serde_json::from_str(json)?;
        Self::from_doc(fallback_name, doc)
    }

    fn from_doc(fallback_name: &str, doc: ClipDoc) -> Result<Self, ClipError> {
        let name = doc.name.unwrap_or_else(|| fallback_name.to_string());
        if doc.frames.is_empty() {
            return Err(ClipError::Empty(name));
        }

        // Resolve timestamps first so monotonicity is checked on what the
        // player will actually see.
        let mut times = Vec::with_capacity(doc.frames.len());
        for (i, frame) in doc.frames.iter().enumerate() {
            let t = match (frame.t, doc.fps) {
                (Some(t), _) => t,
                (None, Some(fps)) if fps > 0.0 => i as f32 / fps,
                _ => return Err(ClipError::MissingTiming { name, frame: i }),
            };
            if let Some(&prev) = times.last() {
                if t < prev {
                    return Err(ClipError::NonMonotonic { name, frame: i });
                }
            }
            times.push(t);
        }

        let t0 = times[0];
        let q0 = Quat::from_array(doc.frames[0].q).normalize();
        let inv_q0 = q0.inverse();
        let p0 = Vec3::from(doc.frames[0].p.unwrap_or([0.0; 3]));

        let mut frames = Vec::with_capacity(doc.frames.len());
        let mut prev_p = p0;
        for (raw, &t) in doc.frames.iter().zip(&times) {
            let q = Quat::from_array(raw.q).normalize();
            // Recorders may drop unchanged positions.
            let p = raw.p.map(Vec3::from).unwrap_or(prev_p);
            prev_p = p;
            frames.push(ClipFrame {
                t: t - t0,
                rotation: inv_q0 * q,
                translation: inv_q0 * ((p - p0) * doc.world_scale),
            });
        }

        let duration = frames.last().map(|f| f.t).unwrap_or(0.0);
        Ok(Self {
            name,
            frames,
            duration,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn frames(&self) -> &[ClipFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The exact pose deltas the player must land on.
    pub fn final_frame(&self) -> &ClipFrame {
        // Non-empty by construction.
        &self.frames[self.frames.len() - 1]
    }
}
