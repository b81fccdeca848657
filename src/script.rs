use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use voxbox_edit::{CameraPose, InputEvent};
use voxbox_geom::Vec3;

/// Replayable viewer session: one frame per tick.
#[derive(Debug, Default, Deserialize)]
pub struct Session {
    /// Pick reach override.
    #[serde(default)]
    pub reach: Option<f32>,
    #[serde(default, rename = "frame")]
    pub frames: Vec<Frame>,
}

#[derive(Debug, Deserialize)]
pub struct Frame {
    pub camera: CameraSpec,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CameraSpec {
    pub position: [f32; 3],
    pub forward: [f32; 3],
}

impl From<CameraSpec> for CameraPose {
    fn from(c: CameraSpec) -> Self {
        CameraPose::new(Vec3::from(c.position), Vec3::from(c.forward))
    }
}

impl Session {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frames_and_mixed_events() {
        let s = Session::from_toml_str(
            r#"
reach = 6.5

[[frame]]
camera = { position = [0.0, 9.0, 0.0], forward = [0.0, -1.0, 0.0] }
events = ["destroy", { select_slot = 4 }, "place"]

[[frame]]
camera = { position = [1.0, 9.0, 0.0], forward = [0.0, -1.0, 0.0] }
"#,
        )
        .unwrap();
        assert_eq!(s.reach, Some(6.5));
        assert_eq!(s.frames.len(), 2);
        assert_eq!(
            s.frames[0].events,
            vec![InputEvent::Destroy, InputEvent::SelectSlot(4), InputEvent::Place]
        );
        assert!(s.frames[1].events.is_empty());
        let cam: CameraPose = s.frames[1].camera.into();
        assert_eq!(cam.position, Vec3::new(1.0, 9.0, 0.0));
    }

    #[test]
    fn unknown_event_is_an_error() {
        let r = Session::from_toml_str(
            r#"
[[frame]]
camera = { position = [0.0, 0.0, 0.0], forward = [0.0, 0.0, 1.0] }
events = ["jump"]
"#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn empty_session_is_valid() {
        let s = Session::from_toml_str("").unwrap();
        assert!(s.frames.is_empty());
        assert_eq!(s.reach, None);
    }
}
