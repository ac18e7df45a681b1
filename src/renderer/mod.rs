//! Rendering module
//!
//! Turns a read-only `Snapshot` into an ordered list of drawable primitives.
//! The scene builder is pure; the Canvas2D painter only exists on wasm.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{GamePhase, Snapshot};

/// Palette (CSS colours)
pub mod palette {
    pub const INK: &str = "#535353";
    pub const CAT: &str = "#333";
    pub const CAT_EYES: &str = "#FFD700";
    pub const CACTUS: &str = "#2E8B57";
    pub const CAN_BODY: &str = "#778899";
    pub const CAN_LID: &str = "#666";
    pub const CAN_STRIPE: &str = "#555";
    pub const BIRD: &str = "#444";
    pub const BEAK: &str = "#FFA500";
    pub const HINT: &str = "#888";
    pub const HITBOX: &str = "#FF3B30";
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// One drawable element, in field coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        pos: Vec2,
        size: Vec2,
        color: &'static str,
    },
    Triangle {
        points: [Vec2; 3],
        color: &'static str,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: &'static str,
    },
    /// Stroked rectangle (hitbox overlay)
    Outline {
        pos: Vec2,
        size: Vec2,
        color: &'static str,
    },
    Text {
        text: String,
        pos: Vec2,
        px: f32,
        align: TextAlign,
        color: &'static str,
    },
}

/// A frame's worth of primitives, painted in order over a cleared field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub size: Vec2,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            primitives: Vec::new(),
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &'static str) {
        self.primitives.push(Primitive::Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        });
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: &'static str) {
        self.primitives.push(Primitive::Triangle {
            points: [a, b, c],
            color,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: &'static str) {
        self.primitives.push(Primitive::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn outline(&mut self, pos: Vec2, size: Vec2, color: &'static str) {
        self.primitives.push(Primitive::Outline { pos, size, color });
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        px: f32,
        align: TextAlign,
        color: &'static str,
    ) {
        self.primitives.push(Primitive::Text {
            text: text.into(),
            pos,
            px,
            align,
            color,
        });
    }

    /// All text primitives, in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Build the scene for one frame
pub fn build_scene(snapshot: &Snapshot, settings: &Settings) -> Scene {
    let mut scene = Scene::new(snapshot.field);
    let field = snapshot.field;
    let center = field * 0.5;

    scene.line(
        Vec2::new(0.0, snapshot.ground_y),
        Vec2::new(field.x, snapshot.ground_y),
        2.0,
        palette::INK,
    );

    let flap = snapshot.flap_phase();
    for obstacle in &snapshot.obstacles {
        shapes::obstacle(&mut scene, obstacle, flap);
    }
    shapes::cat(&mut scene, &snapshot.agent, snapshot.run_phase());

    match snapshot.phase {
        GamePhase::Idle => {
            scene.text(
                "Press Space to Start",
                Vec2::new(center.x, center.y - 10.0),
                20.0,
                TextAlign::Center,
                palette::INK,
            );
        }
        GamePhase::Playing => shapes::hud(&mut scene, snapshot),
        GamePhase::GameOver => {
            shapes::hud(&mut scene, snapshot);
            scene.text(
                "GAME OVER",
                center,
                20.0,
                TextAlign::Center,
                palette::INK,
            );
            scene.text(
                "Press Space to Restart",
                Vec2::new(center.x, center.y + 30.0),
                16.0,
                TextAlign::Center,
                palette::HINT,
            );
        }
    }

    if settings.show_hitboxes {
        shapes::hitboxes(&mut scene, snapshot);
    }

    scene
}
