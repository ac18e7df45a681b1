//! Sprite builders for the cat, the obstacles and the HUD
//!
//! Everything is flat rectangles and triangles in field coordinates with the
//! origin at the top-left and y growing downwards.

use glam::Vec2;

use super::{Scene, TextAlign, palette};
use crate::sim::{Aabb, AgentView, ObstacleKind, ObstacleView, Snapshot};

/// The cat: body, ears, tail, eyes, legs
pub fn cat(scene: &mut Scene, agent: &AgentView, run_phase: u64) {
    let Vec2 { x, y } = agent.pos;
    let Vec2 { x: w, y: h } = agent.size;
    let c = palette::CAT;

    scene.rect(x, y, w, h, c);

    if agent.crouching {
        // Flattened ears
        scene.rect(x + 5.0, y - 3.0, 8.0, 3.0, c);
        scene.rect(x + w - 13.0, y - 3.0, 8.0, 3.0, c);
    } else {
        scene.triangle(
            Vec2::new(x + 5.0, y),
            Vec2::new(x + 10.0, y - 8.0),
            Vec2::new(x + 15.0, y),
            c,
        );
        scene.triangle(
            Vec2::new(x + w - 15.0, y),
            Vec2::new(x + w - 10.0, y - 8.0),
            Vec2::new(x + w - 5.0, y),
            c,
        );
    }

    // Tail
    scene.rect(x - 5.0, y + 10.0, 5.0, 5.0, c);
    scene.rect(x - 8.0, y + 5.0, 5.0, 5.0, c);

    let eye_y = if agent.crouching { y + 5.0 } else { y + 10.0 };
    scene.rect(x + w - 12.0, eye_y, 3.0, 3.0, palette::CAT_EYES);
    scene.rect(x + w - 22.0, eye_y, 3.0, 3.0, palette::CAT_EYES);

    if !agent.grounded {
        // Tucked
        scene.rect(x + 10.0, y + h - 5.0, 5.0, 5.0, c);
        scene.rect(x + w - 15.0, y + h - 5.0, 5.0, 5.0, c);
    } else if run_phase == 0 {
        scene.rect(x + 5.0, y + h, 6.0, 4.0, c);
        scene.rect(x + w - 11.0, y + h, 6.0, 4.0, c);
    } else {
        scene.rect(x, y + h, 6.0, 4.0, c);
        scene.rect(x + w - 6.0, y + h, 6.0, 4.0, c);
    }
}

pub fn obstacle(scene: &mut Scene, obstacle: &ObstacleView, flap_phase: u64) {
    match obstacle.kind {
        ObstacleKind::LowBarrier => cactus(scene, obstacle),
        ObstacleKind::TallBarrier => trash_cans(scene, obstacle),
        ObstacleKind::Flyer => bird(scene, obstacle, flap_phase),
    }
}

/// Unit width and left edge of each sub-unit in a cluster
fn units(obstacle: &ObstacleView) -> impl Iterator<Item = (f32, f32)> + '_ {
    let unit = obstacle.size.x / obstacle.cluster.max(1) as f32;
    (0..obstacle.cluster.max(1)).map(move |i| (unit, obstacle.pos.x + i as f32 * unit))
}

fn cactus(scene: &mut Scene, obstacle: &ObstacleView) {
    let y = obstacle.pos.y;
    let h = obstacle.size.y;
    let c = palette::CACTUS;

    for (sw, ox) in units(obstacle) {
        let third = sw / 3.0;
        // Stem
        scene.rect(ox + third, y, third, h, c);
        // Left arm
        scene.rect(ox, y + 10.0, third, 5.0, c);
        scene.rect(ox, y + 5.0, 5.0, 10.0, c);
        // Right arm
        scene.rect(ox + third * 2.0, y + 15.0, third, 5.0, c);
        scene.rect(ox + sw - 5.0, y + 8.0, 5.0, 12.0, c);
    }
}

fn trash_cans(scene: &mut Scene, obstacle: &ObstacleView) {
    let y = obstacle.pos.y;
    let h = obstacle.size.y;

    for (sw, ox) in units(obstacle) {
        // 2 px gap between cans
        let dw = sw - 2.0;
        scene.rect(ox, y + 5.0, dw, h - 5.0, palette::CAN_BODY);
        scene.rect(ox - 2.0, y, dw + 4.0, 5.0, palette::CAN_LID);
        scene.rect(ox + 5.0, y + 10.0, dw - 10.0, 2.0, palette::CAN_STRIPE);
        scene.rect(ox + 5.0, y + 18.0, dw - 10.0, 2.0, palette::CAN_STRIPE);
    }
}

fn bird(scene: &mut Scene, obstacle: &ObstacleView, flap_phase: u64) {
    let Vec2 { x, y } = obstacle.pos;
    let w = obstacle.size.x;

    scene.rect(x, y + 10.0, w, 10.0, palette::BIRD);
    scene.rect(x, y + 5.0, 10.0, 10.0, palette::BIRD);
    scene.rect(x - 5.0, y + 8.0, 5.0, 4.0, palette::BEAK);

    if flap_phase == 0 {
        scene.triangle(
            Vec2::new(x + 15.0, y + 10.0),
            Vec2::new(x + 25.0, y - 5.0),
            Vec2::new(x + 35.0, y + 10.0),
            palette::BIRD,
        );
    } else {
        scene.triangle(
            Vec2::new(x + 15.0, y + 15.0),
            Vec2::new(x + 25.0, y + 25.0),
            Vec2::new(x + 35.0, y + 15.0),
            palette::BIRD,
        );
    }
}

/// `HI 00042  00007` in the top-right corner
pub fn hud(scene: &mut Scene, snapshot: &Snapshot) {
    scene.text(
        format!("HI {:05}  {:05}", snapshot.best_score, snapshot.score),
        Vec2::new(snapshot.field.x - 20.0, 30.0),
        20.0,
        TextAlign::Right,
        palette::INK,
    );
}

/// Outline the margin-shrunk boxes the collision test actually uses
pub fn hitboxes(scene: &mut Scene, snapshot: &Snapshot) {
    let mut outline = |aabb: Aabb| {
        if aabb.min.x < aabb.max.x && aabb.min.y < aabb.max.y {
            scene.outline(aabb.min, aabb.size(), palette::HITBOX);
        }
    };

    let agent = &snapshot.agent;
    outline(Aabb::from_pos_size(agent.pos, agent.size).shrink(snapshot.agent_margin));
    for obstacle in &snapshot.obstacles {
        outline(Aabb::from_pos_size(obstacle.pos, obstacle.size).shrink(snapshot.obstacle_margin));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Primitive;

    fn rects(scene: &Scene) -> Vec<(Vec2, Vec2, &'static str)> {
        scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect { pos, size, color } => Some((*pos, *size, *color)),
                _ => None,
            })
            .collect()
    }

    fn standing_cat() -> AgentView {
        AgentView {
            pos: Vec2::new(50.0, 135.0),
            size: Vec2::new(44.0, 40.0),
            crouching: false,
            grounded: true,
        }
    }

    #[test]
    fn test_cat_standing_has_pointed_ears() {
        let mut scene = Scene::default();
        cat(&mut scene, &standing_cat(), 0);

        let triangles = scene
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Triangle { .. }))
            .count();
        assert_eq!(triangles, 2);

        let rects = rects(&scene);
        assert_eq!(rects[0], (Vec2::new(50.0, 135.0), Vec2::new(44.0, 40.0), palette::CAT));
        // Eyes at y + 10
        assert!(rects.contains(&(Vec2::new(82.0, 145.0), Vec2::new(3.0, 3.0), palette::CAT_EYES)));
        // Legs together on phase 0
        assert!(rects.contains(&(Vec2::new(55.0, 175.0), Vec2::new(6.0, 4.0), palette::CAT)));
    }

    #[test]
    fn test_cat_crouched_and_airborne_poses() {
        let mut agent = standing_cat();
        agent.crouching = true;
        agent.pos.y = 150.0;
        agent.size.y = 25.0;
        let mut scene = Scene::default();
        cat(&mut scene, &agent, 1);
        assert!(
            !scene
                .primitives
                .iter()
                .any(|p| matches!(p, Primitive::Triangle { .. }))
        );
        let r = rects(&scene);
        assert!(r.contains(&(Vec2::new(55.0, 147.0), Vec2::new(8.0, 3.0), palette::CAT)));
        assert!(r.contains(&(Vec2::new(82.0, 155.0), Vec2::new(3.0, 3.0), palette::CAT_EYES)));
        // Legs apart on phase 1
        assert!(r.contains(&(Vec2::new(50.0, 175.0), Vec2::new(6.0, 4.0), palette::CAT)));

        let mut agent = standing_cat();
        agent.grounded = false;
        agent.pos.y = 100.0;
        let mut scene = Scene::default();
        cat(&mut scene, &agent, 0);
        assert!(rects(&scene).contains(&(
            Vec2::new(60.0, 135.0),
            Vec2::new(5.0, 5.0),
            palette::CAT
        )));
    }

    #[test]
    fn test_cluster_draws_every_unit() {
        let cacti = ObstacleView {
            kind: ObstacleKind::LowBarrier,
            pos: Vec2::new(300.0, 135.0),
            size: Vec2::new(60.0, 40.0),
            cluster: 3,
        };
        let mut scene = Scene::default();
        obstacle(&mut scene, &cacti, 0);
        assert_eq!(scene.primitives.len(), 3 * 5);
        // Third stem starts at 300 + 40 + 20/3
        let (pos, _, color) = rects(&scene)[10];
        assert!((pos.x - (340.0 + 20.0 / 3.0)).abs() < 1e-4);
        assert_eq!(color, palette::CACTUS);

        let cans = ObstacleView {
            kind: ObstacleKind::TallBarrier,
            pos: Vec2::new(300.0, 140.0),
            size: Vec2::new(60.0, 35.0),
            cluster: 2,
        };
        let mut scene = Scene::default();
        obstacle(&mut scene, &cans, 0);
        let r = rects(&scene);
        assert_eq!(r.len(), 8);
        assert_eq!(r[0], (Vec2::new(300.0, 145.0), Vec2::new(28.0, 30.0), palette::CAN_BODY));
        assert_eq!(r[5], (Vec2::new(328.0, 140.0), Vec2::new(32.0, 5.0), palette::CAN_LID));
    }

    #[test]
    fn test_bird_wings_follow_flap_phase() {
        let bird_view = ObstacleView {
            kind: ObstacleKind::Flyer,
            pos: Vec2::new(400.0, 115.0),
            size: Vec2::new(40.0, 25.0),
            cluster: 1,
        };
        let wing_tip = |flap| {
            let mut scene = Scene::default();
            obstacle(&mut scene, &bird_view, flap);
            scene.primitives.iter().find_map(|p| match p {
                Primitive::Triangle { points, .. } => Some(points[1]),
                _ => None,
            })
        };
        assert_eq!(wing_tip(0), Some(Vec2::new(425.0, 110.0)));
        assert_eq!(wing_tip(1), Some(Vec2::new(425.0, 140.0)));
    }
}
