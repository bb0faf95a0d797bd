//! Frame composition
//!
//! Rebuilds the whole picture from run state every frame. No retained
//! drawing state, so a frame is a pure function of `GameState`.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Obstacle, ObstacleKind, Player};
use crate::tuning::Tuning;

const GROUND_LINE_WIDTH: f32 = 2.0;
const BIRD_SEGMENTS: u32 = 24;
const WING_SPAN: f32 = 10.0;

/// Build the vertex list for one frame, in field pixel coordinates
pub fn build(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(64 + state.obstacles.len() * 3 * BIRD_SEGMENTS as usize);

    ground(&state.tuning, &mut vertices);
    player(&state.player, &mut vertices);
    for obstacle in &state.obstacles {
        match obstacle.kind {
            ObstacleKind::Ground { .. } => cactus(obstacle, &mut vertices),
            ObstacleKind::Aerial { .. } => bird(obstacle, &mut vertices),
        }
    }

    vertices
}

fn ground(tuning: &Tuning, out: &mut Vec<Vertex>) {
    let line_y = tuning.ground_line();
    let fill_height = tuning.field_height - line_y;
    if fill_height > 0.0 {
        out.extend(shapes::rect(
            0.0,
            line_y,
            tuning.field_width,
            fill_height,
            colors::linear(colors::GROUND_FILL),
        ));
    }
    out.extend(shapes::rect(
        0.0,
        line_y - GROUND_LINE_WIDTH / 2.0,
        tuning.field_width,
        GROUND_LINE_WIDTH,
        colors::linear(colors::GROUND_LINE),
    ));
}

fn player(p: &Player, out: &mut Vec<Vertex>) {
    let body = colors::linear(colors::PLAYER);
    let detail = colors::linear(colors::PLAYER_DETAIL);

    out.extend(shapes::rect(p.x, p.y, p.width, p.height, body));
    // Eye
    out.extend(shapes::rect(p.x + 25.0, p.y + 5.0, 8.0, 8.0, detail));
    // Legs
    out.extend(shapes::rect(p.x + 5.0, p.y + p.height - 15.0, 12.0, 15.0, detail));
    out.extend(shapes::rect(p.x + 23.0, p.y + p.height - 15.0, 12.0, 15.0, detail));
}

fn cactus(o: &Obstacle, out: &mut Vec<Vertex>) {
    let color = colors::linear(colors::CACTUS);
    let (w, h) = (o.width(), o.height());

    out.extend(shapes::rect(o.x, o.y, w, h, color));
    // Arms
    out.extend(shapes::rect(o.x - 5.0, o.y + 10.0, 5.0, 15.0, color));
    out.extend(shapes::rect(o.x + w, o.y + 10.0, 5.0, 15.0, color));
}

fn bird(o: &Obstacle, out: &mut Vec<Vertex>) {
    let body = colors::linear(colors::BIRD);
    let wing = colors::linear(colors::BIRD_WING);
    let (w, h) = (o.width(), o.height());
    let mid_y = o.y + h / 2.0;

    out.extend(shapes::ellipse(
        Vec2::new(o.x + w / 2.0, mid_y),
        Vec2::new(w / 2.0, h / 2.0),
        body,
        BIRD_SEGMENTS,
    ));
    out.extend(shapes::triangle(
        Vec2::new(o.x - WING_SPAN, mid_y),
        Vec2::new(o.x, o.y),
        Vec2::new(o.x, o.y + h),
        wing,
    ));
    out.extend(shapes::triangle(
        Vec2::new(o.x + w + WING_SPAN, mid_y),
        Vec2::new(o.x + w, o.y),
        Vec2::new(o.x + w, o.y + h),
        wing,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ground line strip plus player body, eye and two legs
    const STATIC_VERTS: usize = 6 + 4 * 6;

    #[test]
    fn test_empty_field() {
        let state = GameState::new(1, Tuning::default());
        let v = build(&state);
        assert_eq!(v.len(), STATIC_VERTS);
    }

    #[test]
    fn test_obstacles_drawn_per_variant() {
        let mut state = GameState::new(1, Tuning::default());
        let tuning = state.tuning.clone();
        let a = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::spawn(a, ObstacleKind::ground(&tuning), &tuning));
        let base = build(&state).len();
        assert_eq!(base, STATIC_VERTS + 3 * 6);

        let b = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::spawn(b, ObstacleKind::aerial(&tuning), &tuning));
        assert_eq!(build(&state).len(), base + BIRD_SEGMENTS as usize * 3 + 2 * 3);
    }

    #[test]
    fn test_same_state_same_frame() {
        let mut state = GameState::new(42, Tuning::default());
        state.start();
        for _ in 0..300 {
            crate::sim::tick(&mut state);
        }
        assert_eq!(build(&state), build(&state.clone()));
    }
}
