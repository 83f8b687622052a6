//! Draw routine: turns a `GameState` into a frame's triangle list

use glam::Vec2;

use super::shapes;
use super::surface::Frame;
use super::vertex::colors;
use crate::sim::{GamePhase, GameState, Rect};

/// Paint the whole scene, back to front
pub fn draw(state: &GameState, frame: &mut Frame) {
    frame.clear();
    let out = &mut frame.vertices;

    draw_background(state, out);

    if state.record_beaten && state.phase == GamePhase::Over {
        draw_fireworks(state, out);
    }

    draw_plane(state, out);

    for obstacle in state.pool.active() {
        for barrier in obstacle.barriers() {
            // The top barrier reaches far above the screen; clip it
            let visible = Rect::new(barrier.min.x, barrier.min.y.max(0.0), barrier.max.x, barrier.max.y);
            shapes::rect(out, &visible, colors::BARRIER);
        }
    }

    draw_actor(state, out);
}

fn draw_background(state: &GameState, out: &mut Vec<super::Vertex>) {
    let background = &state.background;
    let (width, height, floor) = (background.width, background.height, background.floor);

    shapes::rect(out, &Rect::new(0.0, 0.0, width, floor), colors::SKY);
    shapes::rect(out, &Rect::new(0.0, floor, width, height), colors::GROUND);

    // Alternating grass stripes, shifted by the scroll offset
    let tile = background.tile;
    let strip_bottom = (floor + tile / 2.0).min(height);
    let mut x = background.grass_offset - tile;
    let mut light = true;
    while x < width {
        let color = if light {
            colors::GRASS_LIGHT
        } else {
            colors::GRASS_DARK
        };
        let stripe = Rect::new(x.max(0.0), floor, (x + tile / 2.0).min(width), strip_bottom);
        shapes::rect(out, &stripe, color);
        x += tile / 2.0;
        light = !light;
    }
}

fn draw_plane(state: &GameState, out: &mut Vec<super::Vertex>) {
    let plane = &state.plane;
    shapes::rect(
        out,
        &Rect::from_origin_size(Vec2::new(plane.x, plane.y), Vec2::new(plane.width, plane.height)),
        colors::PLANE,
    );

    // Propeller on the nose; its blade shrinks and grows with the frame
    let nose = if plane.flying_from_right {
        plane.x
    } else {
        plane.x + plane.width
    };
    let blade = plane.height * (3 - plane.frame) as f32 / 3.0;
    let center_y = plane.y + plane.height / 2.0;
    shapes::rect(
        out,
        &Rect::new(nose - 1.0, center_y - blade / 2.0, nose + 1.0, center_y + blade / 2.0),
        colors::PROPELLER,
    );
}

fn draw_fireworks(state: &GameState, out: &mut Vec<super::Vertex>) {
    let fireworks = &state.fireworks;
    let center = Vec2::new(
        fireworks.x + fireworks.size / 2.0,
        fireworks.y + fireworks.size / 2.0,
    );
    // Each frame the burst grows a ring of sparks
    let sparks = 8;
    let radius = fireworks.size / 2.0 * (fireworks.frame + 1) as f32
        / crate::consts::FIREWORKS_FRAMES as f32;
    for i in 0..sparks {
        let theta = i as f32 / sparks as f32 * std::f32::consts::TAU;
        let color = colors::FIREWORK[i % colors::FIREWORK.len()];
        let spark = center + Vec2::from_angle(theta) * radius;
        shapes::circle(out, spark, fireworks.size / 24.0, color, 6);
    }
}

fn draw_actor(state: &GameState, out: &mut Vec<super::Vertex>) {
    let actor = &state.actor;
    let size = Vec2::new(actor.width, actor.height);
    let center = Vec2::new(actor.x, actor.y) + size / 2.0;
    shapes::rotated_rect(out, center, size, actor.tilt, colors::ACTOR);

    // Wing flaps through three positions
    let wing_offset = (actor.wing_frame as f32 - 1.0) * actor.height / 4.0;
    let wing_center = center + Vec2::new(-actor.width / 6.0, wing_offset);
    shapes::rotated_rect(
        out,
        wing_center,
        Vec2::new(actor.width / 3.0, actor.height / 4.0),
        actor.tilt,
        colors::WING,
    );
}
