use crate::{CartPoleEvent, CartPoleMazeAction, CartPoleMazeState};
use anyhow::Result;
use cartpole_core::{Renderer, StepEventLog};
use image::{Rgb, RgbImage};
use log::debug;
use std::{cell::Cell, fs, path::PathBuf};

const SCREEN_WIDTH: u32 = 600;
const SCREEN_HEIGHT: u32 = 400;
const CART_WIDTH: f64 = 50.0;
const CART_HEIGHT: f64 = 30.0;
const POLE_WIDTH: f64 = 10.0;
const WHEEL_RADIUS: f64 = 5.0;
const RAIL_Y: f64 = 100.0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const CART_COLOR: Rgb<u8> = Rgb([178, 51, 51]);
const POLE_COLOR: Rgb<u8> = Rgb([204, 153, 102]);

/// Top-left corner and pixel size of the step counter.
const COUNTER_ORIGIN: (u32, u32) = (10, 10);
const COUNTER_PIXEL: u32 = 3;

/// 3x5 bitmaps of the decimal digits, one row per entry, high bit on the left.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Draws the cart and the pole into a 600x400 RGB image, with the step number in
/// the top-left corner.
///
/// If an output directory is given, frames are saved as
/// `<out_dir>/episode_<n>/frame_<env_time>.png`, where `n` counts the rendered
/// initial states.
pub struct CartPoleRenderer {
    pole_length: f64,
    x_threshold: f64,
    out_dir: Option<PathBuf>,
    n_episodes: Cell<usize>,
}

impl CartPoleRenderer {
    /// Creates a renderer.
    ///
    /// `pole_length` is half the length of the pole.
    pub fn new(pole_length: f64, x_threshold: f64, out_dir: Option<PathBuf>) -> Self {
        Self {
            pole_length,
            x_threshold,
            out_dir,
            n_episodes: Cell::new(0),
        }
    }

    /// Pixels per unit length.
    fn scale(&self) -> f64 {
        SCREEN_WIDTH as f64 / (2.0 * self.x_threshold)
    }

    /// Draws the state reached after `env_time` steps.
    pub fn frame(&self, state: &CartPoleMazeState, env_time: usize) -> RgbImage {
        let mut canvas = Canvas(RgbImage::from_pixel(SCREEN_WIDTH, SCREEN_HEIGHT, WHITE));
        let scale = self.scale();
        let cart_x = state.cart_position * scale + SCREEN_WIDTH as f64 / 2.0;
        let cart_y = RAIL_Y;

        canvas.fill(
            (0.0, RAIL_Y - 1.0, SCREEN_WIDTH as f64, RAIL_Y),
            |_, _| true,
            BLACK,
        );

        let (w, h) = (CART_WIDTH / 2.0, CART_HEIGHT / 2.0);
        canvas.fill(
            (cart_x - w, cart_y - h, cart_x + w, cart_y + h),
            |_, _| true,
            CART_COLOR,
        );

        for dx in [-w / 2.0, w / 2.0].iter() {
            let (cx, cy) = (cart_x + dx, cart_y - h);
            let r = WHEEL_RADIUS;
            canvas.fill(
                (cx - r, cy - r, cx + r, cy + r),
                |x, y| (x - cx).powi(2) + (y - cy).powi(2) <= r * r,
                BLACK,
            );
        }

        // The pole is a rectangle rotated around the axle.
        let pole_len = scale * 2.0 * self.pole_length;
        let (ax, ay) = (cart_x, cart_y + CART_HEIGHT / 4.0);
        let (sin, cos) = state.pole_angle.sin_cos();
        let half = POLE_WIDTH / 2.0;
        let reach = pole_len + half;
        canvas.fill(
            (ax - reach, ay - reach, ax + reach, ay + reach),
            |x, y| {
                let (ux, uy) = (x - ax, y - ay);
                let lx = ux * cos - uy * sin;
                let ly = ux * sin + uy * cos;
                -half <= lx && lx <= half && -half <= ly && ly <= pole_len - half
            },
            POLE_COLOR,
        );

        let mut img = canvas.0;
        draw_counter(&mut img, env_time);
        img
    }
}

/// Writes `n` in decimal digits from [`COUNTER_ORIGIN`] to the right.
fn draw_counter(img: &mut RgbImage, n: usize) {
    let (x0, y0) = COUNTER_ORIGIN;
    let px = COUNTER_PIXEL;
    let advance = 4 * px;

    for (i, c) in n.to_string().bytes().enumerate() {
        let glyph = DIGITS[(c - b'0') as usize];
        let left = x0 + i as u32 * advance;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..3u32 {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                for dy in 0..px {
                    for dx in 0..px {
                        let (x, y) = (left + col * px + dx, y0 + row as u32 * px + dy);
                        if x < img.width() && y < img.height() {
                            img.put_pixel(x, y, BLACK);
                        }
                    }
                }
            }
        }
    }
}

/// Image with the origin at the bottom left.
struct Canvas(RgbImage);

impl Canvas {
    /// Colors the pixels within the bounding box `(x0, y0, x1, y1)` whose centers
    /// satisfy `inside`.
    fn fill<F>(&mut self, bbox: (f64, f64, f64, f64), inside: F, color: Rgb<u8>)
    where
        F: Fn(f64, f64) -> bool,
    {
        let (width, height) = self.0.dimensions();
        let clamp = |v: f64, max: u32| v.max(0.0).min(max as f64) as u32;
        let (x0, x1) = (clamp(bbox.0.floor(), width), clamp(bbox.2.ceil(), width));
        let (y0, y1) = (clamp(bbox.1.floor(), height), clamp(bbox.3.ceil(), height));

        for y in y0..y1 {
            for x in x0..x1 {
                if inside(x as f64 + 0.5, y as f64 + 0.5) {
                    self.0.put_pixel(x, height - 1 - y, color);
                }
            }
        }
    }
}

impl Renderer<CartPoleMazeState, CartPoleMazeAction, CartPoleEvent> for CartPoleRenderer {
    fn render(
        &self,
        state: &CartPoleMazeState,
        action: Option<&CartPoleMazeAction>,
        events: &StepEventLog<CartPoleEvent>,
    ) -> Result<()> {
        if action.is_none() {
            self.n_episodes.set(self.n_episodes.get() + 1);
        }
        debug!(
            "Render env_time = {}, state = {:?}, action = {:?}, events = {:?}",
            events.env_time, state, action, events
        );

        if let Some(out_dir) = &self.out_dir {
            let episode = self.n_episodes.get().saturating_sub(1);
            let dir = out_dir.join(format!("episode_{:04}", episode));
            fs::create_dir_all(&dir)?;
            let path = dir.join(format!("frame_{:06}.png", events.env_time));
            self.frame(state, events.env_time).save(&path)?;
        }

        Ok(())
    }
}
