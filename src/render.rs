//! Canvas illustration: the desert scene with gallows, and the cowboy drawn one
//! piece per wrong guess.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::round::MAX_WRONG;

/// One piece of the cowboy figure, in the order they appear.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Stage {
    Head = 1,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Stage {
    pub const ALL: [Stage; MAX_WRONG as usize] = [
        Stage::Head,
        Stage::Body,
        Stage::LeftArm,
        Stage::RightArm,
        Stage::LeftLeg,
        Stage::RightLeg,
    ];

    /// Stage for the `n`th wrong guess (1-based); `None` outside 1..=6.
    pub fn from_wrong_count(n: u8) -> Option<Stage> {
        Stage::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Drawing surface for the hangman illustration.
///
/// Stages are additive: drawing stage `n` assumes 1..n-1 are already on screen.
pub trait RenderAdapter {
    /// Clear and draw the empty scene.
    fn reset(&mut self);
    fn draw_stage(&mut self, stage: Stage);
}

const SKIN: &str = "#F5D0A9";
const LEATHER: &str = "#8B4513";
const BRASS: &str = "#FFD700";
const INK: &str = "#000";
const GROUND_Y: f64 = 130.0;

/// `RenderAdapter` backed by a 2D canvas context.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_line_width(2.0);
        Self { canvas, ctx }
    }

    fn line(&self, from: (f64, f64), to: (f64, f64), color: &str) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(color);
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn circle(&self, x: f64, y: f64, r: f64, fill: Option<&str>) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(INK);
        self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU).ok();
        self.ctx.stroke();
        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill();
        }
    }

    fn ellipse(&self, x: f64, y: f64, rx: f64, ry: f64, fill: &str) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(INK);
        self.ctx.set_fill_style_str(fill);
        self.ctx
            .ellipse(x, y, rx, ry, 0.0, 0.0, std::f64::consts::TAU)
            .ok();
        self.ctx.fill();
        self.ctx.stroke();
    }

    /// Closed polygon, outlined and optionally filled.
    fn shape(&self, points: &[(f64, f64)], fill: Option<&str>) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(INK);
        self.ctx.move_to(x0, y0);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.ctx.close_path();
        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill();
        }
        self.ctx.stroke();
    }

    fn head(&self) {
        self.circle(70.0, 30.0, 10.0, Some(SKIN));
        // Hat brim, then crown
        self.ellipse(70.0, 20.0, 18.0, 5.0, LEATHER);
        self.ellipse(70.0, 15.0, 10.0, 5.0, LEATHER);
        self.circle(66.0, 28.0, 1.0, Some(INK));
        self.circle(74.0, 28.0, 1.0, Some(INK));
        self.line((67.0, 34.0), (73.0, 34.0), INK);
    }

    fn body(&self) {
        self.line((70.0, 40.0), (70.0, 80.0), INK);
        // Bandana
        self.shape(
            &[(60.0, 42.0), (80.0, 42.0), (82.0, 46.0), (58.0, 46.0)],
            Some("#FF0000"),
        );
    }

    fn left_arm(&self) {
        self.line((70.0, 55.0), (50.0, 70.0), INK);
        self.circle(50.0, 70.0, 3.0, Some(SKIN));
        // Six-shooter
        self.shape(
            &[(50.0, 65.0), (40.0, 65.0), (40.0, 69.0), (50.0, 69.0)],
            Some("#333333"),
        );
    }

    fn right_arm(&self) {
        self.line((70.0, 55.0), (90.0, 70.0), INK);
        self.circle(90.0, 70.0, 3.0, Some(SKIN));
    }

    fn left_leg(&self) {
        self.line((70.0, 80.0), (50.0, 110.0), INK);
        self.shape(
            &[(50.0, 110.0), (45.0, 110.0), (45.0, 115.0), (55.0, 115.0), (55.0, 110.0)],
            Some(LEATHER),
        );
        self.line((45.0, 113.0), (42.0, 113.0), BRASS);
    }

    fn right_leg(&self) {
        self.line((70.0, 80.0), (90.0, 110.0), INK);
        self.shape(
            &[(90.0, 110.0), (85.0, 110.0), (85.0, 115.0), (95.0, 115.0), (95.0, 110.0)],
            Some(LEATHER),
        );
        self.line((95.0, 113.0), (98.0, 113.0), BRASS);
        // Belt and buckle finish the figure
        self.shape(
            &[(65.0, 80.0), (75.0, 80.0), (75.0, 83.0), (65.0, 83.0)],
            Some(LEATHER),
        );
        self.shape(
            &[(68.0, 80.0), (72.0, 80.0), (72.0, 83.0), (68.0, 83.0)],
            Some(BRASS),
        );
    }
}

impl RenderAdapter for CanvasRenderer {
    fn reset(&mut self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        // Sky and desert floor
        self.ctx.set_fill_style_str("#87CEEB");
        self.ctx.fill_rect(0.0, 0.0, w, GROUND_Y);
        self.ctx.set_fill_style_str("#D2B48C");
        self.ctx.fill_rect(0.0, GROUND_Y, w, (h - GROUND_Y).max(0.0));
        self.line((0.0, GROUND_Y), (w, GROUND_Y), "#A0522D");
        // Cactus
        self.shape(
            &[
                (120.0, 130.0),
                (120.0, 100.0),
                (115.0, 100.0),
                (115.0, 115.0),
                (110.0, 115.0),
                (110.0, 130.0),
            ],
            Some("#2E8B57"),
        );
        // Gallows and rope
        self.line((10.0, 130.0), (40.0, 130.0), LEATHER);
        self.line((10.0, 10.0), (10.0, 130.0), LEATHER);
        self.line((10.0, 10.0), (70.0, 10.0), LEATHER);
        self.line((70.0, 10.0), (70.0, 20.0), "#A52A2A");
    }

    fn draw_stage(&mut self, stage: Stage) {
        match stage {
            Stage::Head => self.head(),
            Stage::Body => self.body(),
            Stage::LeftArm => self.left_arm(),
            Stage::RightArm => self.right_arm(),
            Stage::LeftLeg => self.left_leg(),
            Stage::RightLeg => self.right_leg(),
        }
    }
}
