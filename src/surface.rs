// Drawing surface abstraction: the handful of 2D immediate-mode calls the
// particle field needs, implemented for a browser canvas and for a recorder
// that tests can inspect.

use crate::color::Rgba;
use std::convert::Infallible;
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    type Error;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba) -> Result<(), Self::Error>;

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        stroke: Rgba,
        line_width: f64,
    ) -> Result<(), Self::Error>;
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
        Ok(())
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(x, y, radius, 0.0, PI * 2.0)?;
        self.set_fill_style_str(&fill.to_string());
        self.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        stroke: Rgba,
        line_width: f64,
    ) -> Result<(), JsValue> {
        self.begin_path();
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.set_stroke_style_str(&stroke.to_string());
        self.set_line_width(line_width);
        self.stroke();
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        fill: Rgba,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        stroke: Rgba,
        line_width: f64,
    },
}

/// Records draw calls instead of rasterizing them. Two frames that record the
/// same commands put the same pixels on a real canvas.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Circle { x, y, radius, fill });
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        stroke: Rgba,
        line_width: f64,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke,
            line_width,
        });
        Ok(())
    }
}
