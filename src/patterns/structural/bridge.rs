use crate::utils::error::Result;
use std::io::Write;
use std::sync::Arc;

pub trait RenderingEngine: Send + Sync {
    fn render_circle(&self, radius: f64) -> String;
    fn render_square(&self, side: f64) -> String;
}

#[derive(Debug, Default)]
pub struct VectorRenderer;

impl RenderingEngine for VectorRenderer {
    fn render_circle(&self, radius: f64) -> String {
        format!("Rendering a circle as vectors with radius {}", radius)
    }

    fn render_square(&self, side: f64) -> String {
        format!("Rendering a square as vectors with side {}", side)
    }
}

#[derive(Debug, Default)]
pub struct RasterRenderer;

impl RenderingEngine for RasterRenderer {
    fn render_circle(&self, radius: f64) -> String {
        format!("Rendering a circle as pixels with radius {}", radius)
    }

    fn render_square(&self, side: f64) -> String {
        format!("Rendering a square as pixels with side {}", side)
    }
}

pub trait Shape {
    fn draw(&self) -> String;
    fn resize(&mut self, factor: f64);
}

pub struct Circle {
    renderer: Arc<dyn RenderingEngine>,
    radius: f64,
}

impl Circle {
    pub fn new(renderer: Arc<dyn RenderingEngine>, radius: f64) -> Self {
        Self { renderer, radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Circle {
    fn draw(&self) -> String {
        self.renderer.render_circle(self.radius)
    }

    fn resize(&mut self, factor: f64) {
        tracing::debug!("Circle: resizing by a factor of {}", factor);
        self.radius *= factor;
    }
}

pub struct Square {
    renderer: Arc<dyn RenderingEngine>,
    side: f64,
}

impl Square {
    pub fn new(renderer: Arc<dyn RenderingEngine>, side: f64) -> Self {
        Self { renderer, side }
    }

    pub fn side(&self) -> f64 {
        self.side
    }
}

impl Shape for Square {
    fn draw(&self) -> String {
        self.renderer.render_square(self.side)
    }

    fn resize(&mut self, factor: f64) {
        tracing::debug!("Square: resizing by a factor of {}", factor);
        self.side *= factor;
    }
}

fn draw_set(
    title: &str,
    renderer: Arc<dyn RenderingEngine>,
    resize_circle: bool,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "--- Creating shapes with {} ---", title)?;
    let mut circle = Circle::new(Arc::clone(&renderer), 5.0);
    let mut square = Square::new(renderer, 10.0);
    writeln!(out, "{}", circle.draw())?;
    writeln!(out, "{}", square.draw())?;

    let (shape, factor): (&mut dyn Shape, f64) = if resize_circle {
        (&mut circle, 1.5)
    } else {
        (&mut square, 0.5)
    };
    writeln!(out, "Resizing by a factor of {}.", factor)?;
    shape.resize(factor);
    writeln!(out, "{}", shape.draw())?;
    Ok(())
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    draw_set("vector rendering", Arc::new(VectorRenderer), true, out)?;
    writeln!(out)?;
    draw_set("raster rendering", Arc::new(RasterRenderer), false, out)?;
    Ok(())
}
