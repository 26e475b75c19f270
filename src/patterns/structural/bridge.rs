//! Bridge: decouple an abstraction (shapes) from its implementation
//! (renderers) so both can vary independently.

use crate::console;

pub trait Renderer {
    fn render_circle(&self, radius: f32) -> String;
    fn render_square(&self, side: f32) -> String;
}

pub struct RasterRenderer;

impl Renderer for RasterRenderer {
    fn render_circle(&self, radius: f32) -> String {
        format!("rendering circle as raster: {radius}")
    }

    fn render_square(&self, side: f32) -> String {
        format!("rendering square as raster: {side}")
    }
}

pub struct VectorRenderer;

impl Renderer for VectorRenderer {
    fn render_circle(&self, radius: f32) -> String {
        format!("rendering circle as vector: {radius}")
    }

    fn render_square(&self, side: f32) -> String {
        format!("rendering square as vector: {side}")
    }
}

pub trait Shape {
    fn draw(&self) -> String;
    fn resize(&mut self, factor: f32);
}

pub struct Circle<'r> {
    renderer: &'r dyn Renderer,
    radius: f32,
}

impl<'r> Circle<'r> {
    pub fn new(renderer: &'r dyn Renderer, radius: f32) -> Self {
        Self { renderer, radius }
    }
}

impl Shape for Circle<'_> {
    fn draw(&self) -> String {
        self.renderer.render_circle(self.radius)
    }

    fn resize(&mut self, factor: f32) {
        self.radius *= factor;
    }
}

pub struct Square<'r> {
    renderer: &'r dyn Renderer,
    side: f32,
}

impl<'r> Square<'r> {
    pub fn new(renderer: &'r dyn Renderer, side: f32) -> Self {
        Self { renderer, side }
    }
}

impl Shape for Square<'_> {
    fn draw(&self) -> String {
        self.renderer.render_square(self.side)
    }

    fn resize(&mut self, factor: f32) {
        self.side *= factor;
    }
}

pub fn run() {
    console::demo("Bridge");

    let raster = RasterRenderer;
    let vector = VectorRenderer;

    let mut shapes: Vec<Box<dyn Shape + '_>> = vec![
        Box::new(Circle::new(&raster, 5.0)),
        Box::new(Square::new(&vector, 5.0)),
    ];
    for shape in &shapes {
        println!("{}", shape.draw());
    }
    for shape in &mut shapes {
        shape.resize(2.0);
        println!("{}", shape.draw());
    }
}
