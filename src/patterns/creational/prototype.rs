use crate::utils::error::{LabError, Result};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// State every shape carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeBase {
    pub x: i32,
    pub y: i32,
    pub color: String,
}

impl ShapeBase {
    pub fn new(x: i32, y: i32, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            color: color.into(),
        }
    }
}

pub trait Shape: fmt::Display {
    fn base(&self) -> &ShapeBase;
    fn base_mut(&mut self) -> &mut ShapeBase;

    /// An independent deep copy.
    fn clone_shape(&self) -> Box<dyn Shape>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    pub base: ShapeBase,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, color: &str, width: u32, height: u32) -> Self {
        Self {
            base: ShapeBase::new(x, y, color),
            width,
            height,
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rectangle(x={}, y={}, color='{}', width={}, height={})",
            self.base.x, self.base.y, self.base.color, self.width, self.height
        )
    }
}

impl Shape for Rectangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn clone_shape(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    pub base: ShapeBase,
    pub radius: u32,
}

impl Circle {
    pub fn new(x: i32, y: i32, color: &str, radius: u32) -> Self {
        Self {
            base: ShapeBase::new(x, y, color),
            radius,
        }
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circle(x={}, y={}, color='{}', radius={})",
            self.base.x, self.base.y, self.base.color, self.radius
        )
    }
}

impl Shape for Circle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn clone_shape(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

#[derive(Default)]
pub struct PrototypeRegistry {
    prototypes: HashMap<String, Box<dyn Shape>>,
}

impl PrototypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_prototype(&mut self, name: impl Into<String>, prototype: Box<dyn Shape>) {
        self.prototypes.insert(name.into(), prototype);
    }

    /// Returns a copy of the prototype, never the registered instance.
    pub fn get_prototype(&self, name: &str) -> Result<Box<dyn Shape>> {
        self.prototypes
            .get(name)
            .map(|prototype| prototype.clone_shape())
            .ok_or_else(|| LabError::not_found("prototype", name))
    }

    pub fn describe(&self, name: &str) -> Option<String> {
        self.prototypes.get(name).map(|prototype| prototype.to_string())
    }
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "1. Creating and registering the initial prototypes...")?;
    let mut registry = PrototypeRegistry::new();
    registry.add_prototype(
        "default_rectangle",
        Box::new(Rectangle::new(0, 0, "blue", 100, 50)),
    );
    registry.add_prototype("default_circle", Box::new(Circle::new(10, 10, "red", 25)));

    writeln!(out, "\n2. Cloning prototypes to create new objects...")?;
    let mut new_rectangle = registry.get_prototype("default_rectangle")?;
    new_rectangle.base_mut().x = 150;
    new_rectangle.base_mut().color = "green".to_string();

    let original = registry.describe("default_rectangle").unwrap_or_default();
    writeln!(out, "   - Original prototype: {}", original)?;
    writeln!(out, "   - Modified clone:     {}", new_rectangle)?;
    writeln!(
        out,
        "   - Same object? {}",
        if original == new_rectangle.to_string() { "Yes" } else { "No" }
    )?;

    if let Err(e) = registry.get_prototype("hexagon") {
        writeln!(out, "\n3. Asking for an unknown prototype: {}", e)?;
    }
    Ok(())
}
