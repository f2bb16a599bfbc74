use crate::utils::error::{LabError, Result};
use std::io::Write;

pub trait Graphic {
    fn name(&self) -> &str;

    /// Renders this node, one line per element, prefixed with `indentation`.
    fn draw(&self, indentation: &str) -> Vec<String>;

    fn add(&mut self, _component: Box<dyn Graphic>) -> Result<()> {
        Err(LabError::unsupported(format!(
            "adding children to the leaf '{}'",
            self.name()
        )))
    }

    fn remove(&mut self, _name: &str) -> Result<Box<dyn Graphic>> {
        Err(LabError::unsupported(format!(
            "removing children from the leaf '{}'",
            self.name()
        )))
    }
}

#[derive(Debug, Clone)]
pub struct Circle {
    name: String,
}

impl Circle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Graphic for Circle {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw(&self, indentation: &str) -> Vec<String> {
        vec![format!("{}- Circle: {}", indentation, self.name)]
    }
}

#[derive(Debug, Clone)]
pub struct Square {
    name: String,
}

impl Square {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Graphic for Square {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw(&self, indentation: &str) -> Vec<String> {
        vec![format!("{}- Square: {}", indentation, self.name)]
    }
}

pub struct CompositeGraphic {
    name: String,
    children: Vec<Box<dyn Graphic>>,
}

impl CompositeGraphic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Graphic for CompositeGraphic {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw(&self, indentation: &str) -> Vec<String> {
        let child_indentation = format!("{}  ", indentation);
        let mut lines = vec![format!("{}[Container: {}]", indentation, self.name)];
        for child in &self.children {
            lines.extend(child.draw(&child_indentation));
        }
        lines.push(format!("{}[/Container: {}]", indentation, self.name));
        lines
    }

    fn add(&mut self, component: Box<dyn Graphic>) -> Result<()> {
        self.children.push(component);
        Ok(())
    }

    /// Removes the first direct child called `name`.
    fn remove(&mut self, name: &str) -> Result<Box<dyn Graphic>> {
        let index = self
            .children
            .iter()
            .position(|child| child.name() == name)
            .ok_or_else(|| LabError::not_found("graphic", name))?;
        Ok(self.children.remove(index))
    }
}

pub fn sample_drawing() -> Result<CompositeGraphic> {
    let mut sub_drawing = CompositeGraphic::new("Sub-drawing 1");
    sub_drawing.add(Box::new(Circle::new("Circle 1")))?;
    sub_drawing.add(Box::new(Square::new("Square 1")))?;

    let mut main_drawing = CompositeGraphic::new("Main drawing");
    main_drawing.add(Box::new(sub_drawing))?;
    main_drawing.add(Box::new(Circle::new("Circle 2")))?;
    Ok(main_drawing)
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let drawing = sample_drawing()?;
    writeln!(out, "Drawing the whole structure:")?;
    for line in drawing.draw("") {
        writeln!(out, "{}", line)?;
    }

    let mut leaf = Circle::new("Lonely circle");
    if let Err(e) = leaf.add(Box::new(Square::new("Square 2"))) {
        writeln!(out, "\n{}", e.user_friendly_message())?;
    }
    Ok(())
}
