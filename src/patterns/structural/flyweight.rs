use crate::utils::error::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct TreeType {
    name: String,
    color: String,
    texture: String,
}

impl TreeType {
    fn new(name: &str, color: &str, texture: &str) -> Self {
        tracing::debug!("creating a new tree type (flyweight): {}", name);
        Self {
            name: name.to_string(),
            color: color.to_string(),
            texture: texture.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    pub fn draw(&self, x: i32, y: i32) -> String {
        format!("Drawing a '{}' coloured '{}' at ({}, {})", self.name, self.color, x, y)
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    x: i32,
    y: i32,
    tree_type: Arc<TreeType>,
}

impl Tree {
    pub fn tree_type(&self) -> &Arc<TreeType> {
        &self.tree_type
    }

    pub fn draw(&self) -> String {
        self.tree_type.draw(self.x, self.y)
    }
}

#[derive(Debug, Default)]
pub struct TreeFactory {
    tree_types: HashMap<String, Arc<TreeType>>,
    keys_in_order: Vec<String>,
}

impl TreeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(name: &str, color: &str, texture: &str) -> String {
        format!("{}_{}_{}", name, color, texture)
    }

    /// The shared type for these attributes, created on first request.
    pub fn get_tree_type(&mut self, name: &str, color: &str, texture: &str) -> Arc<TreeType> {
        let key = Self::key(name, color, texture);
        if let Some(existing) = self.tree_types.get(&key) {
            tracing::debug!("TreeFactory: reusing tree type {}", key);
            return Arc::clone(existing);
        }

        let created = Arc::new(TreeType::new(name, color, texture));
        self.keys_in_order.push(key.clone());
        self.tree_types.insert(key, Arc::clone(&created));
        created
    }

    pub fn len(&self) -> usize {
        self.tree_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree_types.is_empty()
    }

    /// Keys of every flyweight created so far, oldest first.
    pub fn list_tree_types(&self) -> &[String] {
        &self.keys_in_order
    }
}

#[derive(Debug, Default)]
pub struct Forest {
    trees: Vec<Tree>,
    factory: TreeFactory,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plant_tree(&mut self, x: i32, y: i32, name: &str, color: &str, texture: &str) {
        let tree_type = self.factory.get_tree_type(name, color, texture);
        self.trees.push(Tree { x, y, tree_type });
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn factory(&self) -> &TreeFactory {
        &self.factory
    }

    pub fn draw(&self) -> Vec<String> {
        self.trees.iter().map(Tree::draw).collect()
    }

    pub fn list_tree_types(&self) -> &[String] {
        self.factory.list_tree_types()
    }
}

const SPECIES: [(&str, &str, &str); 3] = [
    ("Oak", "Dark green", "Oak texture"),
    ("Pine", "Light green", "Pine texture"),
    ("Birch", "Black and white", "Birch texture"),
];

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let mut forest = Forest::new();
    let mut rng = rand::thread_rng();

    writeln!(out, "Planting 10 trees...")?;
    for _ in 0..10 {
        if let Some((name, color, texture)) = SPECIES.choose(&mut rng) {
            forest.plant_tree(rng.gen_range(0..=100), rng.gen_range(0..=100), name, color, texture);
        }
    }

    writeln!(out, "\n--- Drawing the whole forest ---")?;
    for line in forest.draw() {
        writeln!(out, "{}", line)?;
    }

    writeln!(
        out,
        "\nTreeFactory: {} tree types (flyweights) in total.",
        forest.factory().len()
    )?;
    for key in forest.list_tree_types() {
        writeln!(out, "  - {}", key)?;
    }
    Ok(())
}
