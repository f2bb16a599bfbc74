use crate::patterns::{behavioral, creational, structural};
use crate::solid;
use crate::utils::error::{LabError, Result};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Behavioral,
    Creational,
    Structural,
    Solid,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Behavioral => "behavioral",
            Category::Creational => "creational",
            Category::Structural => "structural",
            Category::Solid => "solid",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    Command,
    Mediator,
    State,
    Strategy,
    TemplateMethod,
    ChainOfResponsibility,
    Observer,
    AbstractFactory,
    Builder,
    FactoryMethod,
    Prototype,
    Singleton,
    Adapter,
    Bridge,
    Composite,
    Decorator,
    Facade,
    Flyweight,
    Proxy,
    Monolith,
}

const ALL: [Demo; 20] = [
    Demo::Command,
    Demo::Mediator,
    Demo::State,
    Demo::Strategy,
    Demo::TemplateMethod,
    Demo::ChainOfResponsibility,
    Demo::Observer,
    Demo::AbstractFactory,
    Demo::Builder,
    Demo::FactoryMethod,
    Demo::Prototype,
    Demo::Singleton,
    Demo::Adapter,
    Demo::Bridge,
    Demo::Composite,
    Demo::Decorator,
    Demo::Facade,
    Demo::Flyweight,
    Demo::Proxy,
    Demo::Monolith,
];

impl Demo {
    pub fn all() -> &'static [Demo] {
        &ALL
    }

    pub fn name(self) -> &'static str {
        match self {
            Demo::Command => "command",
            Demo::Mediator => "mediator",
            Demo::State => "state",
            Demo::Strategy => "strategy",
            Demo::TemplateMethod => "template-method",
            Demo::ChainOfResponsibility => "chain-of-responsibility",
            Demo::Observer => "observer",
            Demo::AbstractFactory => "abstract-factory",
            Demo::Builder => "builder",
            Demo::FactoryMethod => "factory-method",
            Demo::Prototype => "prototype",
            Demo::Singleton => "singleton",
            Demo::Adapter => "adapter",
            Demo::Bridge => "bridge",
            Demo::Composite => "composite",
            Demo::Decorator => "decorator",
            Demo::Facade => "facade",
            Demo::Flyweight => "flyweight",
            Demo::Proxy => "proxy",
            Demo::Monolith => "solid-monolith",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Demo::Command
            | Demo::Mediator
            | Demo::State
            | Demo::Strategy
            | Demo::TemplateMethod
            | Demo::ChainOfResponsibility
            | Demo::Observer => Category::Behavioral,
            Demo::AbstractFactory
            | Demo::Builder
            | Demo::FactoryMethod
            | Demo::Prototype
            | Demo::Singleton => Category::Creational,
            Demo::Adapter
            | Demo::Bridge
            | Demo::Composite
            | Demo::Decorator
            | Demo::Facade
            | Demo::Flyweight
            | Demo::Proxy => Category::Structural,
            Demo::Monolith => Category::Solid,
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Demo::Command => "Text editor operations as undoable commands",
            Demo::Mediator => "Chat room relaying messages between users",
            Demo::State => "Document workflow: draft, moderation, published",
            Demo::Strategy => "Report generator with swappable JSON/CSV/HTML export",
            Demo::TemplateMethod => "Fixed read/transform/save pipeline with overridable steps",
            Demo::ChainOfResponsibility => "Purchase approvals escalating by amount",
            Demo::Observer => "Weather station pushing readings to displays and a fan",
            Demo::AbstractFactory => "Platform-specific UI widget families",
            Demo::Builder => "Step-by-step computer assembly with a director",
            Demo::FactoryMethod => "Road and sea logistics creating their own transport",
            Demo::Prototype => "Shape registry handing out clones",
            Demo::Singleton => "Lazily created, thread-safe database connection",
            Demo::Adapter => "Legacy XML service exposed as JSON",
            Demo::Bridge => "Shapes decoupled from vector/raster renderers",
            Demo::Composite => "Nested drawing groups treated like single shapes",
            Demo::Decorator => "Email notifier wrapped with SMS and Slack",
            Demo::Facade => "One call to run lighting, climate and security",
            Demo::Flyweight => "Forest sharing intrinsic tree types",
            Demo::Proxy => "Access-controlled, caching database proxy",
            Demo::Monolith => "Payment processor doing everything in one method",
        }
    }

    /// Runs the demo, writing its narrative to `out`.
    pub fn run(self, out: &mut dyn Write) -> Result<()> {
        tracing::debug!("running demo {}", self.name());
        match self {
            Demo::Command => behavioral::command::run_demo(out),
            Demo::Mediator => behavioral::mediator::run_demo(out),
            Demo::State => behavioral::state::run_demo(out),
            Demo::Strategy => behavioral::strategy::run_demo(out),
            Demo::TemplateMethod => behavioral::template_method::run_demo(out),
            Demo::ChainOfResponsibility => behavioral::chain_of_responsibility::run_demo(out),
            Demo::Observer => behavioral::observer::run_demo(out),
            Demo::AbstractFactory => creational::abstract_factory::run_demo(out),
            Demo::Builder => creational::builder::run_demo(out),
            Demo::FactoryMethod => creational::factory_method::run_demo(out),
            Demo::Prototype => creational::prototype::run_demo(out),
            Demo::Singleton => creational::singleton::run_demo(out),
            Demo::Adapter => structural::adapter::run_demo(out),
            Demo::Bridge => structural::bridge::run_demo(out),
            Demo::Composite => structural::composite::run_demo(out),
            Demo::Decorator => structural::decorator::run_demo(out),
            Demo::Facade => structural::facade::run_demo(out),
            Demo::Flyweight => structural::flyweight::run_demo(out),
            Demo::Proxy => structural::proxy::run_demo(out),
            Demo::Monolith => solid::monolith::run_demo(out),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = LabError;

    /// Accepts the kebab-case name, case-insensitively and with `_` for `-`.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Demo::all()
            .iter()
            .copied()
            .find(|demo| demo.name() == wanted)
            .ok_or_else(|| LabError::not_found("demo", s))
    }
}

/// Runs every demo in catalogue order under a banner, stopping at the first error.
pub fn run_all(out: &mut dyn Write) -> Result<()> {
    for demo in Demo::all() {
        writeln!(out, "=== {} ({}) ===", demo.name(), demo.category())?;
        demo.run(out)?;
        writeln!(out)?;
    }
    Ok(())
}
