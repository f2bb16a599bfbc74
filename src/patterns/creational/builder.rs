use crate::utils::error::Result;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computer {
    pub cpu: String,
    pub ram_gb: u32,
    pub storage_gb: u32,
    pub gpu: Option<String>,
    pub extras: Vec<String>,
}

impl Default for Computer {
    fn default() -> Self {
        Self {
            cpu: "Default CPU".to_string(),
            ram_gb: 8,
            storage_gb: 256,
            gpu: None,
            extras: Vec::new(),
        }
    }
}

impl fmt::Display for Computer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Computer configuration:")?;
        writeln!(f, "  - CPU: {}", self.cpu)?;
        writeln!(f, "  - RAM: {}GB", self.ram_gb)?;
        write!(f, "  - Storage: {}GB", self.storage_gb)?;
        if let Some(gpu) = &self.gpu {
            write!(f, "\n  - GPU: {}", gpu)?;
        }
        if !self.extras.is_empty() {
            write!(f, "\n  - Extras: {}", self.extras.join(", "))?;
        }
        Ok(())
    }
}

/// Construction steps shared by every builder. Steps return the builder so
/// they can be chained.
pub trait ComputerBuilder {
    fn build_cpu(&mut self, model: &str) -> &mut dyn ComputerBuilder;
    fn build_ram(&mut self, size_gb: u32) -> &mut dyn ComputerBuilder;
    fn build_storage(&mut self, size_gb: u32) -> &mut dyn ComputerBuilder;
    fn build_gpu(&mut self, model: &str) -> &mut dyn ComputerBuilder;
    fn add_extra(&mut self, extra: &str) -> &mut dyn ComputerBuilder;

    /// Hands over the finished product and starts a fresh one.
    fn take_computer(&mut self) -> Computer;
}

#[derive(Debug, Default)]
pub struct DesktopComputerBuilder {
    computer: Computer,
}

impl DesktopComputerBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComputerBuilder for DesktopComputerBuilder {
    fn build_cpu(&mut self, model: &str) -> &mut dyn ComputerBuilder {
        self.computer.cpu = model.to_string();
        self
    }

    fn build_ram(&mut self, size_gb: u32) -> &mut dyn ComputerBuilder {
        self.computer.ram_gb = size_gb;
        self
    }

    fn build_storage(&mut self, size_gb: u32) -> &mut dyn ComputerBuilder {
        self.computer.storage_gb = size_gb;
        self
    }

    fn build_gpu(&mut self, model: &str) -> &mut dyn ComputerBuilder {
        self.computer.gpu = Some(model.to_string());
        self
    }

    fn add_extra(&mut self, extra: &str) -> &mut dyn ComputerBuilder {
        self.computer.extras.push(extra.to_string());
        self
    }

    fn take_computer(&mut self) -> Computer {
        std::mem::take(&mut self.computer)
    }
}

/// Knows the standard configurations. Works with any builder.
#[derive(Debug, Default)]
pub struct HardwareDirector;

impl HardwareDirector {
    pub fn build_gaming_pc(&self, builder: &mut dyn ComputerBuilder) {
        builder
            .build_cpu("Intel Core i9")
            .build_ram(32)
            .build_storage(1024)
            .build_gpu("NVIDIA RTX 4080")
            .add_extra("Liquid cooling")
            .add_extra("RGB case");
    }

    pub fn build_office_pc(&self, builder: &mut dyn ComputerBuilder) {
        builder
            .build_cpu("Intel Core i5")
            .build_ram(16)
            .build_storage(512);
    }
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Building a custom PC without a director:")?;
    let mut builder = DesktopComputerBuilder::new();
    let custom_pc = builder
        .build_cpu("AMD Ryzen 7 5800X")
        .build_ram(16)
        .build_storage(1024)
        .build_gpu("AMD Radeon RX 6700 XT")
        .take_computer();
    writeln!(out, "{}", custom_pc)?;

    let separator = "-".repeat(50);
    let director = HardwareDirector;

    writeln!(out, "\n{}\n", separator)?;
    writeln!(out, "Using the director to build a gaming PC:")?;
    director.build_gaming_pc(&mut builder);
    writeln!(out, "{}", builder.take_computer())?;

    writeln!(out, "\n{}\n", separator)?;
    writeln!(out, "Using the same director to build an office PC:")?;
    director.build_office_pc(&mut builder);
    writeln!(out, "{}", builder.take_computer())?;
    Ok(())
}
