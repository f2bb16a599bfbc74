use crate::utils::error::{LabError, Result};
use std::io::Write;

pub trait Button {
    fn paint(&self) -> String;
}

pub trait Checkbox {
    fn paint(&self) -> String;
}

pub trait GuiFactory {
    fn name(&self) -> &'static str;
    fn create_button(&self) -> Box<dyn Button>;
    fn create_checkbox(&self) -> Box<dyn Checkbox>;
}

struct WindowsButton;
struct WindowsCheckbox;
struct MacOsButton;
struct MacOsCheckbox;

impl Button for WindowsButton {
    fn paint(&self) -> String {
        "Rendering a Windows-style button.".to_string()
    }
}

impl Checkbox for WindowsCheckbox {
    fn paint(&self) -> String {
        "Rendering a Windows-style checkbox.".to_string()
    }
}

impl Button for MacOsButton {
    fn paint(&self) -> String {
        "Rendering a macOS-style button.".to_string()
    }
}

impl Checkbox for MacOsCheckbox {
    fn paint(&self) -> String {
        "Rendering a macOS-style checkbox.".to_string()
    }
}

#[derive(Debug, Default)]
pub struct WindowsFactory;

impl GuiFactory for WindowsFactory {
    fn name(&self) -> &'static str {
        "WindowsFactory"
    }

    fn create_button(&self) -> Box<dyn Button> {
        Box::new(WindowsButton)
    }

    fn create_checkbox(&self) -> Box<dyn Checkbox> {
        Box::new(WindowsCheckbox)
    }
}

#[derive(Debug, Default)]
pub struct MacOsFactory;

impl GuiFactory for MacOsFactory {
    fn name(&self) -> &'static str {
        "MacOsFactory"
    }

    fn create_button(&self) -> Box<dyn Button> {
        Box::new(MacOsButton)
    }

    fn create_checkbox(&self) -> Box<dyn Checkbox> {
        Box::new(MacOsCheckbox)
    }
}

/// Windows gets the Windows family, every other system the macOS one.
pub fn factory_for_os(os: &str) -> Box<dyn GuiFactory> {
    if os.eq_ignore_ascii_case("windows") {
        Box::new(WindowsFactory)
    } else {
        Box::new(MacOsFactory)
    }
}

/// Client code. Only ever sees the abstract interfaces.
pub struct Application {
    factory: Box<dyn GuiFactory>,
    widgets: Option<(Box<dyn Button>, Box<dyn Checkbox>)>,
}

impl Application {
    pub fn new(factory: Box<dyn GuiFactory>) -> Self {
        Self {
            factory,
            widgets: None,
        }
    }

    pub fn create_ui(&mut self) {
        tracing::debug!("creating widgets with {}", self.factory.name());
        self.widgets = Some((self.factory.create_button(), self.factory.create_checkbox()));
    }

    pub fn paint_ui(&self) -> Result<Vec<String>> {
        let (button, checkbox) = self
            .widgets
            .as_ref()
            .ok_or_else(|| LabError::invalid_state("create_ui must run before paint_ui"))?;
        Ok(vec![button.paint(), checkbox.paint()])
    }
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let os = std::env::consts::OS;
    let factory = factory_for_os(os);
    writeln!(out, "Detected system '{}', using {}.", os, factory.name())?;

    let mut app = Application::new(factory);
    app.create_ui();
    writeln!(out, "Painting the UI:")?;
    for line in app.paint_ui()? {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
