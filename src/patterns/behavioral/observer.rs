use crate::utils::error::{LabError, Result};
use std::io::Write;

pub trait Observer {
    fn name(&self) -> &'static str;

    /// Reacts to a new reading and describes what it did.
    fn update(&mut self, temperature: f64) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(usize);

pub trait Subject {
    fn attach(&mut self, observer: Box<dyn Observer>) -> ObserverId;
    fn detach(&mut self, id: ObserverId) -> Result<Box<dyn Observer>>;
    fn notify(&mut self) -> Vec<String>;
}

#[derive(Debug, Default)]
pub struct TemperatureDisplay {
    last_shown: Option<f64>,
}

impl TemperatureDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_shown(&self) -> Option<f64> {
        self.last_shown
    }
}

impl Observer for TemperatureDisplay {
    fn name(&self) -> &'static str {
        "TemperatureDisplay"
    }

    fn update(&mut self, temperature: f64) -> String {
        self.last_shown = Some(temperature);
        format!("Temperature display: the new temperature is {}°C", temperature)
    }
}

#[derive(Debug)]
pub struct FanController {
    threshold: f64,
    running: bool,
}

impl FanController {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Observer for FanController {
    fn name(&self) -> &'static str {
        "FanController"
    }

    fn update(&mut self, temperature: f64) -> String {
        self.running = temperature > self.threshold;
        if self.running {
            format!(
                "Fan controller: temperature ({}°C) above the threshold ({}°C). Turning the fan on!",
                temperature, self.threshold
            )
        } else {
            format!(
                "Fan controller: temperature ({}°C) is normal. Fan off.",
                temperature
            )
        }
    }
}

#[derive(Default)]
pub struct WeatherStation {
    temperature: f64,
    observers: Vec<(ObserverId, Box<dyn Observer>)>,
    next_id: usize,
}

impl WeatherStation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Stores the reading and notifies every observer.
    pub fn set_temperature(&mut self, temperature: f64) -> Vec<String> {
        self.temperature = temperature;
        tracing::info!("WeatherStation: temperature changed to {}°C", temperature);
        self.notify()
    }
}

impl Subject for WeatherStation {
    fn attach(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        tracing::debug!("WeatherStation: new subscriber {}", observer.name());
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    fn detach(&mut self, id: ObserverId) -> Result<Box<dyn Observer>> {
        let index = self
            .observers
            .iter()
            .position(|(candidate, _)| *candidate == id)
            .ok_or_else(|| LabError::not_found("observer", id.0.to_string()))?;
        Ok(self.observers.remove(index).1)
    }

    fn notify(&mut self) -> Vec<String> {
        let temperature = self.temperature;
        self.observers
            .iter_mut()
            .map(|(_, observer)| observer.update(temperature))
            .collect()
    }
}

fn report(out: &mut dyn Write, reactions: Vec<String>) -> Result<()> {
    writeln!(out, "WeatherStation: notifying every observer...")?;
    for reaction in reactions {
        writeln!(out, "{}", reaction)?;
    }
    Ok(())
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let mut station = WeatherStation::new();
    let display = station.attach(Box::new(TemperatureDisplay::new()));
    station.attach(Box::new(FanController::new(25.0)));

    writeln!(out, "Setting the temperature to 22°C...")?;
    report(out, station.set_temperature(22.0))?;

    writeln!(out, "\nSetting the temperature to 28°C (the fan should turn on)...")?;
    report(out, station.set_temperature(28.0))?;

    writeln!(out, "\nRemoving the temperature display...")?;
    let removed = station.detach(display)?;
    writeln!(out, "WeatherStation: {} unsubscribed.", removed.name())?;

    writeln!(
        out,
        "\nSetting the temperature to 24°C (the fan turns off, the display does not react)..."
    )?;
    report(out, station.set_temperature(24.0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_observers_are_notified() {
        let mut station = WeatherStation::new();
        station.attach(Box::new(TemperatureDisplay::new()));
        station.attach(Box::new(FanController::new(25.0)));

        let reactions = station.set_temperature(28.0);
        assert_eq!(reactions.len(), 2);
        assert!(reactions[0].contains("28°C"));
        assert!(reactions[1].contains("Turning the fan on"));
    }

    #[test]
    fn test_detached_observer_gets_nothing() {
        let mut station = WeatherStation::new();
        let display = station.attach(Box::new(TemperatureDisplay::new()));
        station.attach(Box::new(FanController::new(25.0)));

        station.detach(display).unwrap();
        let reactions = station.set_temperature(24.0);
        assert_eq!(reactions, vec!["Fan controller: temperature (24°C) is normal. Fan off."]);
        assert_eq!(station.observer_count(), 1);

        assert!(station.detach(display).is_err());
    }

    #[test]
    fn test_fan_threshold_is_exclusive() {
        let mut fan = FanController::new(25.0);
        fan.update(25.0);
        assert!(!fan.is_running());
        fan.update(25.5);
        assert!(fan.is_running());
    }
}
