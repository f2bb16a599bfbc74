use crate::utils::error::{LabError, Result};
use crate::utils::validation::validate_range;
use std::io::Write;

#[derive(Debug, Default)]
pub struct LightingSystem;

impl LightingSystem {
    pub fn turn_on(&self, area: &str) -> String {
        format!("Lighting: turning on the lights in '{}'.", area)
    }

    pub fn turn_off(&self, area: &str) -> String {
        format!("Lighting: turning off the lights in '{}'.", area)
    }

    /// `level` is a percentage.
    pub fn set_brightness(&self, area: &str, level: i32) -> Result<String> {
        validate_range("brightness", level, 0, 100)
            .map_err(|_| LabError::validation("Lighting: invalid brightness level."))?;
        Ok(format!("Lighting: setting brightness in '{}' to {}%", area, level))
    }
}

#[derive(Debug, Default)]
pub struct ClimateControl;

impl ClimateControl {
    pub fn set_temperature(&self, celsius: i32) -> String {
        format!("Climate: setting the temperature to {}°C.", celsius)
    }

    pub fn turn_off(&self) -> String {
        "Climate: turning the system off.".to_string()
    }
}

#[derive(Debug, Default)]
pub struct SecuritySystem;

impl SecuritySystem {
    pub fn arm_alarm(&self) -> String {
        "Security: arming the alarm.".to_string()
    }

    pub fn disarm_alarm(&self) -> String {
        "Security: disarming the alarm.".to_string()
    }

    pub fn activate_cameras(&self) -> String {
        "Security: activating the surveillance cameras.".to_string()
    }

    pub fn deactivate_cameras(&self) -> String {
        "Security: deactivating the surveillance cameras.".to_string()
    }
}

#[derive(Debug, Default)]
pub struct SmartHomeFacade {
    lighting: LightingSystem,
    climate: ClimateControl,
    security: SecuritySystem,
}

impl SmartHomeFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrive_home(&self) -> Vec<String> {
        tracing::info!("SmartHome: user arriving");
        vec![
            self.security.disarm_alarm(),
            self.lighting.turn_on("Entrance"),
            self.lighting.turn_on("Living room"),
            self.climate.set_temperature(22),
        ]
    }

    pub fn leave_home(&self) -> Vec<String> {
        tracing::info!("SmartHome: user leaving");
        vec![
            self.lighting.turn_off("Entrance"),
            self.lighting.turn_off("Living room"),
            self.climate.turn_off(),
            self.security.activate_cameras(),
            self.security.arm_alarm(),
        ]
    }
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let home = SmartHomeFacade::new();

    writeln!(out, "--- User arriving home... ---")?;
    for line in home.arrive_home() {
        writeln!(out, "{}", line)?;
    }

    writeln!(out, "\n--- User leaving home... ---")?;
    for line in home.leave_home() {
        writeln!(out, "{}", line)?;
    }

    writeln!(out, "\n--- Using a subsystem directly ---")?;
    let lighting = LightingSystem;
    for level in [70, 150] {
        match lighting.set_brightness("Bedroom", level) {
            Ok(line) => writeln!(out, "{}", line)?,
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrive_home_order() {
        let steps = SmartHomeFacade::new().arrive_home();
        assert_eq!(steps.len(), 4);
        assert!(steps[0].starts_with("Security: disarming"));
        assert!(steps[3].contains("22°C"));
    }

    #[test]
    fn test_leave_home_arms_alarm_last() {
        let steps = SmartHomeFacade::new().leave_home();
        assert_eq!(steps.last().map(String::as_str), Some("Security: arming the alarm."));
        assert_eq!(steps[2], "Climate: turning the system off.");
    }

    #[test]
    fn test_brightness_bounds() {
        let lighting = LightingSystem;
        assert!(lighting.set_brightness("Hall", 0).is_ok());
        assert!(lighting.set_brightness("Hall", 100).is_ok());
        assert!(lighting.set_brightness("Hall", 101).unwrap_err().is_validation());
        assert!(lighting.set_brightness("Hall", -1).is_err());
    }
}
