use crate::utils::error::Result;
use std::io::Write;

pub trait Transport {
    fn deliver(&self) -> String;
}

#[derive(Debug, Default)]
pub struct Truck;

impl Transport for Truck {
    fn deliver(&self) -> String {
        "Delivery by land in a truck.".to_string()
    }
}

#[derive(Debug, Default)]
pub struct Ship;

impl Transport for Ship {
    fn deliver(&self) -> String {
        "Delivery by sea in a ship.".to_string()
    }
}

pub trait Logistics {
    /// The factory method.
    fn create_transport(&self) -> Box<dyn Transport>;

    fn plan_delivery(&self) -> String {
        let transport = self.create_transport();
        format!(
            "Logistics: the creator's code just worked with the result -> ({})",
            transport.deliver()
        )
    }
}

#[derive(Debug, Default)]
pub struct RoadLogistics;

impl Logistics for RoadLogistics {
    fn create_transport(&self) -> Box<dyn Transport> {
        tracing::debug!("RoadLogistics: creating a new truck");
        Box::new(Truck)
    }
}

#[derive(Debug, Default)]
pub struct SeaLogistics;

impl Logistics for SeaLogistics {
    fn create_transport(&self) -> Box<dyn Transport> {
        tracing::debug!("SeaLogistics: creating a new ship");
        Box::new(Ship)
    }
}

fn client_code(creator: &dyn Logistics, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Client: I don't know the creator's type, but it still works.")?;
    writeln!(out, "{}\n", creator.plan_delivery())?;
    Ok(())
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "App: launched with RoadLogistics.")?;
    client_code(&RoadLogistics, out)?;

    writeln!(out, "App: launched with SeaLogistics.")?;
    client_code(&SeaLogistics, out)?;
    Ok(())
}
