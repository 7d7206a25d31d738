//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use smart_home_sim::devices::{LightBulb, SmartOutlet, Thermostat};
use smart_home_sim::sim::clock::ManualClock;
use smart_home_sim::sim::context::HomeContext;

/// Fresh context on a manual clock starting at zero.
pub fn manual_context() -> (HomeContext, ManualClock) {
    HomeContext::manual()
}

/// 60 W white lamp at 75% brightness.
pub fn lamp(ctx: &mut HomeContext) -> LightBulb {
    LightBulb::new(ctx, "LB1", "Lamp", 60.0, 75, "white").expect("valid lamp")
}

/// 1000 W thermostat reading 20.0 C.
pub fn thermostat(ctx: &mut HomeContext) -> Thermostat {
    Thermostat::new(ctx, "TH1", "Thermostat", 1000.0, 20.0).expect("valid thermostat")
}

/// 5 W outlet with a 16 A limit and no voltage jitter.
pub fn outlet(ctx: &mut HomeContext) -> SmartOutlet {
    SmartOutlet::new(ctx, "SO1", "Outlet", 5.0, 16.0).expect("valid outlet")
}
