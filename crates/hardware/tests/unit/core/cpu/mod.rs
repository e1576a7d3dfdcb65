

/// The reference PMP layout scenario.
pub mod reference_scenario;
