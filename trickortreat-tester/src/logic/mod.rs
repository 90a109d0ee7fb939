pub mod invariants;
pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;
pub mod tester;

pub use invariants::InvariantChecker;
pub use policy::{CatchPolicy, DoorPolicy, Policy, list_policies};
pub use seeds::resolve_seed_inputs;
pub use simulation::SimulationPlan;
pub use tester::{BatchReport, LogicTester};
