pub mod home;
pub mod not_found;
pub mod simulator;

pub use home::Home;
pub use not_found::NotFound;
pub use simulator::SimulatorPage;
