pub use bigm_structs::config::{BigMConfig, BigMMethod, KernelConfig};
pub use bigm_structs::core::Partition;

/// Default tolerance for zero-weight and capacity-boundary decisions.
pub const TOLERANCE: f64 = bigm_structs::config::DEFAULT_TOLERANCE;

pub mod big_m;
pub use big_m::*;
pub mod driver;
pub use driver::*;
pub mod fill;
pub use fill::*;
pub mod instance;
pub use instance::*;
pub mod pair;
pub use pair::*;
pub mod ratio;
pub use ratio::*;
