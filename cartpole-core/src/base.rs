//! Core functionalities.
mod conversion;
mod core_env;
mod env;
mod kpi;
mod policy;
mod render;
mod reward;
mod step;
pub use conversion::{ActionConversion, ObservationConversion};
pub use core_env::{ActorId, CoreEnv, CoreStep};
pub use env::Env;
pub use kpi::KpiCalculator;
pub use policy::{Configurable, Policy};
pub use render::Renderer;
pub use reward::RewardAggregator;
use std::fmt::Debug;
pub use step::{Info, MazeInfo, Step};

/// An observation as seen by an agent.
///
/// This is the machine readable counterpart of the structured state of a
/// [`CoreEnv`], produced by an [`ObservationConversion`].
pub trait Obs: Clone + Debug {}

/// An action as emitted by an agent.
///
/// It is mapped onto the structured action of a [`CoreEnv`] by an
/// [`ActionConversion`].
pub trait Act: Clone + Debug {}
