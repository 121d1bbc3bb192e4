//! Dictionary-like observation and action spaces of the CartPole environment.
mod action;
mod observation;
pub use action::{CartPoleAct, DictActionConversion, DictActionConversionConfig};
pub use observation::{
    CartPoleObs, DictObservationConversion, DictObservationConversionConfig, OBS_KEYS,
};
