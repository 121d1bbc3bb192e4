//! Policy network of the CartPole environment without a deep learning backend.
//!
//! [`PolicyNet`] is a multilayer perceptron over the concatenated observation,
//! computing a logit per action. [`MlpPolicy`] turns the logits into actions.
mod mat;
mod net;
mod policy;
pub use mat::Mat;
pub use net::PolicyNet;
pub use policy::{MlpPolicy, MlpPolicyConfig};
