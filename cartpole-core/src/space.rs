//! Observation and action spaces.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Describes the set of valid observations or actions.
///
/// The variants follow the spaces of [Gymnasium](https://gymnasium.farama.org).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// Integers in `0..n`.
    Discrete(usize),

    /// Real valued boxes with element-wise bounds.
    Box {
        /// Lower bounds, one per element.
        low: Vec<f32>,

        /// Upper bounds, one per element.
        high: Vec<f32>,

        /// Shape of the box.
        shape: Vec<usize>,
    },

    /// Named sub-spaces.
    Dict(BTreeMap<String, Space>),
}

impl Space {
    /// A box of the given shape with the same bounds for all elements.
    pub fn uniform_box(low: f32, high: f32, shape: &[usize]) -> Self {
        let n = shape.iter().product();
        Space::Box {
            low: vec![low; n],
            high: vec![high; n],
            shape: shape.to_vec(),
        }
    }

    /// Builds a dict space from `(name, space)` pairs.
    pub fn dict<K: Into<String>>(spaces: Vec<(K, Space)>) -> Self {
        Space::Dict(spaces.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns `true` if `x` is an element of a [`Space::Discrete`].
    ///
    /// Always `false` for other variants.
    pub fn contains_discrete(&self, x: i64) -> bool {
        match self {
            Space::Discrete(n) => x >= 0 && (x as usize) < *n,
            _ => false,
        }
    }

    /// Returns `true` if `xs` lies within the bounds of a [`Space::Box`].
    ///
    /// Always `false` for other variants.
    pub fn contains_box(&self, xs: &[f32]) -> bool {
        match self {
            Space::Box { low, high, .. } => {
                xs.len() == low.len()
                    && xs
                        .iter()
                        .zip(low.iter().zip(high.iter()))
                        .all(|(x, (l, h))| l <= x && x <= h)
            }
            _ => false,
        }
    }

    /// Returns the sub-space of a [`Space::Dict`] with the given name.
    pub fn get(&self, key: &str) -> Option<&Space> {
        match self {
            Space::Dict(spaces) => spaces.get(key),
            _ => None,
        }
    }

    /// Flat shape of the space, the number of scalar elements.
    ///
    /// A discrete space counts as a single element.
    pub fn flat_dim(&self) -> usize {
        match self {
            Space::Discrete(_) => 1,
            Space::Box { shape, .. } => shape.iter().product(),
            Space::Dict(spaces) => spaces.values().map(|s| s.flat_dim()).sum(),
        }
    }
}
