pub mod sgd;

pub use sgd::{BiasUpdate, Sgd};
