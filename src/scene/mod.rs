pub(crate) mod blueprint;
pub(crate) mod builder;
pub(crate) mod color;
pub(crate) mod hash;
pub(crate) mod rng;
