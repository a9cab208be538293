//! Numerical building blocks shared by the term structures.

pub mod interpolators;
