mod dense;
mod error;
mod gauss;
mod jac;
mod newton;
mod opt;
mod traits;

pub mod debug;
pub mod math;

#[cfg(test)]
mod tests;

pub use dense::*;
pub use error::*;
pub use gauss::*;
pub use jac::*;
pub use newton::*;
pub use opt::*;
pub use traits::*;
