pub mod amount;
pub mod calendar;
pub mod csv;
pub mod ofx;
pub mod traits;

pub mod prelude {
    pub use super::csv::prelude::*;
    pub use super::ofx::prelude::*;
    pub use super::traits::{Parser, RawEntry};
}
