pub mod badges;
pub mod heatmap;
pub mod line;
pub mod rating;
pub mod report;

pub use line::{kd_ratio, Behaviour, CounterOverflow, StatLine};
