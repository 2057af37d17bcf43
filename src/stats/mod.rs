/// Statistics over a loaded [`Dataset`](crate::data::model::Dataset).
///
/// * `location` – mean, trimmed mean and median of a single numeric column
/// * `weighted` – group-weighted mean of one column weighted by another
pub mod location;
pub mod weighted;

pub use location::{mean, median, trimmed_mean};
pub use weighted::weighted_mean;
