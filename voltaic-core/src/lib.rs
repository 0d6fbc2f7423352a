mod segment;
mod solution;
mod variable;

pub use segment::{Segment, SegmentError};
pub use solution::{Solution, SolutionError};
pub use variable::StateVariable;
