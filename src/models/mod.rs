// Wire and storage shapes

pub mod exercise;
pub mod history;
pub mod routine;
pub mod workout;

pub use exercise::*;
pub use history::*;
pub use routine::*;
pub use workout::*;
