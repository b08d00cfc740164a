pub mod center;
pub mod group;

pub use center::Center;
