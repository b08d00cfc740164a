pub mod aggregate;
pub mod icon;
