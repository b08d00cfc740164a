pub mod background;
pub mod dom;
pub mod export;
pub mod icons;
pub mod notice;
pub mod storage;
