pub mod a001_navigation;
pub mod a002_business_group;
pub mod a003_card_item;
pub mod a004_document;
