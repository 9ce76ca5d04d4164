pub mod add;
pub mod list;
pub mod quiz;
pub mod reset;
pub mod review;
pub mod stats;
pub mod transfer;
