pub mod catalog;
pub mod currency;
pub mod filter;
pub mod quote;
