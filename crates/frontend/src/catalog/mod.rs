pub mod page;
pub mod state;
