pub mod collection;
pub mod output;
pub mod weather;
