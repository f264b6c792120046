pub mod collection;
pub mod error;
pub mod report;
pub mod script;
pub mod shape;
