pub mod collection;
pub mod export;
pub mod script;
pub mod shape;
