pub mod models;
pub mod prompt;
pub mod recipe;
pub mod session;
pub mod similarity;
