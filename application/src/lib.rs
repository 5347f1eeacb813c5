pub mod chat_service;
pub mod recipe_service;
pub mod similarity_service;
pub mod summarize_service;
