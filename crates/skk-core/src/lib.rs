pub mod candidates;
pub mod dict;
pub mod romaji;
pub mod settings;
pub mod unicode;
pub mod user_dict;
