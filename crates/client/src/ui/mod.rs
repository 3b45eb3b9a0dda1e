pub mod presentation;
pub mod terminal;
