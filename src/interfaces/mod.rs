pub mod console;
pub mod csv;
pub mod interactive;
pub mod json;
pub mod text;
