pub mod json;
pub mod terminal;

pub use json::JsonWriter;
pub use terminal::TerminalWriter;
