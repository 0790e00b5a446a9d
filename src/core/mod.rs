// Core value types shared by the engine and game layers

pub mod rect;

pub use rect::Rect;
