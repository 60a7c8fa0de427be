pub mod enums;
pub mod conversation;
pub mod knowledge;
pub mod patient;

pub use enums::*;
pub use conversation::*;
pub use knowledge::*;
pub use patient::*;
