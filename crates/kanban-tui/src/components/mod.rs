pub mod card;
pub mod popup;

pub use card::*;
pub use popup::*;
