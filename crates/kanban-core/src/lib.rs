pub mod config;
pub mod error;
pub mod input;
pub mod result;
pub mod traits;

pub use config::AppConfig;
pub use error::KanbanError;
pub use input::InputState;
pub use result::KanbanResult;
pub use traits::KeyValueStore;
