pub mod column;
pub mod task;
