use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban-board")]
#[command(about = "A drag-and-drop kanban board for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the board data (or set KANBAN_BOARD_DIR)
    #[arg(long, value_name = "DIR", env = "KANBAN_BOARD_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Column operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// List columns in board order
    List,
    /// Append a new column
    Create {
        #[arg(long)]
        title: String,
    },
    /// Move a column to a new position
    Reorder {
        #[arg(long)]
        id: String,
        #[arg(long)]
        position: usize,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks in board order
    List(TaskListArgs),
    /// Get a specific task
    Get {
        #[arg(long)]
        id: String,
    },
    /// Create a new task
    Create(TaskCreateArgs),
    /// Update a task
    Update(TaskUpdateArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Put a task in another column without changing its position
    Move {
        #[arg(long)]
        id: String,
        #[arg(long)]
        column_id: String,
    },
    /// Drag a task over another task or a column and drop it there
    Drag(TaskDragArgs),
}

#[derive(Args)]
pub struct TaskListArgs {
    #[arg(long)]
    pub column_id: Option<String>,
    /// Case-insensitive match on the task title
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub column_id: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    #[arg(long)]
    pub due_date: Option<String>,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub clear_description: bool,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
    #[arg(long)]
    pub due_date: Option<String>,
    #[arg(long, conflicts_with = "due_date")]
    pub clear_due_date: bool,
}

#[derive(Args)]
pub struct TaskDragArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long, required_unless_present = "over_column", conflicts_with = "over_column")]
    pub over_task: Option<String>,
    #[arg(long)]
    pub over_column: Option<String>,
}
