use crate::cli::{TaskAction, TaskCreateArgs, TaskDragArgs, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_domain::{DragItem, FieldUpdate, Id, NewTask, Priority, TaskUpdate};

pub fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::List(args) => {
            let tasks = ctx.list_tasks(args.column_id.as_deref(), args.query.as_deref());
            output::output_list(tasks);
        }
        TaskAction::Get { id } => {
            let task = ctx.get_task(&id)?;
            output::output_success(&task);
        }
        TaskAction::Create(args) => handle_create(ctx, args)?,
        TaskAction::Update(args) => handle_update(ctx, args)?,
        TaskAction::Delete { id } => {
            if !ctx.store.delete_task(&Id::from(id.as_str())) {
                output::output_error(&format!("Task not found: {}", id));
            }
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        TaskAction::Move { id, column_id } => {
            let task_id = Id::from(id.as_str());
            if ctx.store.task(&task_id).is_none() {
                output::output_error(&format!("Task not found: {}", id));
            }
            ctx.store
                .reassign_task_column(&task_id, &Id::from(column_id.as_str()))?;
            let task = ctx.get_task(&id)?;
            output::output_success(&task);
        }
        TaskAction::Drag(args) => handle_drag(ctx, args)?,
    }
    Ok(())
}

fn parse_priority(value: Option<&str>) -> Option<Priority> {
    let value = value?;
    match value.parse::<Priority>() {
        Ok(priority) => Some(priority),
        Err(e) => output::output_error(&e),
    }
}

fn handle_create(ctx: &mut CliContext, args: TaskCreateArgs) -> anyhow::Result<()> {
    if args.title.trim().is_empty() {
        output::output_error("Title is required");
    }

    let mut new = NewTask::new(args.title.trim()).with_tags(args.tags);
    if let Some(column_id) = args.column_id {
        new = new.in_column(column_id);
    }
    if let Some(description) = args.description {
        new = new.with_description(description);
    }
    if let Some(priority) = parse_priority(args.priority.as_deref()) {
        new = new.with_priority(priority);
    }
    new.due_date = args.due_date;

    let task = ctx.store.create_task(new)?;
    output::output_success(&task);
    Ok(())
}

fn handle_update(ctx: &mut CliContext, args: TaskUpdateArgs) -> anyhow::Result<()> {
    if let Some(title) = &args.title {
        if title.trim().is_empty() {
            output::output_error("Title is required");
        }
    }

    let description = if args.clear_description {
        FieldUpdate::Clear
    } else {
        args.description
            .as_deref()
            .map(FieldUpdate::from_text)
            .unwrap_or_default()
    };
    let due_date = if args.clear_due_date {
        FieldUpdate::Clear
    } else {
        args.due_date.map(FieldUpdate::Set).unwrap_or_default()
    };

    let update = TaskUpdate {
        content: args.title.map(|t| t.trim().to_string()),
        description,
        priority: parse_priority(args.priority.as_deref()),
        tags: args.tags,
        due_date,
    };

    match ctx.store.update_task(&Id::from(args.id.as_str()), update) {
        Some(task) => output::output_success(&task),
        None => output::output_error(&format!("Task not found: {}", args.id)),
    }
    Ok(())
}

fn handle_drag(ctx: &mut CliContext, args: TaskDragArgs) -> anyhow::Result<()> {
    let over = match (args.over_task, args.over_column) {
        (Some(task_id), _) => DragItem::task(task_id),
        (None, Some(column_id)) => DragItem::column(column_id),
        (None, None) => output::output_error("Either --over-task or --over-column is required"),
    };
    let result = ctx.drag_task(&args.id, over)?;
    output::output_success(&result);
    Ok(())
}
