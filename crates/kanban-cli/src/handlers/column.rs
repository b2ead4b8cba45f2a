use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;

pub fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::List => {
            output::output_list(ctx.store.columns().to_vec());
        }
        ColumnAction::Create { title } => {
            if title.trim().is_empty() {
                output::output_error("Column title must not be empty");
            }
            let column = ctx.store.create_column(title.trim());
            output::output_success(&column);
        }
        ColumnAction::Reorder { id, position } => {
            let columns = ctx.reorder_column(&id, position)?;
            output::output_list(columns);
        }
    }
    Ok(())
}
