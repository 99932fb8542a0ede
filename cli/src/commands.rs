//! Subcommand handlers. Each one drives a `ResourcePage` the way a UI page
//! would and writes what the user would see.

use std::io::Write;

use crud_core::{
    ApiError, Comments, CreateComment, CreateTodo, Posts, Products, Recipes, Resource,
    ResourceClient, ResourcePage, Todos, Transport, UpdateComment, UpdateTodo,
};
use thiserror::Error;

use crate::config::{Command, ResourceKind};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not render record: {0}")]
    Render(#[from] serde_json::Error),
}

pub fn run(
    command: Command,
    client: &ResourceClient,
    transport: &impl Transport,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::List { resource } => match resource {
            ResourceKind::Comments => list::<Comments>(client, transport, out),
            ResourceKind::Products => list::<Products>(client, transport, out),
            ResourceKind::Recipes => list::<Recipes>(client, transport, out),
            ResourceKind::Posts => list::<Posts>(client, transport, out),
            ResourceKind::Todos => list::<Todos>(client, transport, out),
        },
        Command::AddComment {
            body,
            post_id,
            user_id,
        } => {
            let input = CreateComment {
                body,
                post_id,
                user_id,
            };
            add::<Comments>(client, transport, &input, out)
        }
        Command::EditComment { id, body } => {
            let input = UpdateComment { body: Some(body) };
            edit::<Comments>(client, transport, id, &input, out)
        }
        Command::AddTodo {
            todo,
            user_id,
            completed,
        } => {
            let input = CreateTodo {
                todo,
                completed,
                user_id,
            };
            add::<Todos>(client, transport, &input, out)
        }
        Command::ToggleTodo { id, completed } => {
            let input = UpdateTodo {
                todo: None,
                completed: Some(completed),
            };
            edit::<Todos>(client, transport, id, &input, out)
        }
        Command::Delete { resource, id } => match resource {
            ResourceKind::Comments => remove::<Comments>(client, transport, id, out),
            ResourceKind::Products => remove::<Products>(client, transport, id, out),
            ResourceKind::Recipes => remove::<Recipes>(client, transport, id, out),
            ResourceKind::Posts => remove::<Posts>(client, transport, id, out),
            ResourceKind::Todos => remove::<Todos>(client, transport, id, out),
        },
    }
}

fn list<R: Resource>(
    client: &ResourceClient,
    transport: &impl Transport,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut page = ResourcePage::<R>::new(client.clone());
    page.mount(transport)?;
    render(&page, out)
}

fn add<R: Resource>(
    client: &ResourceClient,
    transport: &impl Transport,
    input: &R::Create,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut page = ResourcePage::<R>::new(client.clone());
    page.mount(transport)?;
    page.add(transport, input)?;
    render(&page, out)
}

fn edit<R: Resource>(
    client: &ResourceClient,
    transport: &impl Transport,
    id: u64,
    input: &R::Update,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut page = ResourcePage::<R>::new(client.clone());
    let updated = page.edit(transport, id, input)?;
    writeln!(out, "{}", serde_json::to_string(&updated)?)?;
    Ok(())
}

fn remove<R: Resource>(
    client: &ResourceClient,
    transport: &impl Transport,
    id: u64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut page = ResourcePage::<R>::new(client.clone());
    page.remove(transport, id)?;
    writeln!(out, "deleted {}/{id}", R::NAME)?;
    Ok(())
}

fn render<R: Resource>(page: &ResourcePage<R>, out: &mut impl Write) -> Result<(), CliError> {
    for record in page.view() {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }
    Ok(())
}
