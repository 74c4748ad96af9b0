//! Handlers for each `homework` subcommand.

use crate::api::HttpHomeworkApi;
use crate::app::HomeworkViewModel;
use crate::cli::{AddArgs, ServeArgs};
use crate::render::render_rows;
use anyhow::Context;
use chrono::{Local, Utc};
use homework_core::{HomeworkId, NewHomework};
use homework_server::{HomeworkServer, ServerConfig};
use std::io::Write;

/// Runs the API server until the process is stopped.
pub fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = ServerConfig::from(args);
    let server = HomeworkServer::bind(config.clone()).with_context(|| {
        format!(
            "failed to start homework server on {} with diary {}",
            config.bind_addr,
            config.db_path.display()
        )
    })?;
    if let Some(addr) = server.local_addr() {
        println!("Homework API listening on http://{addr}");
    }
    server.run();
    Ok(())
}

/// Prints every entry as a card.
pub fn list(api_url: &str) -> anyhow::Result<()> {
    let view_model = connect(api_url)?;
    print_rows(&view_model)
}

pub fn add(api_url: &str, args: AddArgs) -> anyhow::Result<()> {
    let mut view_model = HomeworkViewModel::new(HttpHomeworkApi::new(api_url));
    let draft = NewHomework::from(args);
    view_model.create(&draft)?;
    println!("Added.");
    print_rows(&view_model)
}

pub fn done(api_url: &str, id: HomeworkId, completed: bool) -> anyhow::Result<()> {
    let mut view_model = connect(api_url)?;
    if view_model.store().get(id).is_none() {
        println!("No homework with id {id}.");
        return Ok(());
    }
    view_model
        .toggle_completed(id, completed)
        .with_context(|| format!("failed to update homework {id}"))?;
    print_rows(&view_model)
}

pub fn remove(api_url: &str, id: HomeworkId) -> anyhow::Result<()> {
    let mut view_model = connect(api_url)?;
    let removed = view_model
        .delete(id)
        .with_context(|| format!("failed to delete homework {id}"))?;
    if removed {
        println!("Deleted homework {id}.");
    } else {
        println!("No homework with id {id}.");
    }
    Ok(())
}

fn connect(api_url: &str) -> anyhow::Result<HomeworkViewModel<HttpHomeworkApi>> {
    let mut view_model = HomeworkViewModel::new(HttpHomeworkApi::new(api_url));
    view_model
        .load()
        .with_context(|| format!("failed to load homework from {api_url}"))?;
    Ok(view_model)
}

fn print_rows(view_model: &HomeworkViewModel<HttpHomeworkApi>) -> anyhow::Result<()> {
    let rows = view_model.rows(Utc::now());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_rows(&mut out, &rows, &Local)?;
    out.flush()?;
    Ok(())
}
