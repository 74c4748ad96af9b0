//! `homework` command-line client and server launcher.
//!
//! The view-model in [`app`] is the client half of the diary: it holds a
//! [`homework_core::HomeworkStore`] and talks to the API through [`api`].

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod render;

pub use api::{ApiError, ApiResult, HomeworkApi, HttpHomeworkApi, DEFAULT_API_URL};
pub use app::{HomeworkViewModel, ViewModelError};
