//! Newsfeed - a small news publishing module
//!
//! This crate serves a paginated list of news articles and a form for
//! posting new ones, with an optional image attachment per article.

pub mod config;
pub mod db;
pub mod forms;
pub mod media;
pub mod pagination;
pub mod routes;
