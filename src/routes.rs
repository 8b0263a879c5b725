use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::db::{Article, Database};
use crate::forms::{ArticleInput, FieldError, UploadedImage};
use crate::media::MediaStore;
use crate::pagination::{self, Page};

pub struct AppState {
    pub db: Arc<Database>,
    pub media: MediaStore,
    pub default_per_page: usize,
    pub max_per_page: usize,
}

// Template structs
#[derive(Template)]
#[template(path = "news_list.html")]
pub struct NewsListTemplate {
    pub page: Page<Article>,
}

#[derive(Template)]
#[template(path = "add_news.html")]
pub struct AddNewsTemplate {
    pub form: ArticleInput,
    pub errors: Vec<FieldError>,
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

// Custom error type
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", self.0),
        )
            .into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    // Raw strings: bad values degrade to defaults instead of a 400
    pub page: Option<String>,
    pub per_page: Option<String>,
}

// Route handlers
pub async fn news_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let per_page = pagination::resolve_per_page(
        query.per_page.as_deref(),
        state.default_per_page,
        state.max_per_page,
    );
    let page_number = pagination::resolve_page(query.page.as_deref());

    let articles = state.db.list_articles().await?;
    let page = pagination::paginate(articles, per_page, page_number);

    Ok(HtmlTemplate(NewsListTemplate { page }))
}

pub async fn add_news_form() -> impl IntoResponse {
    HtmlTemplate(AddNewsTemplate {
        form: ArticleInput::default(),
        errors: Vec::new(),
    })
}

pub async fn add_news_submit(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let input = read_article_input(multipart).await?;

    match input.validate() {
        Ok(article) => {
            let image_path = match &input.image {
                Some(upload) => Some(state.media.save_image(&upload.file_name, &upload.data).await?),
                None => None,
            };
            let stored = state
                .db
                .create_article(&article, image_path.as_deref())
                .await?;
            info!("Created article {} '{}'", stored.id, stored.title);
            // 302 Found back to the listing
            Ok((StatusCode::FOUND, [(header::LOCATION, "/")]).into_response())
        }
        Err(errors) => {
            // Re-render with the submitted values and per-field messages
            Ok(HtmlTemplate(AddNewsTemplate {
                form: input,
                errors: errors.errors,
            })
            .into_response())
        }
    }
}

async fn read_article_input(mut multipart: Multipart) -> Result<ArticleInput, AppError> {
    let mut input = ArticleInput::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "title" => input.title = field.text().await?,
            "body" => input.body = field.text().await?,
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                // Browsers send an empty part when no file was chosen
                if !file_name.is_empty() && !data.is_empty() {
                    input.image = Some(UploadedImage {
                        file_name,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(input)
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
