//! Embedded single-page frontend

use axum::{response::Html, routing::get, Router};

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// GET / - task manager page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Index routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn page_talks_to_task_api() {
        let Html(page) = index().await;
        assert!(page.contains("<title>Task Manager</title>"));
        assert!(page.contains("/api/tasks"));
    }
}
