use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, get_service},
    Json, Router,
};
use htmlescape::encode_minimal;
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};

use crate::carousel::{Carousel, ROTATION_INTERVAL, TRANSITION_DURATION};
use crate::config::CmsConfig;
use crate::error::CmsError;
use crate::markdown::{reading_time_minutes, render_markdown_to_html};
use crate::models::BlogPost;
use crate::state::AppState;

/// Portfolio images rotated by the home-page carousel, shipped under
/// `content/static/portfolio/`.
pub const PORTFOLIO_IMAGES: &[&str] = &[
    "/static/portfolio/img1.svg",
    "/static/portfolio/img2.svg",
    "/static/portfolio/img3.svg",
    "/static/portfolio/img4.svg",
    "/static/portfolio/img5.svg",
    "/static/portfolio/img6.svg",
    "/static/portfolio/img7.svg",
    "/static/portfolio/img8.svg",
];

const PLACEHOLDER_IMAGE: &str = "/static/placeholder-image.svg";

// Client-side mirror of the carousel state machine in `carousel.rs`; the
// rotation and transition timings come from data attributes on the widget.
const CAROUSEL_SCRIPT: &str = r#"
<script>
(() => {
    const root = document.getElementById("carousel");
    if (!root) return;
    const frames = Array.from(root.querySelectorAll(".carousel-frame"));
    const modal = document.getElementById("carousel-modal");
    const modalFrame = document.getElementById("carousel-modal-frame");
    const modalImage = document.getElementById("carousel-modal-image");
    const rotateMs = Number(root.dataset.rotateMs);
    const transitionMs = Number(root.dataset.transitionMs);

    let index = frames.findIndex((f) => f.classList.contains("active"));
    if (index < 0) index = 0;
    let transitioning = false;
    let hovered = false;
    let enlarged = false;

    const show = () => {
        frames.forEach((f, i) => f.classList.toggle("active", i === index));
        modalImage.src = frames[index].querySelector("img").src;
    };

    const step = (delta) => {
        if (transitioning || enlarged || frames.length === 0) return;
        transitioning = true;
        index = (index + delta + frames.length) % frames.length;
        show();
        setTimeout(() => { transitioning = false; }, transitionMs);
    };

    setInterval(() => {
        if (!hovered && !enlarged) step(1);
    }, rotateMs);

    document.getElementById("carousel-prev").addEventListener("click", (e) => {
        e.stopPropagation();
        step(-1);
    });
    document.getElementById("carousel-next").addEventListener("click", (e) => {
        e.stopPropagation();
        step(1);
    });

    const stage = document.getElementById("carousel-stage");
    stage.addEventListener("mouseenter", () => { hovered = true; });
    stage.addEventListener("mouseleave", () => { hovered = false; });
    stage.addEventListener("click", () => {
        enlarged = true;
        modal.hidden = false;
    });

    const close = () => {
        enlarged = false;
        modal.hidden = true;
    };
    document.getElementById("carousel-close").addEventListener("click", (e) => {
        e.stopPropagation();
        close();
    });
    modal.addEventListener("mousedown", (e) => {
        if (!modalFrame.contains(e.target)) close();
    });

    // Deter casual copying of portfolio shots.
    for (const el of [root, modal]) {
        el.addEventListener("contextmenu", (e) => e.preventDefault());
        el.addEventListener("dragstart", (e) => e.preventDefault());
    }
})();
</script>
"#;

pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = get_service(ServeDir::new("content/static"));
    let favicon = get_service(ServeFile::new("content/static/favicon.ico"));

    Router::new()
        .route("/", get(homepage))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(blog_post))
        .route("/api/blog-posts", get(blog_posts_proxy))
        .nest_service("/static", static_dir)
        .route_service("/favicon.ico", favicon)
        .with_state(state)
}

fn render_with_layout(layout: &str, banner: &str, content: &str) -> String {
    layout
        .replace("{{ banner }}", banner)
        .replace("{{ content }}", content)
}

async fn homepage(State(state): State<Arc<AppState>>) -> Html<String> {
    let content = state
        .templates
        .home
        .replace("{{ carousel }}", &render_carousel(&state.config.watermark));
    Html(render_with_layout(
        &state.templates.layout,
        &state.templates.banner,
        &content,
    ))
}

async fn blog_index(State(state): State<Arc<AppState>>) -> Html<String> {
    let posts = state.cms.list_posts().await;
    let content = render_post_list(&posts, state.cms.config());
    Html(render_with_layout(
        &state.templates.layout,
        &state.templates.banner,
        &content,
    ))
}

async fn blog_post(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.cms.get_post_by_slug(&slug).await {
        Some(post) => {
            let content = render_post_article(&post, state.cms.config());
            Html(render_with_layout(
                &state.templates.layout,
                &state.templates.banner,
                &content,
            ))
            .into_response()
        }
        None => {
            let body = state
                .templates
                .not_found
                .replace("{{slug}}", &encode_minimal(&slug));
            (
                StatusCode::NOT_FOUND,
                Html(render_with_layout(
                    &state.templates.layout,
                    &state.templates.banner,
                    &body,
                )),
            )
                .into_response()
        }
    }
}

/// Re-exposes the posts collection as a local JSON endpoint. Configuration
/// and transport failures become a 500 with an error body; an upstream API
/// error keeps its status code; success passes the raw payload through.
async fn blog_posts_proxy(State(state): State<Arc<AppState>>) -> Response {
    match state.cms.fetch_resource("blog-posts?populate=*").await {
        Ok(payload) => Json(payload).into_response(),
        Err(e @ CmsError::Configuration(_)) => {
            tracing::error!("blog posts proxy: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server configuration error" })),
            )
                .into_response()
        }
        Err(CmsError::Api { status, message }) => {
            tracing::error!(status, %message, "blog posts proxy: upstream error");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(json!({ "error": message }))).into_response()
        }
        Err(e @ CmsError::Network(_)) => {
            tracing::error!("blog posts proxy: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch blog posts" })),
            )
                .into_response()
        }
    }
}

/// Link cards for every post, or an explicit empty state.
pub fn render_post_list(posts: &[BlogPost], cms: &CmsConfig) -> String {
    if posts.is_empty() {
        return "<div class=\"empty-state\"><h3>No blog posts yet</h3>\
                <p>Check back soon for new content!</p></div>"
            .to_string();
    }

    let mut cards = String::new();
    for post in posts {
        let image_url = match post.images.first() {
            Some(image) => {
                // Prefer the small rendering for cards; fall back to the source.
                let url = image
                    .formats
                    .as_ref()
                    .and_then(|f| f.small.as_ref())
                    .map(|f| f.url.as_str())
                    .unwrap_or(&image.url);
                cms.media_url(url)
            }
            None => PLACEHOLDER_IMAGE.to_string(),
        };
        let alt = post
            .images
            .first()
            .and_then(|image| image.alternative_text.as_deref())
            .unwrap_or(&post.title);

        let mut meta = String::new();
        if let Some(date) = post.display_date() {
            meta.push_str(&format!("<span>{}</span>", encode_minimal(&date)));
        }
        if let Some(author) = &post.author {
            meta.push_str(&format!("<span>{}</span>", encode_minimal(author)));
        }

        let category = post
            .category
            .as_ref()
            .map(|c| format!("<span class=\"category-pill\">{}</span>", encode_minimal(&c.name)))
            .unwrap_or_default();

        cards.push_str(&format!(
            "<a class=\"post-card\" href=\"/blog/{slug}\"><article>\
             <img src=\"{src}\" alt=\"{alt}\" loading=\"lazy\">\
             <div class=\"post-card-body\"><h2>{title}</h2>\
             <div class=\"post-meta\">{meta}</div>{category}</div>\
             </article></a>",
            slug = encode_attr(&post.slug),
            src = encode_attr(&image_url),
            alt = encode_attr(alt),
            title = encode_minimal(&post.title),
        ));
    }

    format!("<div class=\"post-grid\">{cards}</div>")
}

/// Full post page body: header with metadata and hero image, rendered
/// markdown, category footer.
pub fn render_post_article(post: &BlogPost, cms: &CmsConfig) -> String {
    let mut header = format!("<h1>{}</h1>", encode_minimal(&post.title));

    let mut meta: Vec<String> = Vec::new();
    if let Some(date) = post.display_date() {
        meta.push(encode_minimal(&date));
    }
    if let Some(author) = &post.author {
        meta.push(encode_minimal(author));
    }
    if let Some(category) = &post.category {
        meta.push(encode_minimal(&category.name));
    }
    meta.push(format!("{} min read", reading_time_minutes(&post.content)));
    header.push_str(&format!(
        "<div class=\"post-meta\">{}</div>",
        meta.join(" &bull; ")
    ));

    if let Some(image) = post.images.first() {
        let alt = image.alternative_text.as_deref().unwrap_or(&post.title);
        header.push_str(&format!(
            "<div class=\"hero\"><img src=\"{}\" alt=\"{}\"></div>",
            encode_attr(&cms.media_url(&image.url)),
            encode_attr(alt),
        ));
    }

    let body = render_markdown_to_html(&post.content);

    let mut footer = String::new();
    if let Some(date) = post.display_date() {
        footer.push_str(&format!(
            "<span>Published on {}</span>",
            encode_minimal(&date)
        ));
    }
    if let Some(category) = &post.category {
        footer.push_str(&format!(
            "<span class=\"category-pill\">{}</span>",
            encode_minimal(&category.name)
        ));
    }

    format!(
        "<article class=\"post\"><header>{header}</header>\
         <div class=\"post-body\">{body}</div>\
         <footer class=\"post-footer\">{footer}</footer></article>"
    )
}

/// Server-rendered carousel shell: stacked frames with the active one
/// visible, controls, the enlarge modal, and a watermark over every frame.
/// The inline script replays the same state machine client-side.
pub fn render_carousel(watermark: &str) -> String {
    let carousel = Carousel::new(PORTFOLIO_IMAGES.len());
    let overlay = watermark_overlay(watermark);

    let mut frames = String::new();
    for (index, src) in PORTFOLIO_IMAGES.iter().enumerate() {
        let class = if index == carousel.index() {
            "carousel-frame active"
        } else {
            "carousel-frame"
        };
        frames.push_str(&format!(
            "<div class=\"{class}\"><img src=\"{src}\" \
             alt=\"Portfolio image {n}\" draggable=\"false\">{overlay}</div>",
            n = index + 1,
        ));
    }

    let first = PORTFOLIO_IMAGES.first().copied().unwrap_or(PLACEHOLDER_IMAGE);

    format!(
        "<section class=\"carousel\" id=\"carousel\" \
         data-rotate-ms=\"{rotate}\" data-transition-ms=\"{transition}\">\
         <div class=\"carousel-header\"><h3>Photography Portfolio</h3>\
         <div class=\"carousel-controls\">\
         <button class=\"carousel-btn\" id=\"carousel-prev\" aria-label=\"Previous image\">&larr;</button>\
         <button class=\"carousel-btn\" id=\"carousel-next\" aria-label=\"Next image\">&rarr;</button>\
         </div></div>\
         <div class=\"carousel-stage\" id=\"carousel-stage\">{frames}</div>\
         <div class=\"carousel-modal\" id=\"carousel-modal\" hidden>\
         <div class=\"carousel-modal-frame\" id=\"carousel-modal-frame\">\
         <img id=\"carousel-modal-image\" src=\"{first}\" alt=\"Enlarged portfolio image\" draggable=\"false\">\
         {overlay}\
         <button class=\"carousel-btn\" id=\"carousel-close\" aria-label=\"Close\">&times;</button>\
         </div></div></section>{script}",
        rotate = ROTATION_INTERVAL.as_millis(),
        transition = TRANSITION_DURATION.as_millis(),
        script = CAROUSEL_SCRIPT,
    )
}

// `encode_minimal` leaves quotes alone; attribute values need them escaped
// too, but full attribute encoding would entity-mangle URLs.
fn encode_attr(value: &str) -> String {
    encode_minimal(value).replace('"', "&quot;")
}

fn watermark_overlay(text: &str) -> String {
    format!(
        "<div class=\"watermark-overlay\" aria-hidden=\"true\"><span>{}</span></div>",
        encode_minimal(text)
    )
}
