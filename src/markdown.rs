use pulldown_cmark::{html, Event, Options, Parser};

const WORDS_PER_MINUTE: u64 = 200;

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options
}

/// Renders CMS markdown to HTML. Raw HTML embedded in the source is
/// downgraded to text events so the writer escapes it; post bodies are
/// author-supplied but still pass through an untrusted HTTP boundary.
pub fn render_markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options()).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut html_out = String::new();
    html::push_html(&mut html_out, parser);
    html_out
}

/// Estimated minutes to read `content`, at 200 words per minute, rounded up.
/// Empty content reads in zero minutes.
pub fn reading_time_minutes(content: &str) -> u64 {
    let words = content.split_whitespace().count() as u64;
    words.div_ceil(WORDS_PER_MINUTE)
}
