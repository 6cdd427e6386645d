mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod parser;
mod site;

pub use block::{Block, BlockKind, Span, SpanKind};
pub use config::{Config, SiteConfig, TemplateConfig};
pub use error::{Error, Result};
pub use html::{compose, convert, span_to_node};
pub use inline::tokenize;
pub use node::{Attributes, ContainerNode, MarkupNode, ValueNode};
pub use parser::{classify, extract_title};
pub use site::{clear_dir, copy_dir, generate_page, generate_pages, render_page};

/// Split markdown text into classified blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    convert(markdown)?.to_html()
}

/// Rebuild the whole site described by `config`: clear the output
/// directory, copy static assets into it, then generate every page.
pub fn build_site(config: &Config) -> Result<usize> {
    let site = &config.site;
    clear_dir(&site.output_dir)?;
    copy_dir(&site.static_dir, &site.output_dir)?;
    generate_pages(&site.template, &site.content_dir, &site.output_dir, config)
}
