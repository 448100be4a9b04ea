//! `docset resolve`: show what the link pass would do to each href.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::DocsetConfig;
use crate::link::{DirProbe, LinkTransformer};

/// With `pure`, paths are classified by their text alone.
pub fn resolve_hrefs(config: &DocsetConfig, hrefs: &[String], pure: bool) -> Result<()> {
    let lines = if pure {
        render(&config.pure_link_transformer(), hrefs)
    } else {
        render(&config.link_transformer(), hrefs)
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// One line per href, `href -> result` (or the error).
fn render<P: DirProbe>(transformer: &LinkTransformer<P>, hrefs: &[String]) -> Vec<String> {
    hrefs
        .iter()
        .map(|href| match transformer.transform(href) {
            Ok(out) if out == *href => format!("{href} {}", "(unchanged)".dimmed()),
            Ok(out) => format!("{href} {} {out}", "->".green()),
            Err(err) => format!("{href} {} {err}", "error:".red()),
        })
        .collect()
}
