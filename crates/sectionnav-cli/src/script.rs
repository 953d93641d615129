//! Navigation script parsing
//!
//! ```text
//! # comments and blank lines are ignored
//! /device
//! /device/storage?search=disk
//! scroll 300
//! back
//! popstate /device
//! ```

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Forward navigation to a URL
    Navigate(String),
    /// Router back navigation
    Back,
    /// Browser back/forward to a URL
    Popstate(String),
    /// Set the container's scroll offset
    Scroll(u32),
}

pub fn parse(content: &str) -> Result<Vec<Step>> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            (!line.is_empty() && !line.starts_with('#')).then_some((index + 1, line))
        })
        .map(|(number, line)| parse_line(line).with_context(|| format!("line {}: {}", number, line)))
        .collect()
}

fn parse_line(line: &str) -> Result<Step> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "back" if rest.is_empty() => Ok(Step::Back),
        "back" => bail!("`back` takes no argument"),
        "popstate" if rest.starts_with('/') => Ok(Step::Popstate(rest.to_string())),
        "popstate" => bail!("`popstate` needs a URL starting with /"),
        "scroll" => {
            let top = rest.parse().context("`scroll` needs a pixel offset")?;
            Ok(Step::Scroll(top))
        }
        url if url.starts_with('/') && rest.is_empty() => Ok(Step::Navigate(url.to_string())),
        other => bail!("unknown step `{}`", other),
    }
}
