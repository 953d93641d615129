use crate::commands::routes::paint;
use crate::script::{self, Step};
use crate::setup::Session;
use anyhow::{Context, Result};
use colored::Colorize;
use sectionnav::{HeadlessPage, NavigationController, PageEvent, Router, ScrollContainer};
use std::path::Path;
use std::sync::Arc;

pub fn execute(session: &Session, script: &Path, start: &str, lazy: &[String], json: bool) -> Result<()> {
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let steps = script::parse(&content)?;
    let lazy = parse_lazy(lazy)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(replay(session, &steps, start, &lazy, json))
}

async fn replay(
    session: &Session,
    steps: &[Step],
    start: &str,
    lazy: &[(String, u32)],
    json: bool,
) -> Result<()> {
    let registry = &session.registry;
    let classifier = registry.classifier();
    let router = Router::new(Arc::clone(registry));
    router.initialize_from_url(start).await?;

    // Every section not declared lazy is rendered up front.
    let eager: Vec<String> = registry
        .routes()
        .map(|route| route.section().to_string())
        .filter(|section| !section.is_empty() && !lazy.iter().any(|(name, _)| name == section))
        .collect();
    let page = lazy.iter().fold(
        HeadlessPage::new(Arc::clone(registry.basic())).with_sections(eager),
        |page, (name, frames)| page.with_lazy_section(name.clone(), *frames),
    );
    let page = Arc::new(page);

    let controller = Arc::new(NavigationController::new(
        classifier.clone(),
        page.clone(),
        page.clone(),
        page.clone(),
        router.popstate_flag(),
        session.config.clone(),
    ));
    router.add_observer(controller).await?;
    report(&page, &format!("load {}", start), &router, &classifier, json).await?;

    let mut failures = 0usize;
    for step in steps {
        let (label, outcome) = match step {
            Step::Navigate(url) => (url.clone(), router.navigate_to_path(url).await),
            Step::Back => ("back".to_string(), router.navigate_to_previous_route().await),
            Step::Popstate(url) => (format!("popstate {}", url), router.handle_popstate(url).await),
            Step::Scroll(top) => {
                page.set_scroll_top(*top);
                continue;
            }
        };

        if let Err(err) = outcome {
            failures += 1;
            tracing::warn!(step = %label, %err, "navigation failed");
            if !json {
                println!("{} {}: {}", "✗".red().bold(), label, err.to_string().red());
            }
        }
        report(&page, &label, &router, &classifier, json).await?;
    }

    if !json {
        println!();
        if failures == 0 {
            println!("{}", "Replay finished".green().bold());
        } else {
            println!("{}", format!("Replay finished with {} failed step(s)", failures).yellow().bold());
        }
    }

    Ok(())
}

async fn report(
    page: &HeadlessPage,
    label: &str,
    router: &Router,
    classifier: &sectionnav_router::RouteClassifier,
    json: bool,
) -> Result<()> {
    let events = page.events().take();
    let current = router.current_route().await;
    let category = classifier.classify(Some(current.as_ref()));

    if json {
        for event in &events {
            println!("{}", event.to_json()?);
        }
        return Ok(());
    }

    println!(
        "{} {}  →  {} {}  scrollTop={}{}",
        "▶".cyan(),
        label.bold(),
        router.current_url().await,
        paint(category),
        page.scroll_top(),
        if router.last_route_change_was_popstate() { "  (popstate)" } else { "" }
    );
    for event in &events {
        match event {
            PageEvent::ShowingSection(section) => {
                println!("    {} {}", event.name().dimmed(), section.section());
            }
            _ => println!("    {}", event.name().dimmed()),
        }
    }

    Ok(())
}

fn parse_lazy(specs: &[String]) -> Result<Vec<(String, u32)>> {
    specs
        .iter()
        .map(|spec| -> Result<(String, u32)> {
            let (name, frames) = spec
                .split_once('=')
                .with_context(|| format!("--lazy expects name=frames, got `{}`", spec))?;
            let frames = frames
                .parse()
                .with_context(|| format!("invalid frame count in `{}`", spec))?;
            Ok((name.to_string(), frames))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lazy() {
        let parsed = parse_lazy(&["device=3".to_string()]).unwrap();
        assert_eq!(parsed, vec![("device".to_string(), 3)]);

        assert!(parse_lazy(&["device".to_string()]).is_err());
        assert!(parse_lazy(&["device=soon".to_string()]).is_err());
    }
}
