use crate::setup::Session;
use anyhow::Result;
use colored::Colorize;
use sectionnav_router::{Route, RouteCategory, RouteClassifier};
use std::collections::BTreeMap;
use std::sync::Arc;

pub fn execute(session: &Session) -> Result<()> {
    let registry = &session.registry;
    let classifier = registry.classifier();

    let mut children: BTreeMap<&str, Vec<&Arc<Route>>> = BTreeMap::new();
    for route in registry.routes() {
        if let Some(parent) = route.parent() {
            children.entry(parent.path()).or_default().push(route);
        }
    }

    println!("{}", "Route tree".green().bold());
    println!();
    for root in [registry.basic(), registry.about()] {
        print_tree(root, &children, &classifier);
    }
    println!();
    println!("{} routes", registry.len());

    Ok(())
}

fn print_tree(
    route: &Arc<Route>,
    children: &BTreeMap<&str, Vec<&Arc<Route>>>,
    classifier: &RouteClassifier,
) {
    let category = classifier.classify(Some(route.as_ref()));
    let mut line = format!(
        "{}{}  {}",
        "  ".repeat(route.depth()),
        route.path().cyan(),
        paint(category)
    );
    if !route.section().is_empty() {
        line.push_str(&format!("  section={}", route.section()));
    }
    if let Some(title) = route.title() {
        line.push_str(&format!("  title={}", title.dimmed()));
    }
    println!("{}", line);

    for child in children.get(route.path()).into_iter().flatten() {
        print_tree(child, children, classifier);
    }
}

pub fn paint(category: RouteCategory) -> colored::ColoredString {
    match category {
        RouteCategory::Initial => category.as_str().white(),
        RouteCategory::Dialog => category.as_str().magenta(),
        RouteCategory::Section => category.as_str().blue(),
        RouteCategory::Subpage => category.as_str().yellow(),
        RouteCategory::TopLevel => category.as_str().green(),
    }
}
