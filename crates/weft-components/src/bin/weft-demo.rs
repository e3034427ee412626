//! weft demo
//!
//! Mounts a page of stock components, prints the rendered tree and then
//! clicks the first menu item.
//!
//! Usage: `weft-demo [page.html] [config.toml]`

use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use weft_components::{bundled_templates, menu_item, register_all};
use weft_dom::{DomTree, NodeId};
use weft_net::ResourceLoader;
use weft_runtime::{
    ComponentRegistry, ControllerRegistry, Event, Runtime, RuntimeConfig, RuntimeHandle, TemplateSource,
};

const DEMO_PAGE: &str = include_str!("../../demos/app.html");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let page = match args.next() {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading page {path}"))?,
        None => DEMO_PAGE.to_string(),
    };
    let config = match args.next() {
        Some(path) => RuntimeConfig::load(Path::new(&path))?,
        None => RuntimeConfig::default(),
    };

    // Without a template root the bundled templates are served from memory.
    let source: Rc<dyn TemplateSource> = if config.template_root.is_empty() {
        Rc::new(bundled_templates())
    } else {
        Rc::new(ResourceLoader::new()?)
    };

    let mut components = ComponentRegistry::new();
    let mut controllers = ControllerRegistry::new();
    register_all(&mut components, &mut controllers)?;

    let document = weft_html::parse(&page);
    let runtime = Runtime::new(document, components, controllers, source).with_config(config);
    let handle = RuntimeHandle::new(runtime);

    let started = handle.mount();
    tracing::info!("Started {} component lifecycles", started);
    for (host, err) in handle.run_until_settled() {
        tracing::error!(%host, "{}", err);
    }

    print_page(&handle, "Mounted");

    let item = {
        let rt = handle.runtime();
        let tree = rt.tree();
        tree.query_selector_all(tree.root(), menu_item::TAG)
            .into_iter()
            .find(|&item| tree.attributes(item).iter().any(|a| a.name == "(click)"))
    };
    match item {
        Some(item) => {
            let label = handle.runtime().tree().text_content(item);
            tracing::info!("Clicking menu item '{}'", label.trim());
            handle.dispatch(Event::bubbling("click", item));
            print_page(&handle, "After click");
        }
        None => tracing::info!("No clickable menu item on the page"),
    }
    Ok(())
}

fn print_page(handle: &RuntimeHandle, heading: &str) {
    let rt = handle.runtime();
    let tree = rt.tree();
    println!("==== {heading} ====");
    println!("{}", weft_html::get_outer_html(tree, rt.document().body()));
    print_shadows(tree, tree.root(), 0);
}

/// Every shadow root under `node`, indented by nesting depth
fn print_shadows(tree: &DomTree, node: NodeId, depth: usize) {
    for child in tree.descendants(node) {
        if let Some(shadow) = tree.shadow_root(child) {
            let indent = "  ".repeat(depth);
            let tag = tree.tag_name(child).unwrap_or("?");
            println!("{indent}<{tag}> #shadow-root");
            for line in weft_html::get_inner_html(tree, shadow).lines().filter(|l| !l.trim().is_empty()) {
                println!("{indent}  {}", line.trim());
            }
            print_shadows(tree, shadow, depth + 1);
        }
    }
}
