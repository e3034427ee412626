//! Template loading
//!
//! A component class maps to an html and a css resource. Both are fetched
//! concurrently, cached per class and never fetched again once cached.
//! Failed fetches are retried on the configured backoff.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use smol::Timer;
use smol::channel::{Receiver, Sender};
use smol::future::{self, BoxedLocal, FutureExt};
use weft_dom::{DomTree, NodeId};
use weft_net::ResourceLoader;

use crate::backoff::millis;
use crate::config::RetryPolicy;
use crate::error::{RuntimeError, TemplateFetchError};

/// Loaded html and css text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub html: String,
    pub css: String,
}

impl Template {
    pub fn new(html: &str, css: &str) -> Self {
        Self { html: html.to_string(), css: css.to_string() }
    }

    /// Markup placed in the shadow root: the css as a leading style block
    pub fn shadow_markup(&self) -> String {
        if self.css.is_empty() {
            self.html.clone()
        } else {
            format!("<style>{}</style>{}", self.css, self.html)
        }
    }
}

/// Where a class's html and css live. A missing path loads as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePaths {
    pub html: Option<String>,
    pub css: Option<String>,
}

impl TemplatePaths {
    pub fn new(html: Option<&str>, css: Option<&str>) -> Self {
        Self {
            html: html.map(str::to_string),
            css: css.map(str::to_string),
        }
    }

    /// `{source}.html` and `{source}.css`
    pub fn from_source(source: &str) -> Self {
        Self {
            html: Some(format!("{source}.html")),
            css: Some(format!("{source}.css")),
        }
    }

    /// Join both paths onto `root`
    pub fn under_root(&self, root: &str) -> Self {
        Self {
            html: self.html.as_deref().map(|p| join_root(root, p)),
            css: self.css.as_deref().map(|p| join_root(root, p)),
        }
    }
}

fn join_root(root: &str, path: &str) -> String {
    if root.is_empty() {
        return path.to_string();
    }
    weft_net::resolve_url(root, path)
        .unwrap_or_else(|_| format!("{}/{}", root.trim_end_matches('/'), path.trim_start_matches('/')))
}

/// Something that can produce template text for a URL
pub trait TemplateSource {
    fn fetch_text(&self, url: &str) -> BoxedLocal<Result<String, TemplateFetchError>>;
}

impl TemplateSource for ResourceLoader {
    fn fetch_text(&self, url: &str) -> BoxedLocal<Result<String, TemplateFetchError>> {
        let loader = self.clone();
        let url = url.to_string();
        async move {
            let response = loader.fetch(&url).await.map_err(|source| TemplateFetchError::Transport {
                url: url.clone(),
                source,
            })?;
            if !response.is_success() {
                return Err(TemplateFetchError::Status { url, status: response.status });
            }
            Ok(response.text())
        }
        .boxed_local()
    }
}

/// Templates held in memory, keyed by path. Unknown paths answer 404.
#[derive(Debug, Default)]
pub struct InMemorySource {
    entries: RefCell<HashMap<String, String>>,
    fetches: Cell<usize>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &str, text: &str) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&self, path: &str, text: &str) {
        self.entries.borrow_mut().insert(path.to_string(), text.to_string());
    }

    /// Number of fetches served or refused so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl TemplateSource for InMemorySource {
    fn fetch_text(&self, url: &str) -> BoxedLocal<Result<String, TemplateFetchError>> {
        self.fetches.set(self.fetches.get() + 1);
        let result = self.entries.borrow().get(url).cloned().ok_or_else(|| TemplateFetchError::Status {
            url: url.to_string(),
            status: 404,
        });
        future::ready(result).boxed_local()
    }
}

/// Fetch html and css concurrently
pub async fn fetch_template(source: &dyn TemplateSource, paths: &TemplatePaths) -> Result<Template, TemplateFetchError> {
    let fetch = |path: &Option<String>| match path {
        Some(url) => source.fetch_text(url),
        None => future::ready(Ok(String::new())).boxed_local(),
    };
    let (html, css) = future::try_zip(fetch(&paths.html), fetch(&paths.css)).await?;
    Ok(Template { html, css })
}

#[derive(Debug)]
struct CacheEntry {
    template: Template,
    /// Parsed shadow markup, detached in the document tree, cloned per instance
    fragment: Option<Vec<NodeId>>,
}

/// Per-class template cache
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: HashMap<String, CacheEntry>,
    in_flight: HashMap<String, Receiver<()>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, class: &str) -> Option<&Template> {
        self.entries.get(class).map(|e| &e.template)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.entries.contains_key(class)
    }

    pub fn insert(&mut self, class: &str, template: Template) {
        self.entries
            .entry(class.to_string())
            .or_insert(CacheEntry { template, fragment: None });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The parsed fragment for a class, parsing the cached markup on first use
    pub(crate) fn fragment(&mut self, class: &str, tree: &mut DomTree) -> Option<Vec<NodeId>> {
        let entry = self.entries.get_mut(class)?;
        let fragment = entry
            .fragment
            .get_or_insert_with(|| weft_html::parse_fragment(tree, &entry.template.shadow_markup()));
        Some(fragment.clone())
    }

    /// Claim the fetch for `class`. Returns a receiver to wait on when another
    /// loader already holds it.
    fn claim(&mut self, class: &str) -> Result<Sender<()>, Receiver<()>> {
        if let Some(rx) = self.in_flight.get(class) {
            return Err(rx.clone());
        }
        let (tx, rx) = smol::channel::bounded(1);
        self.in_flight.insert(class.to_string(), rx);
        Ok(tx)
    }

    fn release(&mut self, class: &str) {
        self.in_flight.remove(class);
    }
}

/// Inputs the loader needs from the runtime, captured without holding a borrow
pub(crate) struct LoadRequest {
    pub class: String,
    pub paths: TemplatePaths,
    pub source: Rc<dyn TemplateSource>,
    pub policy: RetryPolicy,
}

/// Load the template for a class through `cache`, retrying on failure.
///
/// Only one loader fetches a given class at a time; others wait for it and
/// then read the cache. `cache` is borrowed only between awaits.
/// `still_wanted` is asked around each retry delay; false abandons the load.
pub(crate) async fn load_template(
    cache: &RefCell<TemplateCache>,
    request: LoadRequest,
    still_wanted: impl Fn() -> bool,
) -> Result<Template, LoadFailure> {
    loop {
        if let Some(template) = cache.borrow().get(&request.class) {
            return Ok(template.clone());
        }

        let claim = cache.borrow_mut().claim(&request.class);
        match claim {
            Ok(guard) => {
                let result = fetch_with_retries(cache, &request, &still_wanted).await;
                cache.borrow_mut().release(&request.class);
                drop(guard);
                return result;
            }
            // Another loader holds the class; wake when it finishes either way.
            Err(waiter) => {
                let _ = waiter.recv().await;
            }
        }
    }
}

async fn fetch_with_retries(
    cache: &RefCell<TemplateCache>,
    request: &LoadRequest,
    still_wanted: &impl Fn() -> bool,
) -> Result<Template, LoadFailure> {
    let mut delays = request.policy.delays();
    let mut attempts = 0;

    loop {
        attempts += 1;
        tracing::info!(class = %request.class, attempt = attempts, "Fetching template");

        let err = match fetch_template(request.source.as_ref(), &request.paths).await {
            Ok(template) => {
                cache.borrow_mut().insert(&request.class, template.clone());
                return Ok(template);
            }
            Err(err) => err,
        };

        tracing::error!(class = %request.class, url = err.url(), "{}", err);
        let Some(delay) = delays.next() else {
            return Err(LoadFailure::Exhausted { attempts, source: err });
        };
        if !still_wanted() {
            return Err(LoadFailure::Cancelled);
        }
        tracing::debug!(class = %request.class, "Retrying template in {}ms", millis(delay));
        Timer::after(delay).await;
        if !still_wanted() {
            return Err(LoadFailure::Cancelled);
        }
    }
}

/// Why a template load gave up
#[derive(Debug)]
pub(crate) enum LoadFailure {
    Exhausted { attempts: u32, source: TemplateFetchError },
    Cancelled,
}

impl LoadFailure {
    pub(crate) fn into_runtime_error(self, tag: &str, host: NodeId) -> RuntimeError {
        match self {
            LoadFailure::Exhausted { attempts, source } => RuntimeError::TemplateFetch {
                tag: tag.to_string(),
                attempts,
                source,
            },
            LoadFailure::Cancelled => RuntimeError::Cancelled(host),
        }
    }
}
