//! Lifecycle tests for weft-runtime
//!
//! Pages are parsed, mounted and driven to completion on the local
//! executor. Retry delays are shortened to a millisecond.

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use smol::future::{self, BoxedLocal, FutureExt};
use weft_dom::NodeId;
use weft_runtime::*;

// ============================================================================
// FIXTURES
// ============================================================================

#[derive(Default)]
struct Plain;
impl Component for Plain {}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        initial_delay_ms: 1.0,
        multiplier: 1.5,
        max_attempts: Some(3),
    }
}

fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        template_retry: fast_policy(),
        controller_retry: fast_policy(),
        ..RuntimeConfig::default()
    }
}

/// In-memory templates for `(tag, html, css)` under the default paths
fn templates(entries: &[(&str, &str, &str)]) -> InMemorySource {
    let source = InMemorySource::new();
    for (tag, html, css) in entries {
        source.insert(&format!("components/{tag}/{tag}.html"), html);
        source.insert(&format!("components/{tag}/{tag}.css"), css);
    }
    source
}

fn plain_components(tags: &[&str]) -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    for tag in tags {
        registry.define(ComponentClass::of::<Plain>(tag)).unwrap();
    }
    registry
}

fn controllers(classes: Vec<ControllerClass>) -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    for class in classes {
        registry.define(class).unwrap();
    }
    registry
}

fn start(
    page: &str,
    components: ComponentRegistry,
    controllers: ControllerRegistry,
    source: Rc<dyn TemplateSource>,
    config: RuntimeConfig,
) -> RuntimeHandle {
    let document = weft_html::parse(page);
    let runtime = Runtime::new(document, components, controllers, source).with_config(config);
    let handle = RuntimeHandle::new(runtime);
    handle.mount();
    handle
}

fn find(handle: &RuntimeHandle, selector: &str) -> NodeId {
    let rt = handle.runtime();
    rt.tree().query_selector(rt.tree().root(), selector).unwrap()
}

fn shadow_html(handle: &RuntimeHandle, host: NodeId) -> String {
    let rt = handle.runtime();
    let shadow = rt.instance(host).and_then(Instance::shadow_root).unwrap();
    weft_html::get_inner_html(rt.tree(), shadow)
}

/// Log lines written while a test body runs
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_logs<T>(body: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, body);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}

/// Fails the first `failures` fetches, then serves `html` for everything
struct Flaky {
    failures: usize,
    html: &'static str,
    calls: Cell<usize>,
}

impl TemplateSource for Flaky {
    fn fetch_text(&self, url: &str) -> BoxedLocal<Result<String, TemplateFetchError>> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        let result = if call < self.failures {
            Err(TemplateFetchError::Status { url: url.to_string(), status: 503 })
        } else if url.ends_with(".css") {
            Ok(String::new())
        } else {
            Ok(self.html.to_string())
        };
        future::ready(result).boxed_local()
    }
}

// ============================================================================
// TEMPLATE LOADING TESTS
// ============================================================================

#[test]
fn test_css_becomes_leading_style_block() {
    let source = Rc::new(templates(&[("x-card", "<p>hello</p>", "p { color: red; }")]));
    let handle = start(
        "<html><body><x-card></x-card></body></html>",
        plain_components(&["x-card"]),
        ControllerRegistry::new(),
        source,
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let host = find(&handle, "x-card");
    assert_eq!(shadow_html(&handle, host), "<style>p { color: red; }</style><p>hello</p>");
    assert_eq!(handle.runtime().load_state(host), Some(LoadState::Ready));
}

#[test]
fn test_template_fetched_once_per_class() {
    let source = Rc::new(templates(&[("x-card", "<p>hello</p>", "")]));
    let handle = start(
        "<body><x-card></x-card><x-card></x-card><x-card></x-card></body>",
        plain_components(&["x-card"]),
        ControllerRegistry::new(),
        source.clone(),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    assert_eq!(source.fetch_count(), 2);
    assert_eq!(handle.runtime().template_cache().len(), 1);
    let rt = handle.runtime();
    let hosts = rt.tree().query_selector_all(rt.tree().root(), "x-card");
    assert_eq!(hosts.len(), 3);
    assert!(hosts.iter().all(|&h| rt.load_state(h) == Some(LoadState::Ready)));
}

#[test]
fn test_failed_fetch_is_retried() {
    let source = Rc::new(Flaky { failures: 2, html: "<i>ok</i>", calls: Cell::new(0) });
    let handle = start(
        "<body><x-card></x-card></body>",
        plain_components(&["x-card"]),
        ControllerRegistry::new(),
        source.clone(),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    assert_eq!(source.calls.get(), 4);
    let host = find(&handle, "x-card");
    assert_eq!(shadow_html(&handle, host), "<i>ok</i>");
}

#[test]
fn test_retry_ceiling_surfaces_error() {
    let source = Rc::new(InMemorySource::new());
    let handle = start(
        "<body><x-card></x-card></body>",
        plain_components(&["x-card"]),
        ControllerRegistry::new(),
        source.clone(),
        fast_config(),
    );
    let failures = handle.run_until_settled();

    assert_eq!(failures.len(), 1);
    assert!(matches!(&failures[0].1, RuntimeError::TemplateFetch { attempts: 3, tag, .. } if tag == "x-card"));
    assert_eq!(source.fetch_count(), 6);

    let host = find(&handle, "x-card");
    assert_eq!(handle.runtime().load_state(host), Some(LoadState::TemplateLoading));
}

#[test]
fn test_cancel_on_disconnect() {
    let config = RuntimeConfig { cancel_on_disconnect: true, ..fast_config() };
    let handle = start(
        "<body><x-card></x-card></body>",
        plain_components(&["x-card"]),
        ControllerRegistry::new(),
        Rc::new(InMemorySource::new()),
        config,
    );
    let host = find(&handle, "x-card");
    let body = handle.runtime().document().body();
    handle.remove_child(body, host).unwrap();

    let failures = handle.run_until_settled();
    assert!(matches!(failures.as_slice(), [(h, RuntimeError::Cancelled(_))] if *h == host));
}

#[test]
fn test_upgrade_twice_is_an_error() {
    let handle = start(
        "<body><x-card></x-card></body>",
        plain_components(&["x-card"]),
        ControllerRegistry::new(),
        Rc::new(templates(&[("x-card", "<p></p>", "")])),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let host = find(&handle, "x-card");
    let err = handle.runtime_mut().upgrade(host, &Template::new("<p></p>", "")).unwrap_err();
    assert!(matches!(err, RuntimeError::AlreadyUpgraded(h) if h == host));
}

// ============================================================================
// BINDING TESTS
// ============================================================================

fn toolbar() -> ControllerClass {
    ControllerClass::new("Toolbar", || {
        Controller::new("Toolbar")
            .with_property("locked", true)
            .with_property("count", 0)
            .with_method("bump", |proxy, _event| {
                let next = proxy.get("count").and_then(|v| v.as_number()).unwrap_or(0.0) + 1.0;
                proxy.set("count", next);
            })
    })
}

#[test]
fn test_property_binding_follows_writes() {
    let handle = start(
        r#"<body><div id="bar" [controller]="Toolbar"><x-button title="keep" [disabled]="locked"></x-button></div></body>"#,
        plain_components(&["x-button"]),
        controllers(vec![toolbar()]),
        Rc::new(templates(&[("x-button", "<button></button>", "")])),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let bar = find(&handle, "#bar");
    let button = find(&handle, "x-button");
    assert_eq!(handle.runtime().tree().attribute(button, "disabled"), Some("true"));

    assert!(handle.write_property(bar, "locked", "no"));
    let rt = handle.runtime();
    assert_eq!(rt.tree().attribute(button, "disabled"), Some("no"));
    assert_eq!(rt.tree().attribute(button, "title"), Some("keep"));
}

#[test]
fn test_event_binding_writes_through_proxy() {
    let handle = start(
        r#"<body><div id="bar" [controller]="Toolbar"><x-button (click)="bump" [data-count]="count"></x-button></div></body>"#,
        plain_components(&["x-button"]),
        controllers(vec![toolbar()]),
        Rc::new(templates(&[("x-button", "<button></button>", "")])),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let bar = find(&handle, "#bar");
    let button = find(&handle, "x-button");
    assert_eq!(handle.runtime().listener_count(button, "click"), 1);

    handle.dispatch(Event::bubbling("click", button));
    handle.dispatch(Event::bubbling("click", button));

    let rt = handle.runtime();
    assert_eq!(rt.controller(bar).and_then(|c| c.get("count")), Some(&Value::Number(2.0)));
    assert_eq!(rt.tree().attribute(button, "data-count"), Some("2"));
}

#[test]
fn test_missing_method_attaches_nothing() {
    let (handle, logs) = with_logs(|| {
        let handle = start(
            r#"<body><div [controller]="Toolbar"><x-button (click)="handleClick"></x-button></div></body>"#,
            plain_components(&["x-button"]),
            controllers(vec![toolbar()]),
            Rc::new(templates(&[("x-button", "<button></button>", "")])),
            fast_config(),
        );
        assert!(handle.run_until_settled().is_empty());
        handle
    });
    assert!(logs.contains("Property with name 'handleClick' not found in 'Toolbar' controller!"), "{logs}");

    let button = find(&handle, "x-button");
    assert_eq!(handle.runtime().listener_count(button, "click"), 0);
    let event = handle.dispatch(Event::bubbling("click", button));
    assert!(!event.default_prevented());
}

/// Writes the property it was just handed back to its controller
#[derive(Default)]
struct Echo;

impl Component for Echo {
    fn on_attribute_changed(&mut self, cx: &mut ComponentContext<'_>, name: &str, _old: Option<&str>, new: &str) {
        let host = cx.host();
        let owner = cx.runtime().scope_of(host).nearest();
        if let (Some(owner), "state") = (owner, name) {
            cx.runtime().write_property(owner, "state", format!("{new}!"));
        }
    }
}

#[test]
fn test_reentrant_write_syncs_after_outer_pass() {
    let mut components = ComponentRegistry::new();
    components.define(ComponentClass::of::<Echo>("x-echo")).unwrap();
    let handle = start(
        r#"<body><div id="bar" [controller]="Toolbar"><x-echo [state]="state"></x-echo></div></body>"#,
        components,
        controllers(vec![toolbar()]),
        Rc::new(templates(&[("x-echo", "<b></b>", "")])),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let bar = find(&handle, "#bar");
    let echo = find(&handle, "x-echo");
    assert!(handle.write_property(bar, "state", "a"));

    let rt = handle.runtime();
    assert_eq!(rt.controller(bar).and_then(|c| c.get("state")), Some(&Value::from("a!")));
    assert_eq!(rt.tree().attribute(echo, "state"), Some("a!"));
}

// ============================================================================
// INTERPOLATION TESTS
// ============================================================================

fn greeter(name: &'static str, props: &'static [(&'static str, &'static str)]) -> ControllerClass {
    ControllerClass::new(name, move || {
        props
            .iter()
            .fold(Controller::new(name), |c, (k, v)| c.with_property(k, *v))
    })
}

fn greeting_components() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    let class = ComponentClass::of::<Plain>("x-greeting").with_paths(TemplatePaths::new(Some("greeting.html"), None));
    registry.define(class).unwrap();
    registry
}

fn greeting_source(html: &str) -> Rc<InMemorySource> {
    Rc::new(InMemorySource::new().with("greeting.html", html))
}

#[test]
fn test_placeholder_filled_from_controller() {
    let handle = start(
        r#"<body><div [controller]="Greeter"><x-greeting></x-greeting></div></body>"#,
        greeting_components(),
        controllers(vec![greeter("Greeter", &[("greeting", "Hi")])]),
        greeting_source("<p>{{greeting}}</p>"),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let host = find(&handle, "x-greeting");
    assert_eq!(shadow_html(&handle, host), "<p>Hi</p>");
}

#[test]
fn test_unresolved_placeholder_renders_undefined() {
    let (handle, logs) = with_logs(|| {
        let handle = start(
            r#"<body><div [controller]="A"><div [controller]="B"><x-greeting></x-greeting></div></div></body>"#,
            greeting_components(),
            controllers(vec![greeter("A", &[]), greeter("B", &[])]),
            greeting_source("<p>{{greeting}}</p>"),
            fast_config(),
        );
        assert!(handle.run_until_settled().is_empty());
        handle
    });

    let host = find(&handle, "x-greeting");
    assert_eq!(shadow_html(&handle, host), "<p>undefined</p>");
    assert!(logs.contains("Interpolation property 'greeting' not found"), "{logs}");
    assert!(logs.contains(r#"checked=["B", "A"]"#), "{logs}");
}

#[test]
fn test_whitespace_survives_rendering() {
    let handle = start(
        r#"<body><div [controller]="Greeter"><x-greeting></x-greeting></div></body>"#,
        greeting_components(),
        controllers(vec![greeter("Greeter", &[("label", "Hi")])]),
        greeting_source("<p><b>Hello</b> <i>world</i></p><p>{{label}}<b>a</b> <i>b</i></p>"),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let host = find(&handle, "x-greeting");
    assert_eq!(
        shadow_html(&handle, host),
        "<p><b>Hello</b> <i>world</i></p><p>Hi<b>a</b> <i>b</i></p>"
    );
}

#[test]
fn test_blank_value_is_rendered() {
    let handle = start(
        r#"<body><div id="c" [controller]="Greeter"><x-greeting></x-greeting></div></body>"#,
        greeting_components(),
        controllers(vec![greeter("Greeter", &[("label", " ")])]),
        greeting_source("<p>{{label}}</p>"),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let host = find(&handle, "x-greeting");
    assert_eq!(shadow_html(&handle, host), "<p> </p>");
}

#[test]
fn test_nearest_controller_wins() {
    let handle = start(
        r#"<body><div [controller]="A"><div [controller]="B"><x-greeting></x-greeting></div></div></body>"#,
        greeting_components(),
        controllers(vec![
            greeter("A", &[("greeting", "from A"), ("title", "Outer")]),
            greeter("B", &[("greeting", "from B")]),
        ]),
        greeting_source("<p>{{greeting}}</p><span>{{title}}</span>"),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let host = find(&handle, "x-greeting");
    assert_eq!(shadow_html(&handle, host), "<p>from B</p><span>Outer</span>");
}

#[test]
fn test_nearer_controller_gaining_property_takes_over() {
    let handle = start(
        r#"<body><div [controller]="A"><div id="b" [controller]="B"><x-greeting></x-greeting></div></div></body>"#,
        greeting_components(),
        controllers(vec![greeter("A", &[("greeting", "fromA")]), greeter("B", &[])]),
        greeting_source("<p>{{greeting}}</p>"),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let host = find(&handle, "x-greeting");
    assert_eq!(shadow_html(&handle, host), "<p>fromA</p>");

    let b = find(&handle, "#b");
    handle.write_property(b, "greeting", "fromB");
    assert_eq!(shadow_html(&handle, host), "<p>fromB</p>");
}

#[test]
fn test_deepest_match_targets() {
    let handle = start(
        r#"<body><div id="c" [controller]="Pair"><x-greeting></x-greeting></div></body>"#,
        greeting_components(),
        controllers(vec![greeter("Pair", &[("a", "1"), ("b", "2")])]),
        greeting_source("<div>{{a}}<span>{{b}}</span></div>"),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let host = find(&handle, "x-greeting");
    let rt = handle.runtime();
    let targets = rt.find_targets(host);
    assert_eq!(targets.len(), 2);
    assert!(targets.iter().any(|&t| rt.tree().tag_name(t) == Some("span")));
    assert!(targets.iter().any(|&t| rt.golden(t) == Some("{{a}}")));
    drop(rt);

    assert_eq!(shadow_html(&handle, host), "<div>1<span>2</span></div>");
}

#[test]
fn test_rerender_leaves_no_residue() {
    let handle = start(
        r#"<body><div id="c" [controller]="Greeter"><x-greeting></x-greeting></div></body>"#,
        greeting_components(),
        controllers(vec![greeter("Greeter", &[("greeting", "Hi")])]),
        greeting_source("<p>{{greeting}} there</p>"),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let owner = find(&handle, "#c");
    let host = find(&handle, "x-greeting");
    handle.write_property(owner, "greeting", "Hey");
    handle.write_property(owner, "greeting", "<Yo>");

    assert_eq!(shadow_html(&handle, host), "<p>&lt;Yo&gt; there</p>");
    let rt = handle.runtime();
    let p = rt.tree().query_selector(rt.instance(host).and_then(Instance::shadow_root).unwrap(), "p").unwrap();
    assert_eq!(rt.golden(p), Some("{{greeting}} there"));
}

#[test]
fn test_controller_attached_later_is_waited_for() {
    let slow = RetryPolicy { initial_delay_ms: 1.0, multiplier: 1.5, max_attempts: None };
    let config = RuntimeConfig { controller_retry: slow, ..fast_config() };
    let handle = start(
        r#"<body><div id="late" [controller]="Late"><x-greeting></x-greeting></div></body>"#,
        greeting_components(),
        ControllerRegistry::new(),
        greeting_source("<p>{{greeting}}</p>"),
        config,
    );
    let late = find(&handle, "#late");
    let host = find(&handle, "x-greeting");

    let failures = handle.block_on(async {
        smol::Timer::after(Duration::from_millis(5)).await;
        assert_eq!(handle.runtime().load_state(host), Some(LoadState::ControllerResolving));
        handle
            .runtime_mut()
            .attach_controller(late, Controller::new("Late").with_property("greeting", "Hi"))
            .unwrap();
        handle.settle().await
    });

    assert!(failures.is_empty());
    assert_eq!(shadow_html(&handle, host), "<p>Hi</p>");
}

// ============================================================================
// CONNECTION TESTS
// ============================================================================

#[test]
fn test_reconnected_component_stays_bound() {
    let handle = start(
        r#"<body><div id="c" [controller]="Greeter"><x-greeting></x-greeting></div></body>"#,
        greeting_components(),
        controllers(vec![greeter("Greeter", &[("greeting", "Hi")])]),
        greeting_source("<p>{{greeting}}</p>"),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let owner = find(&handle, "#c");
    let host = find(&handle, "x-greeting");
    handle.remove_child(owner, host).unwrap();
    handle.append_child(owner, host).unwrap();
    assert!(handle.run_until_settled().is_empty());

    handle.write_property(owner, "greeting", "Back");
    assert_eq!(shadow_html(&handle, host), "<p>Back</p>");
    assert_eq!(handle.runtime().load_state(host), Some(LoadState::Ready));
}

struct Watcher {
    slot_changes: Rc<Cell<usize>>,
    loads: Rc<Cell<usize>>,
    disconnected: Rc<Cell<bool>>,
}

impl Component for Watcher {
    fn on_load(&mut self, _cx: &mut ComponentContext<'_>) {
        self.loads.set(self.loads.get() + 1);
    }

    fn on_disconnected(&mut self, _cx: &mut ComponentContext<'_>) {
        self.disconnected.set(true);
    }

    fn observes_slot_changes(&self) -> bool {
        true
    }

    fn on_slot_change(&mut self, _cx: &mut ComponentContext<'_>, _event: &Event) {
        self.slot_changes.set(self.slot_changes.get() + 1);
    }
}

#[test]
fn test_slot_change_and_disconnect() {
    let slot_changes = Rc::new(Cell::new(0));
    let loads = Rc::new(Cell::new(0));
    let disconnected = Rc::new(Cell::new(false));

    let mut components = ComponentRegistry::new();
    let (s, l, d) = (slot_changes.clone(), loads.clone(), disconnected.clone());
    components
        .define(ComponentClass::new("x-watch", move || {
            Box::new(Watcher { slot_changes: s.clone(), loads: l.clone(), disconnected: d.clone() })
        }))
        .unwrap();

    let handle = start(
        r#"<body><div id="bar" [controller]="Toolbar"><x-watch (click)="bump"></x-watch></div></body>"#,
        components,
        controllers(vec![toolbar()]),
        Rc::new(templates(&[("x-watch", "<slot></slot>", "")])),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());
    assert_eq!(loads.get(), 1);

    let host = find(&handle, "x-watch");
    let span = handle.runtime_mut().tree_mut().create_element("span");
    handle.append_child(host, span).unwrap();
    assert_eq!(slot_changes.get(), 1);

    assert_eq!(handle.runtime().listener_count(host, "click"), 1);
    let bar = find(&handle, "#bar");
    let body = handle.runtime().document().body();
    handle.remove_child(body, bar).unwrap();

    let rt = handle.runtime();
    assert!(disconnected.get());
    assert_eq!(rt.listener_count(host, "click"), 0);
    assert!(rt.ledger(host).unwrap().is_empty());
    assert_eq!(loads.get(), 1);
}

#[test]
fn test_slot_inside_interpolated_element_keeps_listener() {
    let slot_changes = Rc::new(Cell::new(0));
    let mut components = ComponentRegistry::new();
    let s = slot_changes.clone();
    components
        .define(ComponentClass::new("x-watch", move || {
            Box::new(Watcher { slot_changes: s.clone(), loads: Rc::default(), disconnected: Rc::default() })
        }))
        .unwrap();

    let handle = start(
        r#"<body><div id="c" [controller]="Greeter"><x-watch></x-watch></div></body>"#,
        components,
        controllers(vec![greeter("Greeter", &[("label", "Hi")])]),
        Rc::new(templates(&[("x-watch", "<div>{{label}}<slot></slot></div>", "")])),
        fast_config(),
    );
    assert!(handle.run_until_settled().is_empty());

    let owner = find(&handle, "#c");
    let host = find(&handle, "x-watch");
    assert_eq!(shadow_html(&handle, host), "<div>Hi<slot></slot></div>");

    let span = handle.runtime_mut().tree_mut().create_element("span");
    handle.append_child(host, span).unwrap();
    assert_eq!(slot_changes.get(), 1);

    handle.write_property(owner, "label", "Yo");
    assert_eq!(shadow_html(&handle, host), "<div>Yo<slot></slot></div>");

    let em = handle.runtime_mut().tree_mut().create_element("em");
    handle.append_child(host, em).unwrap();
    assert_eq!(slot_changes.get(), 2);

    let rt = handle.runtime();
    let slot = rt.tree().slots(rt.instance(host).and_then(Instance::shadow_root).unwrap())[0];
    assert_eq!(rt.listener_count(slot, "slotchange"), 1);
}
