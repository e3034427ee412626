//! Templates compiled into the crate

use weft_runtime::InMemorySource;

macro_rules! bundled {
    ($($path:literal),* $(,)?) => {
        &[$((concat!("components/", $path), include_str!(concat!("../templates/", $path)))),*]
    };
}

const BUNDLED: &[(&str, &str)] = bundled![
    "app-bar/title/title.html",
    "app-bar/title/title.css",
    "dropdown-menu/dropdown-menu.html",
    "dropdown-menu/dropdown-menu.css",
    "icon-button/icon-button.html",
    "icon-button/icon-button.css",
    "menu-item/menu-item.html",
    "menu-item/menu-item.css",
    "search-bar/search-bar.html",
    "search-bar/search-bar.css",
];

/// A template source serving every stock component's html and css
pub fn bundled_templates() -> InMemorySource {
    let source = InMemorySource::new();
    for (path, text) in BUNDLED {
        source.insert(path, text);
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_component_has_html_and_css() {
        for tag in ["dropdown-menu", "icon-button", "menu-item", "search-bar"] {
            for ext in ["html", "css"] {
                let path = format!("components/{tag}/{tag}.{ext}");
                assert!(BUNDLED.iter().any(|(p, _)| *p == path), "missing {path}");
            }
        }
    }
}
