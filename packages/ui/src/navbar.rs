use dioxus::prelude::*;

use crate::theme::ThemeToggle;

/// Top bar. The app passes its route links as children; the theme toggle sits at the end.
#[component]
pub fn Navbar(#[props(default = "Mi OpenLab".to_string())] brand: String, children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            span { class: "navbar-brand", "{brand}" }
            div {
                class: "navbar-links",
                {children}
            }
            ThemeToggle {}
        }
    }
}
