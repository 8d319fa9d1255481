use dioxus::prelude::*;
use store::filter::{CATEGORY_OPTIONS, TAG_OPTIONS, TECHNOLOGY_OPTIONS};
use store::ProjectFilters;

use crate::components::Input;
use crate::icons::FaMagnifyingGlass;
use crate::Icon;

#[component]
pub fn SearchBar(filters: Signal<ProjectFilters>) -> Element {
    let mut filters = filters;
    rsx! {
        div {
            class: "search-bar",
            Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
            Input {
                r#type: "search",
                placeholder: "Buscar por título, descripción o autor",
                value: filters.read().search.clone(),
                oninput: move |evt: FormEvent| filters.write().search = evt.value(),
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Facet {
    Category,
    Technology,
    Tag,
}

impl Facet {
    fn options(self) -> &'static [&'static str] {
        match self {
            Self::Category => CATEGORY_OPTIONS,
            Self::Technology => TECHNOLOGY_OPTIONS,
            Self::Tag => TAG_OPTIONS,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Category => "Categorías",
            Self::Technology => "Tecnologías",
            Self::Tag => "Etiquetas",
        }
    }

    fn selected(self, filters: &ProjectFilters) -> Option<&str> {
        match self {
            Self::Category => filters.category.as_deref(),
            Self::Technology => filters.technology.as_deref(),
            Self::Tag => filters.tag.as_deref(),
        }
    }

    fn toggle(self, filters: &mut ProjectFilters, value: &str) {
        match self {
            Self::Category => filters.toggle_category(value),
            Self::Technology => filters.toggle_technology(value),
            Self::Tag => filters.toggle_tag(value),
        }
    }
}

/// Category, technology and tag pickers. Clicking the selected value clears it.
#[component]
pub fn Filters(filters: Signal<ProjectFilters>) -> Element {
    rsx! {
        div {
            class: "filters",
            for facet in [Facet::Category, Facet::Technology, Facet::Tag] {
                FacetRow { facet, filters }
            }
        }
    }
}

#[component]
fn FacetRow(facet: Facet, filters: Signal<ProjectFilters>) -> Element {
    let mut filters = filters;
    let selected = facet.selected(&filters.read()).map(str::to_string);

    rsx! {
        div {
            class: "filter-row",
            span { class: "filter-title", "{facet.title()}" }
            for option in facet.options() {
                button {
                    key: "{option}",
                    class: if selected.as_deref() == Some(*option) { "chip chip-selected" } else { "chip" },
                    onclick: move |_| facet.toggle(&mut filters.write(), option),
                    "{option}"
                }
            }
        }
    }
}
