use dioxus::prelude::*;

use crate::components::Input;

/// Add `raw` as a chip. Blank and duplicate values are ignored.
pub fn add_chip(chips: &mut Vec<String>, raw: &str) -> bool {
    let value = raw.trim().trim_end_matches(',').trim();
    if value.is_empty() || chips.iter().any(|c| c == value) {
        return false;
    }
    chips.push(value.to_string());
    true
}

/// Free-form tag entry. Enter or a comma commits the typed value.
#[component]
pub fn ChipsInput(
    #[props(default)] id: String,
    #[props(default)] placeholder: String,
    values: Vec<String>,
    onchange: EventHandler<Vec<String>>,
) -> Element {
    let mut pending = use_signal(String::new);

    let commit = {
        let values = values.clone();
        move || {
            let mut chips = values.clone();
            if add_chip(&mut chips, &pending.peek()) {
                onchange.call(chips);
            }
            pending.set(String::new());
        }
    };

    let mut on_comma = commit.clone();
    let mut on_enter = commit;

    rsx! {
        div {
            class: "chips-input",
            div {
                class: "chips",
                for (idx, chip) in values.iter().enumerate() {
                    span {
                        key: "{chip}",
                        class: "chip",
                        "{chip}"
                        button {
                            class: "chip-remove",
                            r#type: "button",
                            onclick: {
                                let values = values.clone();
                                move |_| {
                                    let mut chips = values.clone();
                                    chips.remove(idx);
                                    onchange.call(chips);
                                }
                            },
                            "×"
                        }
                    }
                }
            }
            Input {
                id,
                placeholder,
                value: pending(),
                oninput: move |evt: FormEvent| {
                    let value = evt.value();
                    if value.ends_with(',') {
                        pending.set(value);
                        on_comma();
                    } else {
                        pending.set(value);
                    }
                },
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Enter {
                        evt.prevent_default();
                        on_enter();
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_chip_trims_and_dedups() {
        let mut chips = vec!["rust".to_string()];
        assert!(add_chip(&mut chips, "  wasm "));
        assert!(add_chip(&mut chips, "dioxus,"));
        assert!(!add_chip(&mut chips, "rust"));
        assert!(!add_chip(&mut chips, "   "));
        assert!(!add_chip(&mut chips, ","));
        assert_eq!(chips, vec!["rust", "wasm", "dioxus"]);
    }
}
