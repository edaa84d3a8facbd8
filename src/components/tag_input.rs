//! Tag Input Component
//!
//! Chips for the draft's tags plus an input with suggestions from tags
//! already in the vault. Comma or semicolon separated input adds several
//! tags at once.

use leptos::prelude::*;

const MAX_SUGGESTIONS: usize = 5;

/// Query chars appear in order in the target, ignoring case
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let target = target.to_lowercase();
    let mut target_chars = target.chars();
    query
        .to_lowercase()
        .chars()
        .all(|q| target_chars.any(|c| c == q))
}

/// Text after the last separator, i.e. the tag being typed
fn current_segment(input: &str) -> &str {
    input.rsplit([',', ';']).next().unwrap_or("").trim()
}

/// Replace the tag being typed with a suggestion
fn replace_current_segment(input: &str, suggestion: &str) -> String {
    match input.rfind([',', ';']) {
        Some(pos) => format!("{} {}", &input[..=pos], suggestion),
        None => suggestion.to_string(),
    }
}

/// Suggestions for the segment being typed, skipping tags already chosen
fn suggestions_for(input: &str, known: &[String], chosen: &[String]) -> Vec<String> {
    let segment = current_segment(input);
    if segment.is_empty() {
        return Vec::new();
    }
    known
        .iter()
        .filter(|tag| !chosen.iter().any(|c| c.eq_ignore_ascii_case(tag)))
        .filter(|tag| fuzzy_match(segment, tag))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

#[component]
pub fn TagInput(
    #[prop(into)] tags: Signal<Vec<String>>,
    #[prop(into)] known_tags: Signal<Vec<String>>,
    /// Receives the raw input; the owner splits and de-duplicates it
    #[prop(into)] on_add: Callback<String>,
    #[prop(into)] on_remove: Callback<String>,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(String::new());
    let (selected_idx, set_selected_idx) = signal(0usize);

    let suggestions = move || suggestions_for(&input_value.get(), &known_tags.get(), &tags.get());

    let commit = move || {
        let raw = input_value.get_untracked();
        if !raw.trim().is_empty() {
            on_add.run(raw);
        }
        set_input_value.set(String::new());
        set_selected_idx.set(0);
    };

    let accept_suggestion = move |name: String| {
        set_input_value.update(|v| *v = replace_current_segment(v, &name));
        set_selected_idx.set(0);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = suggestions();
        match ev.key().as_str() {
            // Enter must not submit the surrounding form
            "Enter" => {
                ev.prevent_default();
                commit();
            }
            "Tab" if !sugg.is_empty() => {
                ev.prevent_default();
                if let Some(name) = sugg.get(selected_idx.get_untracked()) {
                    accept_suggestion(name.clone());
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                let sel = selected_idx.get_untracked();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                set_selected_idx.update(|sel| *sel = sel.saturating_sub(1));
            }
            _ => {}
        }
    };

    view! {
        <div class="tag-input">
            <div class="tag-chips">
                <For
                    each=move || tags.get()
                    key=|tag| tag.clone()
                    children=move |tag| {
                        let removed = tag.clone();
                        view! {
                            <span class="tag-chip editable">
                                "#" {tag}
                                <button
                                    type="button"
                                    class="tag-remove"
                                    on:click=move |_| on_remove.run(removed.clone())
                                >
                                    "×"
                                </button>
                            </span>
                        }
                    }
                />
            </div>
            <input
                type="text"
                placeholder="Add tags, separated by commas"
                autocomplete="off"
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    set_input_value.set(event_target_value(&ev));
                    set_selected_idx.set(0);
                }
                on:keydown=on_keydown
                on:blur=move |_| commit()
            />
            {move || {
                let sugg = suggestions();
                if sugg.is_empty() {
                    return ().into_any();
                }
                let selected = selected_idx.get();
                view! {
                    <div class="autocomplete-list">
                        {sugg.into_iter().enumerate().map(|(i, name)| {
                            let picked = name.clone();
                            view! {
                                <button
                                    type="button"
                                    class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                    // Keep focus in the input so blur does not commit early
                                    on:mousedown=move |ev| {
                                        ev.prevent_default();
                                        accept_suggestion(picked.clone());
                                    }
                                >
                                    {name}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("rst", "Rust"));
        assert!(fuzzy_match("", "anything"));
        assert!(!fuzzy_match("tsr", "rust"));
    }

    #[test]
    fn test_segments() {
        assert_eq!(current_segment("work, pla"), "pla");
        assert_eq!(current_segment("a; b;"), "");
        assert_eq!(replace_current_segment("work, pla", "planning"), "work, planning");
        assert_eq!(replace_current_segment("pla", "planning"), "planning");
    }

    #[test]
    fn test_suggestions_skip_chosen_tags() {
        let known = vec!["planning".to_string(), "play".to_string(), "work".to_string()];
        let chosen = vec!["Play".to_string()];
        assert_eq!(suggestions_for("pl", &known, &chosen), vec!["planning"]);
        assert!(suggestions_for("work, ", &known, &chosen).is_empty());
    }
}
