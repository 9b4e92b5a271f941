//! 質問入力欄コンポーネント

use chat_hd_common::DEFAULT_DEBOUNCE;
use leptos::prelude::*;

use crate::hooks::use_debounce;

#[component]
pub fn ChatInput(text: ReadSignal<String>, set_text: WriteSignal<String>) -> impl IntoView {
    let debounced = use_debounce(Signal::from(text), DEFAULT_DEBOUNCE);

    Effect::new(move |_| {
        let settled = debounced.get();
        if !settled.is_empty() {
            log::debug!("input settled: {} chars", settled.chars().count());
        }
    });

    view! {
        <input
            id="userInput"
            class="chat-input"
            type="text"
            placeholder="Ask a question"
            prop:value=move || text.get()
            on:input=move |ev| {
                set_text.set(event_target_value(&ev));
            }
        />
    }
}
