//! 回答表示コンポーネント

use chat_hd_common::format_reply_line;
use leptos::prelude::*;

#[component]
pub fn ResponsePanel(response: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || response.with(Option::is_some)>
            <div class="response-panel">
                <p class="response-text" style="white-space: pre-wrap">
                    {move || response.get().map(|r| format_reply_line(&r)).unwrap_or_default()}
                </p>
            </div>
        </Show>
    }
}
