//! 送信ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn SendButton<F>(loading: ReadSignal<bool>, on_send: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <div class="send-actions">
            <button
                class="btn btn-primary"
                disabled=move || loading.get()
                on:click={
                    let on_send = on_send.clone();
                    move |_| on_send(())
                }
            >
                {move || if loading.get() { "Sending..." } else { "Send" }}
            </button>
        </div>
    }
}
