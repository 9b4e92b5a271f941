//! メインアプリケーションコンポーネント

use std::rc::Rc;

use chat_hd_common::{SubmitOutcome, Submitter};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, FetchTransport};
use crate::components::{
    chat_input::ChatInput,
    header::Header,
    image_picker::ImagePicker,
    response_panel::ResponsePanel,
    send_button::SendButton,
};
use crate::file::BrowserImage;

/// メインアプリケーションコンポーネント
///
/// 状態はこのビューのインスタンスが持つ（グローバルな状態はない）
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let (text, set_text) = signal(String::new());
    let image = RwSignal::new_local(None::<BrowserImage>);
    let (response, set_response) = signal(None::<String>);
    let (loading, set_loading) = signal(false);

    let submitter = StoredValue::new_local(Rc::new(Submitter::new(
        FetchTransport,
        api::endpoint(),
    )));

    // 送信ハンドラ
    let on_send = move |_| {
        let submitter = submitter.get_value();
        let text = text.get_untracked();
        let image = image.get_untracked();

        set_loading.set(true);
        spawn_local(async move {
            if let SubmitOutcome::Completed(reply) = submitter.submit(&text, image.as_ref()).await {
                set_response.set(reply.display_text().map(str::to_owned));
            }
            set_loading.set(submitter.in_flight().is_submitting());
        });
    };

    view! {
        <div class="container">
            <Header />

            <ChatInput text=text set_text=set_text />

            <ImagePicker image=image />

            <SendButton loading=loading on_send=on_send />

            <ResponsePanel response=response />
        </div>
    }
}
