//! 画像選択コンポーネント
//!
//! 選択できる画像は常に1枚。選び直すと置き換わり、削除で未選択に戻る。

use chat_hd_common::ImageSource;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::file::BrowserImage;

#[component]
pub fn ImagePicker(image: RwSignal<Option<BrowserImage>, LocalStorage>) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            let picked = BrowserImage::new(file);
            log::debug!("image selected: {}", picked.name());
            image.set(Some(picked));
        }
        // 削除後に同じファイルを選び直せるように
        input.set_value("");
    };

    let file_name = move || {
        image.with(|img| {
            img.as_ref()
                .map(|img| img.name().to_string())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="image-picker">
            <label class="btn btn-outlined">
                "Upload Image"
                <input type="file" hidden accept="image/*" on:change=on_change />
            </label>
        </div>

        <Show when=move || image.with(Option::is_some)>
            <div class="selected-image">
                <span class="text-muted">"Selected Image: " {file_name}</span>
                <button
                    class="btn btn-delete btn-small"
                    on:click=move |_| image.set(None)
                >
                    "Delete"
                </button>
            </div>
        </Show>
    }
}
