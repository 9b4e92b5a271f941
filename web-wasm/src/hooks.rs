//! リアクティブフック

use std::time::Duration;

use chat_hd_common::Debounce;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

/// `value`が`delay`の間変化しなかったときだけ追従するシグナルを返す
///
/// 保留中のタイマーは常に1つ。値が変わるたびに置き換え（古いタイマーは
/// ドロップ時にキャンセルされる）、ビュー破棄時にもキャンセルする。
pub fn use_debounce<T>(value: Signal<T>, delay: Duration) -> ReadSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (debounced, set_debounced) = signal(value.get_untracked());
    let state = StoredValue::new_local(Debounce::<T>::new(delay));
    let timer = StoredValue::new_local(None::<Timeout>);

    Effect::new(move |_| {
        let next = value.get();
        state.update_value(|d| {
            d.update(next, js_sys::Date::now());
        });
        schedule(state, timer, set_debounced, delay);
    });

    on_cleanup(move || {
        timer.try_update_value(|slot| slot.take());
        state.try_update_value(|d| d.cancel());
    });

    debounced
}

fn schedule<T>(
    state: StoredValue<Debounce<T>, LocalStorage>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
    set_debounced: WriteSignal<T>,
    wait: Duration,
) where
    T: Clone + Send + Sync + 'static,
{
    let millis = u32::try_from(wait.as_millis()).unwrap_or(u32::MAX);
    let timeout = Timeout::new(millis, move || {
        let now = js_sys::Date::now();
        let ready = state.try_update_value(|d| d.poll(now)).flatten();
        match ready {
            Some(value) => set_debounced.set(value),
            None => {
                // 時計の誤差で早く発火した場合は残り時間で張り直す
                if let Some(left) = state.try_with_value(|d| d.remaining(now)).flatten() {
                    schedule(state, timer, set_debounced, left.max(Duration::from_millis(1)));
                }
            }
        }
    });
    // 既存のタイマーはここでドロップされキャンセルされる
    timer.set_value(Some(timeout));
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use leptos::reactive::owner::Owner;
    use leptos::task::Executor;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const DELAY: Duration = Duration::from_millis(100);

    #[wasm_bindgen_test]
    async fn wasm_burst_settles_on_last_value() {
        _ = Executor::init_wasm_bindgen();
        let owner = Owner::new();
        let history = Rc::new(RefCell::new(Vec::<String>::new()));

        let set_source = owner.with(|| {
            let (source, set_source) = signal(String::new());
            let debounced = use_debounce(Signal::from(source), DELAY);

            let history = Rc::clone(&history);
            Effect::new(move |_| {
                let settled: String = debounced.get();
                history.borrow_mut().push(settled);
            });
            set_source
        });
        TimeoutFuture::new(0).await;

        for value in ["H", "He", "Hel", "Hell", "Hello"] {
            set_source.set(value.to_string());
            TimeoutFuture::new(20).await;
        }
        // 最後の入力からまだ遅延時間が経っていない
        assert!(!history.borrow().iter().any(|v| !v.is_empty()));

        TimeoutFuture::new(300).await;

        let settled: Vec<String> = history
            .borrow()
            .iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect();
        assert_eq!(settled, vec!["Hello".to_string()]);
    }

    #[wasm_bindgen_test]
    async fn wasm_teardown_cancels_pending_timer() {
        _ = Executor::init_wasm_bindgen();
        let root = Owner::new();
        let (source, set_source, sink) = root.with(|| {
            let (source, set_source) = signal(String::new());
            (source, set_source, RwSignal::new(String::new()))
        });

        let view_owner = root.with(|| root.child());
        view_owner.with(|| {
            let debounced = use_debounce(Signal::from(source), DELAY);
            Effect::new(move |_| {
                let settled: String = debounced.get();
                sink.set(settled);
            });
        });
        TimeoutFuture::new(0).await;

        set_source.set("pending".to_string());
        TimeoutFuture::new(20).await;

        // 保留中のままビューを破棄
        view_owner.cleanup();
        TimeoutFuture::new(300).await;

        assert_eq!(sink.get_untracked(), "");
    }
}
