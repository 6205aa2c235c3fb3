use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

/// Older embedded browsers ship without IntersectionObserver; everything that
/// keys off it falls back to its final state.
pub fn observers_supported() -> bool {
    web_sys::window()
        .map(|w| {
            js_sys::Reflect::has(w.as_ref(), &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

pub fn observe_once(
    el: &web_sys::Element,
    callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
) -> (Option<IntersectionObserver>, Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>) {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from(0.15));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok();
    if let Some(obs) = observer.as_ref() {
        obs.observe(el);
    }
    (observer, callback)
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Wrapper that stays transparent until it first crosses the viewport, then
/// gains the `visible` class for good. Observation stops after the first
/// trigger, so scrolling back up never restarts the animation.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_state(|| !observers_supported());

    {
        let node = node.clone();
        let already_visible = *visible;
        let visible = visible.clone();
        use_effect_with_deps(
            move |_| {
                let mut watcher = None;
                if !already_visible {
                    if let Some(el) = node.cast::<web_sys::Element>() {
                        let callback = Closure::wrap(Box::new(
                            move |entries: js_sys::Array, observer: IntersectionObserver| {
                                for entry in entries.iter() {
                                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                                    if entry.is_intersecting() {
                                        observer.unobserve(&entry.target());
                                        visible.set(true);
                                    }
                                }
                            },
                        )
                            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
                        watcher = Some(observe_once(&el, callback));
                    }
                }
                move || {
                    if let Some((observer, callback)) = watcher {
                        if let Some(observer) = observer {
                            observer.disconnect();
                        }
                        drop(callback);
                    }
                }
            },
            (),
        );
    }

    html! {
        <div
            ref={node}
            class={classes!("reveal", props.class.clone(), visible.then(|| "visible"))}
        >
            { for props.children.iter() }
        </div>
    }
}
