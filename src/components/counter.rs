use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{js_sys, IntersectionObserver, IntersectionObserverEntry};
use yew::prelude::*;

use crate::components::reveal::{observe_once, observers_supported};

const COUNT_DURATION_MS: f64 = 2_000.0;

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Drives the displayed value 0 -> target with requestAnimationFrame, writing
/// straight into the node so the surrounding component never re-renders.
fn animate_count(node: web_sys::HtmlElement, target: u32) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let start = js_sys::Date::now();
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let frame_handle = frame.clone();
    let win = window.clone();
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
        let t = ((js_sys::Date::now() - start) / COUNT_DURATION_MS).min(1.0);
        let value = (f64::from(target) * ease_out_cubic(t)).round() as u32;
        node.set_inner_text(&value.to_string());
        if t < 1.0 {
            if let Some(cb) = frame_handle.borrow().as_ref() {
                let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        } else {
            // finished; release the closure so it can be collected
            let _ = frame_handle.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}

#[derive(Properties, PartialEq)]
pub struct StatCounterProps {
    pub target: u32,
    #[prop_or_default]
    pub suffix: &'static str,
    pub label: &'static str,
}

/// Animated stat. Counts up once, the first time it scrolls into view; with no
/// IntersectionObserver it just shows the final number.
#[function_component(StatCounter)]
pub fn stat_counter(props: &StatCounterProps) -> Html {
    let value_ref = use_node_ref();

    {
        let value_ref = value_ref.clone();
        let target = props.target;
        use_effect_with_deps(
            move |_| {
                let mut watcher = None;
                if let Some(el) = value_ref.cast::<web_sys::HtmlElement>() {
                    if observers_supported() {
                        let value_node = el.clone();
                        let callback = Closure::wrap(Box::new(
                            move |entries: js_sys::Array, observer: IntersectionObserver| {
                                for entry in entries.iter() {
                                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                                    if entry.is_intersecting() {
                                        observer.unobserve(&entry.target());
                                        animate_count(value_node.clone(), target);
                                    }
                                }
                            },
                        )
                            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
                        watcher = Some(observe_once(&el, callback));
                    } else {
                        el.set_inner_text(&target.to_string());
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
        <div class="stat">
            <span class="stat-value">
                <span ref={value_ref}>{"0"}</span>{props.suffix}
            </span>
            <span class="stat-label">{props.label}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::ease_out_cubic;

    #[test]
    fn easing_hits_both_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
    }

    #[test]
    fn easing_decelerates() {
        // ease-out: more than half the distance is covered in the first half
        assert!(ease_out_cubic(0.5) > 0.5);
        assert!(ease_out_cubic(0.25) > 0.25);
        let early = ease_out_cubic(0.3) - ease_out_cubic(0.2);
        let late = ease_out_cubic(0.9) - ease_out_cubic(0.8);
        assert!(early > late);
    }
}
