use log::{info, Level};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod components {
    pub mod counter;
    pub mod reveal;
    pub mod scroll;
}
mod pages {
    pub mod home;
}
mod quote {
    pub mod form;
    pub mod gate;
    pub mod validate;
}

use components::scroll;
use pages::home::Home;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::NotFound => {
            info!("Unknown path, rendering Home page");
            html! { <Home /> }
        }
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let burger_ref = use_node_ref();
    let menu_ref = use_node_ref();

    // While the menu is open: pin the page, close on outside click, close on
    // Escape (returning focus to the burger button). Listeners only live for
    // the open state and are removed by the effect destructor, so re-renders
    // never stack duplicate bindings.
    {
        let menu_open = menu_open.clone();
        let open_now = *menu_open;
        let burger_ref = burger_ref.clone();
        let menu_ref = menu_ref.clone();
        use_effect_with_deps(
            move |open: &bool| {
                let mut teardown: Option<Box<dyn FnOnce()>> = None;
                if *open {
                    let offset = scroll::lock_scroll();
                    let document = web_sys::window().unwrap().document().unwrap();

                    let click_cb = Closure::wrap(Box::new({
                        let menu_open = menu_open.clone();
                        let burger_ref = burger_ref.clone();
                        let menu_ref = menu_ref.clone();
                        move |e: web_sys::Event| {
                            let target = e.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
                            let inside = |r: &NodeRef| {
                                r.cast::<web_sys::Node>()
                                    .map(|n| n.contains(target.as_ref()))
                                    .unwrap_or(false)
                            };
                            if !inside(&menu_ref) && !inside(&burger_ref) {
                                menu_open.set(false);
                            }
                        }
                    })
                        as Box<dyn FnMut(web_sys::Event)>);

                    let key_cb = Closure::wrap(Box::new({
                        let menu_open = menu_open.clone();
                        let burger_ref = burger_ref.clone();
                        move |e: web_sys::KeyboardEvent| {
                            if e.key() == "Escape" {
                                menu_open.set(false);
                                if let Some(button) = burger_ref.cast::<web_sys::HtmlElement>() {
                                    let _ = button.focus();
                                }
                            }
                        }
                    })
                        as Box<dyn FnMut(web_sys::KeyboardEvent)>);

                    document
                        .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())
                        .unwrap();
                    document
                        .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref())
                        .unwrap();

                    teardown = Some(Box::new(move || {
                        let _ = document.remove_event_listener_with_callback(
                            "click",
                            click_cb.as_ref().unchecked_ref(),
                        );
                        let _ = document.remove_event_listener_with_callback(
                            "keydown",
                            key_cb.as_ref().unchecked_ref(),
                        );
                        scroll::unlock_scroll(offset);
                    }));
                }
                move || {
                    if let Some(f) = teardown {
                        f();
                    }
                }
            },
            open_now,
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let nav_link = {
        let menu_open = menu_open.clone();
        move |id: &'static str| {
            let menu_open = menu_open.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                scroll::scroll_to_section(id);
                menu_open.set(false);
            })
        }
    };

    html! {
        <nav class="top-nav">
            <style>
            {r#".top-nav {
                position: fixed;
                top: 0;
                left: 0;
                right: 0;
                z-index: 100;
                background: rgba(15, 31, 22, 0.92);
                backdrop-filter: blur(8px);
            }
            .nav-content {
                max-width: 1100px;
                margin: 0 auto;
                display: flex;
                align-items: center;
                justify-content: space-between;
                padding: 0.8rem 1.5rem;
            }
            .nav-logo {
                color: #fff;
                font-weight: 700;
                font-size: 1.15rem;
                text-decoration: none;
                letter-spacing: 0.02em;
            }
            .nav-logo span { color: #8fd3ae; }
            .burger-menu {
                display: none;
                flex-direction: column;
                gap: 5px;
                background: none;
                border: none;
                cursor: pointer;
                padding: 8px;
            }
            .burger-menu span {
                width: 24px;
                height: 2px;
                background: #fff;
                transition: transform 0.25s ease, opacity 0.25s ease;
            }
            .burger-menu.active span:nth-child(1) { transform: translateY(7px) rotate(45deg); }
            .burger-menu.active span:nth-child(2) { opacity: 0; }
            .burger-menu.active span:nth-child(3) { transform: translateY(-7px) rotate(-45deg); }
            .nav-links {
                display: flex;
                align-items: center;
                gap: 1.5rem;
            }
            .nav-links a {
                color: #e6efe9;
                text-decoration: none;
                font-size: 0.98rem;
            }
            .nav-links a:hover { color: #8fd3ae; }
            .nav-links .nav-cta {
                background: #2e7d54;
                color: #fff;
                padding: 0.55rem 1.2rem;
                border-radius: 8px;
                font-weight: 600;
            }
            @media (max-width: 820px) {
                .burger-menu { display: flex; }
                .nav-links {
                    position: fixed;
                    top: 56px;
                    right: 0;
                    bottom: 0;
                    width: min(78vw, 320px);
                    flex-direction: column;
                    align-items: flex-start;
                    padding: 2rem 1.5rem;
                    background: #0f1f16;
                    transform: translateX(100%);
                    transition: transform 0.3s ease;
                }
                .nav-links.open { transform: translateX(0); }
            }"#}
            </style>
            <div class="nav-content">
                <a class="nav-logo" href="#top" onclick={nav_link("top")}>
                    {"Ozark Valley "}<span>{"Exteriors"}</span>
                </a>
                <button
                    class={classes!("burger-menu", menu_open.then(|| "active"))}
                    id="burger-btn"
                    aria-label="Toggle navigation menu"
                    aria-expanded={menu_open.to_string()}
                    aria-controls="nav-links"
                    onclick={toggle_menu}
                    ref={burger_ref}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div
                    class={classes!("nav-links", menu_open.then(|| "open"))}
                    id="nav-links"
                    ref={menu_ref}
                >
                    <a href="#services" onclick={nav_link("services")}>{"Services"}</a>
                    <a href="#about" onclick={nav_link("about")}>{"Why Us"}</a>
                    <a href="#contact" onclick={nav_link("contact")}>{"Contact"}</a>
                    <a class="nav-cta" href="#quote" onclick={nav_link("quote")}>{"Free Quote"}</a>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
