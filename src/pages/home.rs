use std::cell::Cell;
use std::rc::Rc;

use chrono::{Datelike, Local};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::components::counter::StatCounter;
use crate::components::reveal::Reveal;
use crate::components::scroll::anchor_callback;
use crate::quote::form::{QuoteForm, FALLBACK_PHONE};

const SERVICE_CARDS: [(&str, &str); 6] = [
    (
        "Roofing",
        "Tear-offs, re-decks, and full replacements in asphalt, metal, and composite.",
    ),
    (
        "Siding & Windows",
        "Fiber cement and vinyl siding, plus energy-rated window and door installs.",
    ),
    (
        "Decks & Patios",
        "Custom composite and cedar decks, covered patios, and pergolas.",
    ),
    (
        "Concrete & Flatwork",
        "Driveways, sidewalks, stamped patios, and garage slabs.",
    ),
    (
        "Gutters & Drainage",
        "Seamless gutters, guards, and yard drainage that keeps water off the foundation.",
    ),
    (
        "Storm Repair",
        "Hail and wind damage assessment, insurance documentation, and repair.",
    ),
];

#[function_component(Home)]
pub fn home() -> Html {
    let hero_bg = use_node_ref();
    let scroll_arrow = use_node_ref();
    let services_open = use_state(|| false);

    // Hero scroll effects: fade the arrow past 50px and drift the background
    // layer. Work is coalesced to one animation frame per burst of scroll
    // events; parallax only runs on hover-capable, wide viewports.
    {
        let hero_bg = hero_bg.clone();
        let scroll_arrow = scroll_arrow.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window().unwrap();
                let parallax_on = window
                    .match_media("(hover: hover) and (min-width: 900px)")
                    .ok()
                    .flatten()
                    .map(|mql| mql.matches())
                    .unwrap_or(false);
                let ticking = Rc::new(Cell::new(false));
                let scroll_cb = Closure::wrap(Box::new(move || {
                    if ticking.get() {
                        return;
                    }
                    ticking.set(true);
                    let ticking = ticking.clone();
                    let hero_bg = hero_bg.clone();
                    let scroll_arrow = scroll_arrow.clone();
                    let win = web_sys::window().unwrap();
                    let frame = Closure::once_into_js(move || {
                        let offset = web_sys::window()
                            .and_then(|w| w.page_y_offset().ok())
                            .unwrap_or(0.0);
                        if let Some(arrow) = scroll_arrow.cast::<web_sys::HtmlElement>() {
                            let _ = arrow
                                .style()
                                .set_property("opacity", if offset > 50.0 { "0" } else { "1" });
                        }
                        if parallax_on {
                            if let Some(bg) = hero_bg.cast::<web_sys::HtmlElement>() {
                                let _ = bg.style().set_property(
                                    "transform",
                                    &format!("translateY({:.1}px)", offset * 0.35),
                                );
                            }
                        }
                        ticking.set(false);
                    });
                    let _ = win.request_animation_frame(frame.unchecked_ref());
                }) as Box<dyn FnMut()>);
                window
                    .add_event_listener_with_callback(
                        "scroll",
                        scroll_cb.as_ref().unchecked_ref(),
                    )
                    .unwrap();
                move || {
                    if let Some(win) = web_sys::window() {
                        let _ = win.remove_event_listener_with_callback(
                            "scroll",
                            scroll_cb.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let toggle_services = {
        let services_open = services_open.clone();
        Callback::from(move |_: MouseEvent| {
            services_open.set(!*services_open);
        })
    };

    let year = Local::now().year();

    html! {
        <div class="home">
            <style>
            {r#".home {
                color: #1d2b23;
                font-family: 'Segoe UI', system-ui, sans-serif;
            }
            .hero {
                position: relative;
                min-height: 92vh;
                display: flex;
                align-items: center;
                justify-content: center;
                text-align: center;
                overflow: hidden;
                color: #fff;
            }
            .hero-bg {
                position: absolute;
                top: -12%;
                left: 0;
                width: 100%;
                height: 124%;
                background:
                    linear-gradient(rgba(14, 34, 24, 0.72), rgba(14, 34, 24, 0.72)),
                    url('/assets/hero-ridge.jpg') center / cover no-repeat;
                will-change: transform;
                z-index: 0;
            }
            .hero-inner { position: relative; z-index: 1; padding: 0 1.5rem; max-width: 760px; }
            .hero h1 {
                font-size: clamp(2.2rem, 5vw, 3.6rem);
                margin-bottom: 1rem;
                line-height: 1.15;
            }
            .hero p { font-size: 1.2rem; opacity: 0.9; margin-bottom: 2rem; }
            .hero-cta {
                display: inline-block;
                background: #2e7d54;
                color: #fff;
                padding: 1rem 2.4rem;
                border-radius: 10px;
                font-size: 1.1rem;
                font-weight: 600;
                text-decoration: none;
                transition: background 0.2s ease;
            }
            .hero-cta:hover { background: #256a46; }
            .scroll-arrow {
                position: absolute;
                bottom: 2rem;
                left: 50%;
                transform: translateX(-50%);
                z-index: 1;
                font-size: 1.8rem;
                color: #fff;
                text-decoration: none;
                transition: opacity 0.4s ease;
                animation: arrow-bob 2s ease-in-out infinite;
            }
            @keyframes arrow-bob {
                0%, 100% { transform: translateX(-50%) translateY(0); }
                50% { transform: translateX(-50%) translateY(8px); }
            }
            .section { padding: 4.5rem 1.5rem; max-width: 1100px; margin: 0 auto; }
            .section h2 { font-size: 2rem; margin-bottom: 0.75rem; color: #1d3b2a; }
            .section-lead { color: #49594f; max-width: 620px; margin-bottom: 2rem; }
            .services-toggle {
                background: none;
                border: 2px solid #2e7d54;
                color: #2e7d54;
                border-radius: 8px;
                padding: 0.7rem 1.5rem;
                font-size: 1rem;
                font-weight: 600;
                cursor: pointer;
            }
            .services-grid {
                display: none;
                grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                gap: 1.25rem;
                margin-top: 1.75rem;
            }
            .services-grid.open { display: grid; }
            .service-card {
                border: 1px solid #dde5e0;
                border-radius: 12px;
                padding: 1.5rem;
                background: #fff;
                box-shadow: 0 4px 14px rgba(20, 40, 30, 0.06);
            }
            .service-card h3 { margin: 0 0 0.5rem; color: #1d3b2a; }
            .service-card p { margin: 0; color: #49594f; line-height: 1.5; }
            .stats-band { background: #15291e; color: #fff; }
            .stats-row {
                display: flex;
                flex-wrap: wrap;
                justify-content: space-around;
                gap: 2rem;
                max-width: 900px;
                margin: 0 auto;
                padding: 3.5rem 1.5rem;
            }
            .stat { text-align: center; }
            .stat-value { font-size: 2.8rem; font-weight: 700; color: #8fd3ae; display: block; }
            .stat-label { font-size: 0.95rem; opacity: 0.85; }
            .reveal {
                opacity: 0;
                transform: translateY(24px);
                transition: opacity 0.7s ease, transform 0.7s ease;
            }
            .reveal.visible { opacity: 1; transform: none; }
            .why-grid {
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
                gap: 1.25rem;
            }
            .why-card {
                border-left: 4px solid #2e7d54;
                background: #f4f8f5;
                border-radius: 0 10px 10px 0;
                padding: 1.25rem 1.5rem;
            }
            .why-card h3 { margin: 0 0 0.4rem; font-size: 1.05rem; color: #1d3b2a; }
            .why-card p { margin: 0; color: #49594f; font-size: 0.95rem; line-height: 1.5; }
            .quote-band { background: #eef4f0; }
            .quote-band .section { max-width: 760px; }
            .site-footer {
                background: #0f1f16;
                color: #cfe0d6;
                padding: 3rem 1.5rem 2rem;
                text-align: center;
            }
            .site-footer a { color: #8fd3ae; text-decoration: none; }
            .footer-phone { font-size: 1.2rem; font-weight: 600; margin-bottom: 0.75rem; }
            .footer-meta { font-size: 0.85rem; opacity: 0.7; margin-top: 1.5rem; }"#}
            </style>

            <section class="hero" id="top">
                <div class="hero-bg" ref={hero_bg}></div>
                <div class="hero-inner">
                    <h1>{"Exteriors built for Ozarks weather"}</h1>
                    <p>{"Roofing, siding, decks, and concrete from a crew that shows up when we say we will."}</p>
                    <a class="hero-cta" href="#quote" onclick={anchor_callback("quote")}>
                        {"Get a Free Quote"}
                    </a>
                </div>
                <a
                    class="scroll-arrow"
                    id="scroll-arrow"
                    href="#services"
                    aria-label="Scroll to services"
                    onclick={anchor_callback("services")}
                    ref={scroll_arrow}
                >
                    {"\u{25BC}"}
                </a>
            </section>

            <section class="section" id="services">
                <h2>{"What we build"}</h2>
                <p class="section-lead">
                    {"One crew, one point of contact, from first walkthrough to final sweep-up."}
                </p>
                <button
                    class="services-toggle"
                    id="services-toggle"
                    aria-expanded={services_open.to_string()}
                    aria-controls="services-grid"
                    onclick={toggle_services}
                >
                    { if *services_open { "Hide Services \u{25B2}" } else { "Show Services \u{25BC}" } }
                </button>
                <div
                    class={classes!("services-grid", services_open.then(|| "open"))}
                    id="services-grid"
                >
                    { for SERVICE_CARDS.iter().map(|(title, blurb)| html! {
                        <div class="service-card">
                            <h3>{*title}</h3>
                            <p>{*blurb}</p>
                        </div>
                    })}
                </div>
            </section>

            <section class="stats-band" id="stats">
                <div class="stats-row">
                    <StatCounter target={340} suffix="+" label="Projects completed" />
                    <StatCounter target={22} label="Years in business" />
                    <StatCounter target={98} suffix="%" label="Customers who'd hire us again" />
                </div>
            </section>

            <section class="section" id="about">
                <Reveal>
                    <h2>{"Why neighbors call us first"}</h2>
                    <p class="section-lead">
                        {"Springfield's weather doesn't negotiate. Your exterior shouldn't either."}
                    </p>
                </Reveal>
                <div class="why-grid">
                    <Reveal>
                        <div class="why-card">
                            <h3>{"Licensed & insured"}</h3>
                            <p>{"Full liability and workers' comp coverage on every job site, every day."}</p>
                        </div>
                    </Reveal>
                    <Reveal>
                        <div class="why-card">
                            <h3>{"Written quotes, no surprises"}</h3>
                            <p>{"Itemized scope and a start date in writing before we order a single shingle."}</p>
                        </div>
                    </Reveal>
                    <Reveal>
                        <div class="why-card">
                            <h3>{"Workmanship warranty"}</h3>
                            <p>{"Ten years on labor, on top of manufacturer coverage on materials."}</p>
                        </div>
                    </Reveal>
                </div>
            </section>

            <section class="quote-band" id="quote">
                <div class="section">
                    <Reveal>
                        <h2>{"Tell us about your project"}</h2>
                        <p class="section-lead">
                            {"Three quick steps. We'll call you back with a ballpark within one business day."}
                        </p>
                    </Reveal>
                    <QuoteForm />
                </div>
            </section>

            <footer class="site-footer" id="contact">
                <p class="footer-phone">
                    {"Call or text: "}
                    <a href={format!("tel:{}", FALLBACK_PHONE.chars().filter(char::is_ascii_digit).collect::<String>())}>
                        {FALLBACK_PHONE}
                    </a>
                </p>
                <p>{"Serving Springfield, Nixa, Ozark, and Republic"}</p>
                <p class="footer-meta">
                    {"\u{00A9} "}<span id="footer-year">{year}</span>{" Ozark Valley Exteriors. All rights reserved."}
                </p>
            </footer>
        </div>
    }
}
