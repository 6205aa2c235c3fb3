use gloo_console::log;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{js_sys, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;
use crate::quote::gate::{
    clamp_step, cooling_down, decide_submit, dot_state, encode_form_body, line_filled,
    SubmissionState, SubmitDecision, TOTAL_STEPS,
};
use crate::quote::validate::{is_valid_email, is_valid_name, is_valid_phone, sanitize_field};

/// Shown whenever the request cannot be delivered, whatever the reason.
pub const FALLBACK_PHONE: &str = "(417) 470-9888";

const SERVICES: [&str; 4] = [
    "Roofing",
    "Siding & Windows",
    "Decks & Patios",
    "Concrete & Flatwork",
];

const SIZES: [&str; 4] = [
    "Under 1,000 sq ft",
    "1,000 - 2,500 sq ft",
    "2,500 - 5,000 sq ft",
    "Over 5,000 sq ft",
];

const TIMELINES: [&str; 4] = [
    "As soon as possible",
    "Within 1-3 months",
    "3-6 months",
    "Still planning",
];

const BUDGETS: [&str; 4] = [
    "Under $5,000",
    "$5,000 - $15,000",
    "$15,000 - $50,000",
    "Over $50,000",
];

#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
}

/// Per-group error flags, recomputed on each validation pass. Editing a field
/// clears only that field's flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct FieldErrors {
    size: bool,
    timeline: bool,
    budget: bool,
    name: bool,
    phone: bool,
    email: bool,
}

fn failure_message() -> String {
    format!(
        "Something went wrong sending your request. Please try again in a moment, or call us at {}.",
        FALLBACK_PHONE
    )
}

#[function_component(QuoteForm)]
pub fn quote_form() -> Html {
    let current_step = use_state(|| 1u8);
    let service = use_state(String::new);
    let size = use_state(String::new);
    let timeline = use_state(String::new);
    let budget = use_state(String::new);
    let name = use_state(String::new);
    let phone = use_state(String::new);
    let email = use_state(String::new);
    let address = use_state(String::new);
    let description = use_state(String::new);
    let honeypot = use_state(String::new);
    let errors = use_state(FieldErrors::default);
    let submission = use_state(|| SubmissionState::Idle);
    let notice = use_state(|| None::<String>);
    let last_submit = use_mut_ref(|| None::<f64>);

    let go_to = {
        let current_step = current_step.clone();
        move |target: i32| {
            let current_step = current_step.clone();
            Callback::from(move |_: MouseEvent| {
                current_step.set(clamp_step(target, *current_step));
            })
        }
    };

    let advance_from_step2 = {
        let current_step = current_step.clone();
        let size = size.clone();
        let timeline = timeline.clone();
        let budget = budget.clone();
        let errors = errors.clone();
        Callback::from(move |_: MouseEvent| {
            let flags = FieldErrors {
                size: size.is_empty(),
                timeline: timeline.is_empty(),
                budget: budget.is_empty(),
                ..*errors
            };
            errors.set(flags);
            if !(flags.size || flags.timeline || flags.budget) {
                current_step.set(clamp_step(3, *current_step));
            }
        })
    };

    let onchange_size = {
        let size = size.clone();
        let errors = errors.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            size.set(select.value());
            errors.set(FieldErrors { size: false, ..*errors });
        })
    };
    let onchange_timeline = {
        let timeline = timeline.clone();
        let errors = errors.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            timeline.set(select.value());
            errors.set(FieldErrors { timeline: false, ..*errors });
        })
    };
    let onchange_budget = {
        let budget = budget.clone();
        let errors = errors.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            budget.set(select.value());
            errors.set(FieldErrors { budget: false, ..*errors });
        })
    };

    let oninput_name = {
        let name = name.clone();
        let errors = errors.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
            errors.set(FieldErrors { name: false, ..*errors });
        })
    };
    let oninput_phone = {
        let phone = phone.clone();
        let errors = errors.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            phone.set(input.value());
            errors.set(FieldErrors { phone: false, ..*errors });
        })
    };
    let oninput_email = {
        let email = email.clone();
        let errors = errors.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
            errors.set(FieldErrors { email: false, ..*errors });
        })
    };
    let oninput_address = {
        let address = address.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            address.set(input.value());
        })
    };
    let oninput_description = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(textarea.value());
        })
    };
    let oninput_honeypot = {
        let honeypot = honeypot.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            honeypot.set(input.value());
        })
    };

    let on_submit = {
        let service = service.clone();
        let size = size.clone();
        let timeline = timeline.clone();
        let budget = budget.clone();
        let name = name.clone();
        let phone = phone.clone();
        let email = email.clone();
        let address = address.clone();
        let description = description.clone();
        let honeypot = honeypot.clone();
        let errors = errors.clone();
        let submission = submission.clone();
        let notice = notice.clone();
        let last_submit = last_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submission == SubmissionState::Pending {
                return;
            }

            let flags = FieldErrors {
                name: !is_valid_name(&name),
                phone: !is_valid_phone(&phone),
                email: !is_valid_email(&email),
                ..*errors
            };
            errors.set(flags);
            let step3_ok = !(flags.name || flags.phone || flags.email);

            let now = js_sys::Date::now();
            let cooling = cooling_down(*last_submit.borrow(), now);
            let decision = decide_submit(step3_ok, cooling, !honeypot.trim().is_empty());
            if decision.consumes_cooldown() {
                *last_submit.borrow_mut() = Some(now);
            }

            match decision {
                SubmitDecision::Invalid => {}
                SubmitDecision::CoolingDown => {
                    notice.set(Some(
                        "Please wait a few seconds before sending another request.".to_string(),
                    ));
                    let notice = notice.clone();
                    Timeout::new(4_000, move || notice.set(None)).forget();
                }
                SubmitDecision::Drop => {
                    // Treated as a bot: no request, no feedback.
                    log!("quote form: honeypot filled, dropping submission");
                }
                SubmitDecision::Proceed => {
                    submission.set(SubmissionState::Pending);
                    notice.set(None);

                    let body = encode_form_body(&[
                        ("service", &service),
                        ("size", &size),
                        ("timeline", &timeline),
                        ("budget", &budget),
                        ("name", &sanitize_field(&name)),
                        ("phone", &sanitize_field(&phone)),
                        ("email", &sanitize_field(&email)),
                        ("address", &sanitize_field(&address)),
                        ("description", &sanitize_field(&description)),
                        ("website", &honeypot),
                    ]);

                    let submission = submission.clone();
                    let notice = notice.clone();
                    spawn_local(async move {
                        let url = format!("{}/api/quote", config::get_backend_url());
                        let result = Request::post(&url)
                            .header("Content-Type", "application/x-www-form-urlencoded")
                            .body(body)
                            .send()
                            .await;
                        match result {
                            Ok(response) if response.ok() => {
                                match response.json::<QuoteResponse>().await {
                                    Ok(parsed) if parsed.success => {
                                        submission.set(SubmissionState::Succeeded);
                                    }
                                    Ok(_) => {
                                        log!("quote API reported failure");
                                        submission.set(SubmissionState::Failed);
                                        notice.set(Some(failure_message()));
                                    }
                                    Err(e) => {
                                        log!("quote response did not parse:", e.to_string());
                                        submission.set(SubmissionState::Failed);
                                        notice.set(Some(failure_message()));
                                    }
                                }
                            }
                            Ok(response) => {
                                log!("quote API returned status", response.status());
                                submission.set(SubmissionState::Failed);
                                notice.set(Some(failure_message()));
                            }
                            Err(e) => {
                                log!("quote request failed:", e.to_string());
                                submission.set(SubmissionState::Failed);
                                notice.set(Some(failure_message()));
                            }
                        }
                    });
                }
            }
        })
    };

    let current = *current_step;
    let pending = *submission == SubmissionState::Pending;
    let step_class = |n: u8| classes!("form-step", (current == n).then(|| "active"));

    html! {
        <div class="quote-widget">
            <style>
            {r#".quote-widget {
                background: rgba(255, 255, 255, 0.97);
                border-radius: 16px;
                padding: 2.5rem;
                max-width: 640px;
                margin: 0 auto;
                box-shadow: 0 12px 40px rgba(20, 40, 30, 0.15);
            }
            .form-progress {
                display: flex;
                align-items: center;
                justify-content: center;
                margin-bottom: 2rem;
            }
            .progress-dot {
                width: 14px;
                height: 14px;
                border-radius: 50%;
                background: #d5ddd8;
                transition: background 0.3s ease, transform 0.3s ease;
            }
            .progress-dot.active {
                background: #2e7d54;
                transform: scale(1.3);
            }
            .progress-dot.done {
                background: #7db89a;
            }
            .progress-line {
                width: 64px;
                height: 3px;
                margin: 0 6px;
                background: #d5ddd8;
                transition: background 0.3s ease;
            }
            .progress-line.filled {
                background: #7db89a;
            }
            .form-step { display: none; }
            .form-step.active { display: block; }
            .form-step h3 {
                margin: 0 0 1.25rem;
                color: #1d3b2a;
                font-size: 1.3rem;
            }
            .service-options {
                display: grid;
                grid-template-columns: 1fr 1fr;
                gap: 0.75rem;
                margin-bottom: 1.5rem;
            }
            .service-option {
                display: flex;
                align-items: center;
                gap: 0.6rem;
                padding: 0.9rem 1rem;
                border: 2px solid #d5ddd8;
                border-radius: 10px;
                cursor: pointer;
                transition: border-color 0.2s ease, background 0.2s ease;
            }
            .service-option.selected {
                border-color: #2e7d54;
                background: rgba(46, 125, 84, 0.08);
            }
            .form-group { margin-bottom: 1.1rem; }
            .form-group label {
                display: block;
                margin-bottom: 0.35rem;
                font-weight: 600;
                color: #2a3c32;
                font-size: 0.92rem;
            }
            .form-group input,
            .form-group select,
            .form-group textarea {
                width: 100%;
                padding: 0.7rem 0.85rem;
                border: 2px solid #d5ddd8;
                border-radius: 8px;
                font-size: 1rem;
                background: #fff;
            }
            .form-group.has-error input,
            .form-group.has-error select,
            .form-group.has-error textarea {
                border-color: #c0392b;
                background: rgba(192, 57, 43, 0.04);
            }
            .form-group.has-error label { color: #c0392b; }
            .form-nav {
                display: flex;
                justify-content: space-between;
                gap: 1rem;
                margin-top: 1.5rem;
            }
            .form-next-btn, .form-submit-btn {
                background: #2e7d54;
                color: #fff;
                border: none;
                border-radius: 8px;
                padding: 0.8rem 1.8rem;
                font-size: 1rem;
                font-weight: 600;
                cursor: pointer;
                margin-left: auto;
            }
            .form-next-btn:disabled, .form-submit-btn:disabled {
                background: #9bb3a6;
                cursor: not-allowed;
            }
            .form-back-btn {
                background: none;
                border: 2px solid #d5ddd8;
                border-radius: 8px;
                padding: 0.8rem 1.4rem;
                font-size: 1rem;
                color: #2a3c32;
                cursor: pointer;
            }
            .form-notice {
                margin-top: 1rem;
                padding: 0.8rem 1rem;
                border-radius: 8px;
                background: rgba(192, 57, 43, 0.08);
                color: #8e2f23;
                font-size: 0.95rem;
            }
            .spinner {
                display: inline-block;
                width: 16px;
                height: 16px;
                border: 2px solid rgba(255,255,255,.4);
                border-radius: 50%;
                border-top-color: #fff;
                animation: quote-spin 0.8s linear infinite;
                vertical-align: -3px;
                margin-right: 6px;
            }
            @keyframes quote-spin { to { transform: rotate(360deg); } }
            .hp-field {
                position: absolute;
                left: -9999px;
                top: auto;
                width: 1px;
                height: 1px;
                overflow: hidden;
            }
            .form-success {
                text-align: center;
                padding: 2rem 1rem;
            }
            .form-success h3 {
                color: #1d3b2a;
                font-size: 1.6rem;
                margin-bottom: 0.75rem;
            }
            .form-success p { color: #2a3c32; margin: 0.4rem 0; }
            .success-phone { font-weight: 600; }
            @media (max-width: 560px) {
                .quote-widget { padding: 1.5rem; }
                .service-options { grid-template-columns: 1fr; }
                .progress-line { width: 36px; }
            }"#}
            </style>
            {
                if *submission == SubmissionState::Succeeded {
                    html! {
                        <div class="form-success" id="quote-success" role="status">
                            <h3>{"Request received!"}</h3>
                            <p>{"Thanks for reaching out. We'll review your project details and get back to you within one business day."}</p>
                            <p class="success-phone">{format!("Need an answer sooner? Call {}.", FALLBACK_PHONE)}</p>
                        </div>
                    }
                } else {
                    html! {
                        <form class="quote-form" onsubmit={on_submit}>
                            <div
                                class="form-progress"
                                role="progressbar"
                                aria-label="Quote request progress"
                                aria-valuemin="1"
                                aria-valuemax={TOTAL_STEPS.to_string()}
                                aria-valuenow={current.to_string()}
                            >
                                { for (1..=TOTAL_STEPS).map(|i| {
                                    let dot = html! {
                                        <span
                                            class={classes!("progress-dot", dot_state(i, current).class())}
                                            data-step={i.to_string()}
                                        ></span>
                                    };
                                    if i < TOTAL_STEPS {
                                        let line = html! {
                                            <span class={classes!("progress-line", line_filled(i, current).then(|| "filled"))}></span>
                                        };
                                        html! { <>{dot}{line}</> }
                                    } else {
                                        dot
                                    }
                                })}
                            </div>

                            <div class={step_class(1)} data-step="1">
                                <h3>{"What do you need done?"}</h3>
                                <div class="service-options">
                                    { for SERVICES.iter().map(|&svc| {
                                        let onchange = {
                                            let service = service.clone();
                                            Callback::from(move |e: Event| {
                                                let input: HtmlInputElement = e.target_unchecked_into();
                                                if input.checked() {
                                                    service.set(input.value());
                                                }
                                            })
                                        };
                                        html! {
                                            <label class={classes!("service-option", (*service == svc).then(|| "selected"))}>
                                                <input
                                                    type="radio"
                                                    name="service"
                                                    value={svc}
                                                    checked={*service == svc}
                                                    onchange={onchange}
                                                />
                                                <span>{svc}</span>
                                            </label>
                                        }
                                    })}
                                </div>
                                <div class="form-nav">
                                    <button
                                        type="button"
                                        class="form-next-btn"
                                        data-next="2"
                                        disabled={service.is_empty()}
                                        onclick={go_to(2)}
                                    >
                                        {"Next"}
                                    </button>
                                </div>
                            </div>

                            <div class={step_class(2)} data-step="2">
                                <h3>{"Tell us about the project"}</h3>
                                <div class={classes!("form-group", errors.size.then(|| "has-error"))}>
                                    <label for="quote-size">{"Approximate area"}</label>
                                    <select id="quote-size" onchange={onchange_size}>
                                        <option value="" selected={size.is_empty()} disabled={true}>{"Select an area..."}</option>
                                        { for SIZES.iter().map(|&o| html! {
                                            <option value={o} selected={*size == o}>{o}</option>
                                        })}
                                    </select>
                                </div>
                                <div class={classes!("form-group", errors.timeline.then(|| "has-error"))}>
                                    <label for="quote-timeline">{"When should we start?"}</label>
                                    <select id="quote-timeline" onchange={onchange_timeline}>
                                        <option value="" selected={timeline.is_empty()} disabled={true}>{"Select a timeline..."}</option>
                                        { for TIMELINES.iter().map(|&o| html! {
                                            <option value={o} selected={*timeline == o}>{o}</option>
                                        })}
                                    </select>
                                </div>
                                <div class={classes!("form-group", errors.budget.then(|| "has-error"))}>
                                    <label for="quote-budget">{"Budget range"}</label>
                                    <select id="quote-budget" onchange={onchange_budget}>
                                        <option value="" selected={budget.is_empty()} disabled={true}>{"Select a budget..."}</option>
                                        { for BUDGETS.iter().map(|&o| html! {
                                            <option value={o} selected={*budget == o}>{o}</option>
                                        })}
                                    </select>
                                </div>
                                <div class="form-nav">
                                    <button type="button" class="form-back-btn" data-back="1" onclick={go_to(1)}>
                                        {"Back"}
                                    </button>
                                    <button type="button" class="form-next-btn" data-next="3" onclick={advance_from_step2}>
                                        {"Next"}
                                    </button>
                                </div>
                            </div>

                            <div class={step_class(3)} data-step="3">
                                <h3>{"How do we reach you?"}</h3>
                                <div class={classes!("form-group", errors.name.then(|| "has-error"))}>
                                    <label for="quote-name">{"Full name"}</label>
                                    <input
                                        id="quote-name"
                                        type="text"
                                        placeholder="Jane Smith"
                                        value={(*name).clone()}
                                        oninput={oninput_name}
                                    />
                                </div>
                                <div class={classes!("form-group", errors.phone.then(|| "has-error"))}>
                                    <label for="quote-phone">{"Phone"}</label>
                                    <input
                                        id="quote-phone"
                                        type="tel"
                                        placeholder="(417) 555-0123"
                                        value={(*phone).clone()}
                                        oninput={oninput_phone}
                                    />
                                </div>
                                <div class={classes!("form-group", errors.email.then(|| "has-error"))}>
                                    <label for="quote-email">{"Email"}</label>
                                    <input
                                        id="quote-email"
                                        type="email"
                                        placeholder="jane@example.com"
                                        value={(*email).clone()}
                                        oninput={oninput_email}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="quote-address">{"Project address (optional)"}</label>
                                    <input
                                        id="quote-address"
                                        type="text"
                                        placeholder="123 E Walnut St, Springfield, MO"
                                        value={(*address).clone()}
                                        oninput={oninput_address}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="quote-description">{"Anything else we should know? (optional)"}</label>
                                    <textarea
                                        id="quote-description"
                                        rows="3"
                                        value={(*description).clone()}
                                        oninput={oninput_description}
                                    ></textarea>
                                </div>
                                <div class="hp-field" aria-hidden="true">
                                    <label for="quote-website">{"Website"}</label>
                                    <input
                                        id="quote-website"
                                        type="text"
                                        name="website"
                                        autocomplete="off"
                                        tabindex="-1"
                                        value={(*honeypot).clone()}
                                        oninput={oninput_honeypot}
                                    />
                                </div>
                                <div class="form-nav">
                                    <button type="button" class="form-back-btn" data-back="2" onclick={go_to(2)}>
                                        {"Back"}
                                    </button>
                                    <button type="submit" class="form-submit-btn" disabled={pending}>
                                        <span class="btn-label" style={if pending { "display:none" } else { "" }}>
                                            {"Request My Quote"}
                                        </span>
                                        <span class="btn-loading" style={if pending { "" } else { "display:none" }}>
                                            <span class="spinner"></span>{"Sending..."}
                                        </span>
                                    </button>
                                </div>
                            </div>

                            {
                                if let Some(message) = (*notice).as_ref() {
                                    html! { <div class="form-notice" role="alert">{message}</div> }
                                } else {
                                    html! {}
                                }
                            }
                        </form>
                    }
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::QuoteResponse;

    #[test]
    fn response_parses_success_flag_and_ignores_extras() {
        let parsed: QuoteResponse =
            serde_json::from_str(r#"{"success":true,"id":"q_123"}"#).unwrap();
        assert!(parsed.success);

        let parsed: QuoteResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!parsed.success);
    }

    #[test]
    fn response_without_success_flag_is_an_error() {
        assert!(serde_json::from_str::<QuoteResponse>(r#"{"ok":true}"#).is_err());
        assert!(serde_json::from_str::<QuoteResponse>("not json").is_err());
    }
}
