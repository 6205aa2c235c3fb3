//! Step bookkeeping and the submit gate for the quote wizard.
//!
//! Everything here is plain data so the ordering rules (validate, then
//! cooldown, then honeypot) can be unit tested without a DOM.

pub const TOTAL_STEPS: u8 = 3;

/// Minimum gap between accepted submit attempts.
pub const SUBMIT_COOLDOWN_MS: f64 = 5_000.0;

/// Returns the step to show after a navigation request. Requests outside
/// `[1, TOTAL_STEPS]` keep the wizard where it is.
pub fn clamp_step(requested: i32, current: u8) -> u8 {
    if (1..=TOTAL_STEPS as i32).contains(&requested) {
        requested as u8
    } else {
        current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Done,
    Active,
    Upcoming,
}

impl DotState {
    pub fn class(self) -> Option<&'static str> {
        match self {
            DotState::Done => Some("done"),
            DotState::Active => Some("active"),
            DotState::Upcoming => None,
        }
    }
}

/// Progress dot `index` relative to the active step.
pub fn dot_state(index: u8, current: u8) -> DotState {
    if index < current {
        DotState::Done
    } else if index == current {
        DotState::Active
    } else {
        DotState::Upcoming
    }
}

/// Connector line `index` sits between dot `index` and dot `index + 1` and
/// fills once the step it leads out of is behind the user.
pub fn line_filled(index: u8, current: u8) -> bool {
    index < current
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

pub fn cooling_down(last_submit_ms: Option<f64>, now_ms: f64) -> bool {
    matches!(last_submit_ms, Some(last) if now_ms - last < SUBMIT_COOLDOWN_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Step-3 validation failed; flag fields, touch nothing else.
    Invalid,
    /// Inside the cooldown window; tell the user to wait.
    CoolingDown,
    /// Honeypot tripped; drop silently.
    Drop,
    Proceed,
}

impl SubmitDecision {
    /// `Drop` consumes the cooldown slot on purpose: a bot that retries
    /// immediately gets rate-limited instead of learning it was detected.
    pub fn consumes_cooldown(self) -> bool {
        matches!(self, SubmitDecision::Drop | SubmitDecision::Proceed)
    }
}

pub fn decide_submit(step3_ok: bool, cooling: bool, honeypot_filled: bool) -> SubmitDecision {
    if !step3_ok {
        SubmitDecision::Invalid
    } else if cooling {
        SubmitDecision::CoolingDown
    } else if honeypot_filled {
        SubmitDecision::Drop
    } else {
        SubmitDecision::Proceed
    }
}

/// `application/x-www-form-urlencoded` body for the quote POST.
pub fn encode_form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_ignores_out_of_range_requests() {
        assert_eq!(clamp_step(0, 2), 2);
        assert_eq!(clamp_step(-1, 2), 2);
        assert_eq!(clamp_step(4, 2), 2);
        assert_eq!(clamp_step(1, 2), 1);
        assert_eq!(clamp_step(3, 2), 3);
    }

    #[test]
    fn dots_and_lines_follow_the_active_step() {
        assert_eq!(dot_state(1, 2), DotState::Done);
        assert_eq!(dot_state(2, 2), DotState::Active);
        assert_eq!(dot_state(3, 2), DotState::Upcoming);
        assert!(line_filled(1, 2));
        assert!(!line_filled(2, 2));
        // step 1: nothing done, nothing filled
        assert_eq!(dot_state(1, 1), DotState::Active);
        assert!(!line_filled(1, 1));
        // step 3: everything before it done
        assert_eq!(dot_state(1, 3), DotState::Done);
        assert_eq!(dot_state(2, 3), DotState::Done);
        assert!(line_filled(2, 3));
    }

    #[test]
    fn exactly_one_dot_is_active_for_every_step() {
        for current in 1..=TOTAL_STEPS {
            let active = (1..=TOTAL_STEPS)
                .filter(|&i| dot_state(i, current) == DotState::Active)
                .count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn cooldown_window_is_half_open() {
        assert!(!cooling_down(None, 1_000.0));
        assert!(cooling_down(Some(0.0), 4_999.0));
        assert!(!cooling_down(Some(0.0), 5_000.0));
        assert!(cooling_down(Some(10_000.0), 10_001.0));
    }

    #[test]
    fn decision_order_is_validate_cooldown_honeypot() {
        // invalid input wins even when also cooling down or bot-suspected
        assert_eq!(decide_submit(false, true, true), SubmitDecision::Invalid);
        assert_eq!(decide_submit(true, true, true), SubmitDecision::CoolingDown);
        assert_eq!(decide_submit(true, false, true), SubmitDecision::Drop);
        assert_eq!(decide_submit(true, false, false), SubmitDecision::Proceed);
    }

    #[test]
    fn only_drop_and_proceed_consume_the_cooldown() {
        assert!(!SubmitDecision::Invalid.consumes_cooldown());
        assert!(!SubmitDecision::CoolingDown.consumes_cooldown());
        assert!(SubmitDecision::Drop.consumes_cooldown());
        assert!(SubmitDecision::Proceed.consumes_cooldown());
    }

    #[test]
    fn form_body_is_percent_encoded() {
        let body = encode_form_body(&[
            ("service", "Roofing"),
            ("name", "Bill & Son"),
            ("description", "new deck + rails"),
        ]);
        assert_eq!(
            body,
            "service=Roofing&name=Bill%20%26%20Son&description=new%20deck%20%2B%20rails"
        );
    }
}
