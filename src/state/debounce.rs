//! Debounced text inputs.
//!
//! Text fields (search box, per-column filters) update their display value on
//! every keystroke but commit to the query string only after a quiet period.
//! Time is passed in explicitly so the state machines can be driven from the
//! UI frame loop and from tests alike.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Quiet period before a text edit is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounce timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    /// A commit is scheduled. `token` changes on every reschedule.
    Pending { token: u64, deadline: Instant },
}

/// Cancelable, reschedule-on-edit timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    state: DebounceState,
    next_token: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, state: DebounceState::Idle, next_token: 0 }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Cancels any pending commit and schedules a new one `delay` after `now`.
    ///
    /// # Returns
    /// The token of the new pending commit.
    pub fn schedule(&mut self, now: Instant) -> u64 {
        self.next_token = self.next_token.wrapping_add(1);
        self.state = DebounceState::Pending { token: self.next_token, deadline: now + self.delay };
        self.next_token
    }

    /// Cancels the pending commit, if any.
    ///
    /// # Returns
    /// `true` if a commit was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = DebounceState::Idle;
        was_pending
    }

    /// Fires the pending commit once its deadline has passed.
    ///
    /// # Returns
    /// The token that fired, or `None` if nothing is due.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        match self.state {
            DebounceState::Pending { token, deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                Some(token)
            }
            _ => None,
        }
    }

    /// Time left until the pending commit fires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            DebounceState::Pending { deadline, .. } => Some(deadline.saturating_duration_since(now)),
            DebounceState::Idle => None,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// A text field with a local display buffer and a debounced commit.
///
/// While a commit is pending, external query changes do not overwrite the
/// buffer; once idle, the buffer re-syncs from the query.
#[derive(Debug, Clone)]
pub struct DebouncedText {
    text: String,
    debouncer: Debouncer,
}

impl DebouncedText {
    pub fn new(initial: impl Into<String>, delay: Duration) -> Self {
        Self { text: initial.into(), debouncer: Debouncer::new(delay) }
    }

    /// Current display value.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable buffer for a text widget. Call `edited` when it changes.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Replaces the display value and (re)schedules a commit.
    pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.edited(now);
    }

    /// Reschedules the commit after the buffer was changed in place.
    pub fn edited(&mut self, now: Instant) {
        self.debouncer.schedule(now);
    }

    /// Returns the value to commit once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        self.debouncer.poll(now).map(|_| self.text.clone())
    }

    /// Copies the decoded query value into the buffer unless a commit is
    /// pending.
    ///
    /// # Returns
    /// `true` if the buffer changed.
    pub fn sync_from_query(&mut self, value: &str) -> bool {
        if self.debouncer.is_pending() || self.text == value {
            return false;
        }
        self.text = value.to_string();
        true
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    /// Drops the pending commit without firing it.
    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }
}

/// Per-column filter inputs, keyed by field.
///
/// Inputs exist only while their header shows a filter box; `retain` cancels
/// and drops the others so nothing commits after its input went away.
#[derive(Debug, Clone)]
pub struct FilterInputs {
    delay: Duration,
    inputs: HashMap<String, DebouncedText>,
}

impl FilterInputs {
    pub fn new(delay: Duration) -> Self {
        Self { delay, inputs: HashMap::new() }
    }

    /// Returns the input for `field`, creating it from the query value.
    pub fn input_mut(&mut self, field: &str, query_value: &str) -> &mut DebouncedText {
        let delay = self.delay;
        self.inputs
            .entry(field.to_string())
            .or_insert_with(|| DebouncedText::new(query_value, delay))
    }

    pub fn get(&self, field: &str) -> Option<&DebouncedText> {
        self.inputs.get(field)
    }

    /// Keeps only the inputs for `fields`, cancelling the rest.
    pub fn retain<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
        let keep: Vec<&str> = fields.into_iter().collect();
        self.inputs.retain(|field, input| {
            let kept = keep.contains(&field.as_str());
            if !kept {
                input.cancel();
            }
            kept
        });
    }

    /// Cancels and drops every input.
    pub fn clear(&mut self) {
        for input in self.inputs.values_mut() {
            input.cancel();
        }
        self.inputs.clear();
    }

    /// Fires every due commit.
    ///
    /// # Returns
    /// `(field, value)` pairs sorted by field.
    pub fn poll(&mut self, now: Instant) -> Vec<(String, String)> {
        let mut due: Vec<(String, String)> = self
            .inputs
            .iter_mut()
            .filter_map(|(field, input)| input.poll(now).map(|value| (field.clone(), value)))
            .collect();
        due.sort();
        due
    }

    /// Shortest time until any pending input fires.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.inputs.values().filter_map(|input| input.remaining(now)).min()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl Default for FilterInputs {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn rapid_edits_commit_once_with_last_value() {
        let t0 = Instant::now();
        let mut input = DebouncedText::new("", DEFAULT_DEBOUNCE);
        input.edit("A", t0);
        input.edit("AB", t0 + ms(100));
        input.edit("ABC", t0 + ms(200));

        assert_eq!(input.poll(t0 + ms(300)), None);
        assert_eq!(input.poll(t0 + ms(499)), None);
        assert_eq!(input.poll(t0 + ms(500)), Some("ABC".to_string()));
        assert_eq!(input.poll(t0 + ms(900)), None);
    }

    #[test]
    fn reschedule_issues_new_token() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::default();
        let first = debouncer.schedule(t0);
        let second = debouncer.schedule(t0 + ms(10));
        assert_ne!(first, second);
        assert_eq!(debouncer.poll(t0 + ms(310)), Some(second));
    }

    #[test]
    fn cancel_prevents_commit() {
        let t0 = Instant::now();
        let mut input = DebouncedText::new("", DEFAULT_DEBOUNCE);
        input.edit("draft", t0);
        assert!(input.cancel());
        assert!(!input.cancel());
        assert_eq!(input.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn pending_edit_is_not_overwritten_by_query() {
        let t0 = Instant::now();
        let mut input = DebouncedText::new("old", DEFAULT_DEBOUNCE);
        input.edit("typing", t0);
        assert!(!input.sync_from_query("old"));
        assert_eq!(input.text(), "typing");

        input.poll(t0 + ms(300));
        assert!(input.sync_from_query("from-url"));
        assert_eq!(input.text(), "from-url");
    }

    #[test]
    fn remaining_counts_down() {
        let t0 = Instant::now();
        let mut input = DebouncedText::new("", DEFAULT_DEBOUNCE);
        assert_eq!(input.remaining(t0), None);
        input.edit("x", t0);
        assert_eq!(input.remaining(t0 + ms(100)), Some(ms(200)));
        assert_eq!(input.remaining(t0 + ms(400)), Some(Duration::ZERO));
    }

    #[test]
    fn retained_filter_inputs_cancel_the_rest() {
        let t0 = Instant::now();
        let mut inputs = FilterInputs::default();
        inputs.input_mut("city", "").edit("Lima", t0);
        inputs.input_mut("price", "").edit("100-200", t0);

        inputs.retain(["price"]);
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs.poll(t0 + ms(300)), vec![("price".to_string(), "100-200".to_string())]);
    }

    #[test]
    fn cleared_inputs_never_commit() {
        let t0 = Instant::now();
        let mut inputs = FilterInputs::default();
        inputs.input_mut("city", "").edit("Lima", t0);
        inputs.clear();
        assert!(inputs.is_empty());
        assert!(inputs.poll(t0 + ms(1000)).is_empty());
    }
}
