/// A controlled text input: the current value plus its change handler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeInput {
    value: String,
}

impl ChangeInput {
    /// Start from the attribute's current value.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn on_change(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn reset(&mut self) {
        self.value.clear();
    }
}
