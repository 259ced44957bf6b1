use serde::{Deserialize, Serialize};

use super::domain::ModuleCategory;

/// Outcome of one of the four election checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionStatusElement {
    /// `None` for the additional (credit and language) check.
    pub category: Option<ModuleCategory>,
    pub valid: bool,
    pub reasons: Vec<String>,
}

impl ElectionStatusElement {
    fn pending(category: Option<ModuleCategory>) -> Self {
        Self {
            category,
            valid: true,
            reasons: Vec::new(),
        }
    }

    pub fn summary(&self) -> String {
        let name = self
            .category
            .map(ModuleCategory::label)
            .unwrap_or("additional");
        if self.valid {
            format!("{name}: ok")
        } else {
            format!("{name}: {}", self.reasons.join("; "))
        }
    }
}

/// Immutable verdict on a module election. Only built through [`ElectionStatusBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectionStatus {
    pub subject: ElectionStatusElement,
    pub context: ElectionStatusElement,
    pub interdisciplinary: ElectionStatusElement,
    pub additional: ElectionStatusElement,
    /// Non-fatal findings, e.g. modules that count towards no quota.
    pub warnings: Vec<String>,
    valid: bool,
}

impl ElectionStatus {
    pub fn builder() -> ElectionStatusBuilder {
        ElectionStatusBuilder::default()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn elements(&self) -> [&ElectionStatusElement; 4] {
        [
            &self.subject,
            &self.context,
            &self.interdisciplinary,
            &self.additional,
        ]
    }

    /// Every violation reason in element order.
    pub fn reasons(&self) -> Vec<String> {
        self.elements()
            .into_iter()
            .flat_map(|element| element.reasons.iter().cloned())
            .collect()
    }

    pub fn summary(&self) -> String {
        if self.valid {
            return "election valid".to_string();
        }

        let failed: Vec<String> = self
            .elements()
            .into_iter()
            .filter(|element| !element.valid)
            .map(ElectionStatusElement::summary)
            .collect();
        format!("election invalid: {}", failed.join(" | "))
    }
}

/// Which of the four checks a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSlot {
    Subject,
    Context,
    Interdisciplinary,
    Additional,
}

/// Accumulates the four outcomes of one validation call.
#[derive(Debug, Clone)]
pub struct ElectionStatusBuilder {
    subject: ElectionStatusElement,
    context: ElectionStatusElement,
    interdisciplinary: ElectionStatusElement,
    additional: ElectionStatusElement,
    warnings: Vec<String>,
}

impl Default for ElectionStatusBuilder {
    fn default() -> Self {
        Self {
            subject: ElectionStatusElement::pending(Some(ModuleCategory::Subject)),
            context: ElectionStatusElement::pending(Some(ModuleCategory::Context)),
            interdisciplinary: ElectionStatusElement::pending(Some(
                ModuleCategory::Interdisciplinary,
            )),
            additional: ElectionStatusElement::pending(None),
            warnings: Vec::new(),
        }
    }
}

impl ElectionStatusBuilder {
    fn slot_mut(&mut self, slot: StatusSlot) -> &mut ElectionStatusElement {
        match slot {
            StatusSlot::Subject => &mut self.subject,
            StatusSlot::Context => &mut self.context,
            StatusSlot::Interdisciplinary => &mut self.interdisciplinary,
            StatusSlot::Additional => &mut self.additional,
        }
    }

    /// Record a violation; the slot becomes invalid.
    pub fn reject(&mut self, slot: StatusSlot, reason: impl Into<String>) -> &mut Self {
        let element = self.slot_mut(slot);
        element.valid = false;
        element.reasons.push(reason.into());
        self
    }

    pub fn warn(&mut self, warning: impl Into<String>) -> &mut Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn build(self) -> ElectionStatus {
        let valid = self.subject.valid
            && self.context.valid
            && self.interdisciplinary.valid
            && self.additional.valid;

        ElectionStatus {
            subject: self.subject,
            context: self.context,
            interdisciplinary: self.interdisciplinary,
            additional: self.additional,
            warnings: self.warnings,
            valid,
        }
    }
}
